pub mod batc;
pub mod error;
pub mod metrics;
pub mod reading;
pub mod rose;

pub use error::{FetchError, ParseError};
pub use reading::{Reading, SensorDetail, SensorReading, TailCrossWind};
