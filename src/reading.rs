//! Typed model of one telemetry snapshot from the aerodrome wind sensors.
//!
//! The upstream API hands us a loosely structured JSON document; everything
//! in here either becomes a validated domain value or the whole snapshot is
//! rejected. Parsing is done by hand over `serde_json::Value` rather than
//! with derived impls so every failure can name the exact field path.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ParseError;

/// Base physical wind sample shared by live sensors and forecast slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InnerWind {
    /// Knots.
    pub wind_speed: u32,
    /// Degrees, clock convention, always reduced into [0,360).
    pub wind_direction: u16,
    /// How far the variable-wind band extends below the mean heading.
    pub wind_direction_deviation_left: u16,
    /// How far the variable-wind band extends above the mean heading.
    pub wind_direction_deviation_right: u16,
    /// Knots.
    pub wind_gust: u32,
}

impl InnerWind {
    pub fn to_human(&self) -> String {
        format!(
            "{}G{}KT{} {}V{}",
            self.wind_speed,
            self.wind_gust,
            self.wind_direction,
            self.wind_direction_deviation_left,
            self.wind_direction_deviation_right
        )
    }

    fn parse(value: &Value, path: &str) -> Result<Self, ParseError> {
        let direction = integer_field(value, path, "wind_direction")?;
        Ok(Self {
            wind_speed: knots_field(value, path, "wind_speed")?,
            wind_direction: direction.rem_euclid(360) as u16,
            wind_direction_deviation_left: deviation_field(
                value,
                path,
                "wind_direction_deviation_left",
            )?,
            wind_direction_deviation_right: deviation_field(
                value,
                path,
                "wind_direction_deviation_right",
            )?,
            wind_gust: knots_field(value, path, "wind_gust")?,
        })
    }
}

/// One live sample from a named sensor head. Immutable once constructed.
///
/// Serializes back to the upstream shape (wind fields flattened, the tag
/// under `type`) so validated snapshots can be re-emitted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorReading {
    #[serde(flatten)]
    pub wind: InnerWind,
    /// Free-form tag from upstream, kept verbatim.
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub label: String,
    /// Epoch seconds.
    pub date: i64,
}

impl SensorReading {
    fn parse(value: &Value, path: &str) -> Result<Self, ParseError> {
        let (label, label_path) = field(value, path, "label")?;
        Ok(Self {
            wind: InnerWind::parse(value, path)?,
            sensor_type: string_field(value, path, "type")?,
            label: scalar_to_string(label, &label_path)?,
            date: integer_field(value, path, "date")?,
        })
    }

    pub fn to_human(&self) -> String {
        self.wind.to_human()
    }
}

/// Wind components resolved against a runway orientation. Signed: positive
/// tail_wind is a tailwind, negative a head component; the crosswind sign
/// maps to a side via the suffix rule in [`crate::metrics::format_component`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailCrossWind {
    pub tail_wind: f64,
    pub cross_wind: f64,
}

impl TailCrossWind {
    fn parse(value: &Value, path: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tail_wind: float_field(value, path, "tailWind")?,
            cross_wind: float_field(value, path, "crossWind")?,
        })
    }
}

impl fmt::Display for TailCrossWind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}X", self.tail_wind, self.cross_wind)
    }
}

/// One entry of the sensor-detail mapping, discriminated by the upstream
/// `sensor_type` field. Runway entries additionally carry resolved wind
/// components and an opaque graph payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "sensor_type", rename_all = "lowercase")]
pub enum SensorDetail {
    Sensor {
        sensor_reading: SensorReading,
    },
    Runway {
        sensor_reading: SensorReading,
        sensor_wind: TailCrossWind,
        sensor_graph: Map<String, Value>,
    },
}

impl SensorDetail {
    fn parse(key: &str, value: &Value) -> Result<Self, ParseError> {
        let (discriminator, discriminator_path) = field(value, key, "sensor_type")?;
        let discriminator = discriminator.as_str().ok_or_else(|| ParseError::TypeMismatch {
            path: discriminator_path,
            expected: "string",
            got: json_type(discriminator),
        })?;

        let (reading, reading_path) = field(value, key, "sensor_reading")?;
        let sensor_reading = SensorReading::parse(reading, &reading_path)?;

        match discriminator {
            "sensor" => Ok(Self::Sensor { sensor_reading }),
            "runway" => {
                let (wind, wind_path) = field(value, key, "sensor_wind")?;
                let (graph, graph_path) = field(value, key, "sensor_graph")?;
                let sensor_graph = graph
                    .as_object()
                    .ok_or_else(|| ParseError::TypeMismatch {
                        path: graph_path,
                        expected: "object",
                        got: json_type(graph),
                    })?
                    .clone();
                Ok(Self::Runway {
                    sensor_reading,
                    sensor_wind: TailCrossWind::parse(wind, &wind_path)?,
                    sensor_graph,
                })
            }
            other => Err(ParseError::UnknownVariant {
                key: key.to_string(),
                discriminator: other.to_string(),
            }),
        }
    }

    pub fn sensor_reading(&self) -> &SensorReading {
        match self {
            Self::Sensor { sensor_reading } | Self::Runway { sensor_reading, .. } => sensor_reading,
        }
    }

    /// Resolved wind components, present only for runway entries.
    pub fn sensor_wind(&self) -> Option<&TailCrossWind> {
        match self {
            Self::Sensor { .. } => None,
            Self::Runway { sensor_wind, .. } => Some(sensor_wind),
        }
    }

    pub fn to_human(&self) -> String {
        match self {
            Self::Sensor { sensor_reading } => sensor_reading.to_human(),
            Self::Runway {
                sensor_reading,
                sensor_wind,
                ..
            } => format!("{} {}", sensor_reading.to_human(), sensor_wind),
        }
    }
}

/// Forecast wind for one runway at one (opaquely formatted) time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindObservationTimed {
    #[serde(flatten)]
    pub wind: InnerWind,
    pub runway: String,
    pub time: String,
}

impl WindObservationTimed {
    fn parse(value: &Value, path: &str) -> Result<Self, ParseError> {
        Ok(Self {
            wind: InnerWind::parse(value, path)?,
            runway: string_field(value, path, "runway")?,
            time: string_field(value, path, "time")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WindForecast {
    pub forecast_slots: Vec<WindObservationTimed>,
}

impl WindForecast {
    fn parse(value: &Value, path: &str) -> Result<Self, ParseError> {
        let (slots, slots_path) = field(value, path, "forecast_slots")?;
        let slots = slots.as_array().ok_or_else(|| ParseError::TypeMismatch {
            path: slots_path.clone(),
            expected: "array",
            got: json_type(slots),
        })?;

        let mut forecast_slots = Vec::with_capacity(slots.len());
        for (idx, slot) in slots.iter().enumerate() {
            forecast_slots.push(WindObservationTimed::parse(
                slot,
                &format!("{slots_path}[{idx}]"),
            )?);
        }
        Ok(Self { forecast_slots })
    }
}

/// One entry of the weather-figures panel, discriminated by the upstream
/// `type` field: either a titled stat line or a per-runway wind icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeteoReading {
    Stats {
        icon: String,
        title: String,
        description: String,
    },
    WindIcon {
        #[serde(flatten)]
        wind: InnerWind,
        runway: String,
    },
}

impl MeteoReading {
    fn parse(value: &Value, path: &str) -> Result<Self, ParseError> {
        let (discriminator, discriminator_path) = field(value, path, "type")?;
        let discriminator = discriminator.as_str().ok_or_else(|| ParseError::TypeMismatch {
            path: discriminator_path,
            expected: "string",
            got: json_type(discriminator),
        })?;

        match discriminator {
            "stats" => Ok(Self::Stats {
                icon: string_field(value, path, "icon")?,
                title: string_field(value, path, "title")?,
                description: string_field(value, path, "description")?,
            }),
            "wind_icon" => Ok(Self::WindIcon {
                wind: InnerWind::parse(value, path)?,
                runway: string_field(value, path, "runway")?,
            }),
            other => Err(ParseError::UnknownVariant {
                key: path.to_string(),
                discriminator: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeteoReadings {
    /// Epoch seconds.
    pub date: i64,
    pub readings: Vec<MeteoReading>,
}

impl MeteoReadings {
    fn parse(value: &Value, path: &str) -> Result<Self, ParseError> {
        let (readings, readings_path) = field(value, path, "readings")?;
        let readings = readings.as_array().ok_or_else(|| ParseError::TypeMismatch {
            path: readings_path.clone(),
            expected: "array",
            got: json_type(readings),
        })?;

        let mut parsed = Vec::with_capacity(readings.len());
        for (idx, reading) in readings.iter().enumerate() {
            parsed.push(MeteoReading::parse(
                reading,
                &format!("{readings_path}[{idx}]"),
            )?);
        }
        Ok(Self {
            date: integer_field(value, path, "date")?,
            readings: parsed,
        })
    }
}

/// One fully validated snapshot: every sensor keyed by its source key
/// (e.g. `"runway-25R"`), plus the runway wind forecast.
///
/// A snapshot is built wholesale by [`Reading::parse`] and never mutated;
/// refresh replaces the whole value, so any number of consumers can hold
/// references to the same snapshot concurrently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub wind_sensor_detail: BTreeMap<String, SensorDetail>,
    pub wind_forecast: WindForecast,
    pub meteo_readings: MeteoReadings,
    /// Opaque upstream payload, not interpreted here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_aloft: Option<Map<String, Value>>,
}

impl Reading {
    /// Validate a decoded snapshot document. All-or-nothing: the first
    /// offending field fails the whole parse, so callers never see a
    /// half-populated snapshot.
    pub fn parse(value: &Value) -> Result<Self, ParseError> {
        let (detail, detail_path) = field(value, "", "wind_sensor_detail")?;
        let detail = detail.as_object().ok_or_else(|| ParseError::TypeMismatch {
            path: detail_path,
            expected: "object",
            got: json_type(detail),
        })?;

        let mut wind_sensor_detail = BTreeMap::new();
        for (key, entry) in detail {
            wind_sensor_detail.insert(key.clone(), SensorDetail::parse(key, entry)?);
        }

        let (forecast, forecast_path) = field(value, "", "wind_forecast")?;
        let (meteo, meteo_path) = field(value, "", "meteo_readings")?;

        // wind_aloft may be absent or null upstream.
        let wind_aloft = match value.get("wind_aloft") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map.clone()),
            Some(other) => {
                return Err(ParseError::TypeMismatch {
                    path: "wind_aloft".to_string(),
                    expected: "object or null",
                    got: json_type(other),
                })
            }
        };

        Ok(Self {
            wind_sensor_detail,
            wind_forecast: WindForecast::parse(forecast, &forecast_path)?,
            meteo_readings: MeteoReadings::parse(meteo, &meteo_path)?,
            wind_aloft,
        })
    }

    /// Keys of all runway sensors, in map order. Recomputed on demand.
    pub fn runway_keys(&self) -> Vec<&str> {
        self.wind_sensor_detail
            .keys()
            .filter(|key| key.contains("runway-"))
            .map(String::as_str)
            .collect()
    }
}

/// All of `keys` except `one_key`; unchanged when the key is absent.
/// Drives "every rose but the selected one" displays.
pub fn exclude<'a>(keys: &[&'a str], one_key: &str) -> Vec<&'a str> {
    keys.iter().copied().filter(|key| *key != one_key).collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn field<'a>(value: &'a Value, path: &str, name: &str) -> Result<(&'a Value, String), ParseError> {
    let child_path = join(path, name);
    match value.get(name) {
        Some(child) => Ok((child, child_path)),
        None => Err(ParseError::MissingField(child_path)),
    }
}

fn integer_field(value: &Value, path: &str, name: &str) -> Result<i64, ParseError> {
    let (child, child_path) = field(value, path, name)?;
    child.as_i64().ok_or_else(|| ParseError::TypeMismatch {
        path: child_path,
        expected: "integer",
        got: json_type(child),
    })
}

fn knots_field(value: &Value, path: &str, name: &str) -> Result<u32, ParseError> {
    let raw = integer_field(value, path, name)?;
    u32::try_from(raw).map_err(|_| ParseError::TypeMismatch {
        path: join(path, name),
        expected: "non-negative integer",
        got: "negative integer",
    })
}

fn deviation_field(value: &Value, path: &str, name: &str) -> Result<u16, ParseError> {
    let raw = integer_field(value, path, name)?;
    u16::try_from(raw).map_err(|_| ParseError::TypeMismatch {
        path: join(path, name),
        expected: "non-negative integer",
        got: "negative integer",
    })
}

fn float_field(value: &Value, path: &str, name: &str) -> Result<f64, ParseError> {
    let (child, child_path) = field(value, path, name)?;
    child.as_f64().ok_or_else(|| ParseError::TypeMismatch {
        path: child_path,
        expected: "number",
        got: json_type(child),
    })
}

fn string_field(value: &Value, path: &str, name: &str) -> Result<String, ParseError> {
    let (child, child_path) = field(value, path, name)?;
    match child.as_str() {
        Some(s) => Ok(s.to_string()),
        None => Err(ParseError::TypeMismatch {
            path: child_path,
            expected: "string",
            got: json_type(child),
        }),
    }
}

// The upstream emits labels as strings or bare numbers depending on the
// sensor, so any scalar coerces instead of failing.
fn scalar_to_string(value: &Value, path: &str) -> Result<String, ParseError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ParseError::TypeMismatch {
            path: path.to_string(),
            expected: "scalar",
            got: json_type(other),
        }),
    }
}
