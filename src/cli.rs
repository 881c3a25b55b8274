use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Aerodrome runway wind readout";

const LONG_ABOUT: &str = "
Fetches the live runway wind telemetry from the airport meteo API and prints
a per-runway readout: mean wind, gust, the variable-wind band, and the
tail/cross-wind components resolved against each runway.

With --watch the snapshot is refreshed on an interval; a failed refresh keeps
the last good snapshot instead of blanking the readout.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(long, help = "Runway key to feature first (e.g. runway-25R)")]
    pub key: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Keep refreshing at this interval instead of exiting after one fetch"
    )]
    pub watch: Option<u64>,

    #[arg(long, help = "Emit the validated snapshot as JSON instead of the readout")]
    pub json: bool,
}
