use std::error::Error;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use barwis::batc::BatcApi;
use barwis::metrics::format_component;
use barwis::reading::{exclude, MeteoReading, Reading, SensorDetail};
use barwis::rose;

mod cli;

/// Width of the gap marking the current wind direction on a rose.
const PIE_WIDTH: f64 = 10.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = cli::Args::parse();

    let api = BatcApi::new()?;
    if let Err(err) = api.prime_cookies() {
        error!("cookie priming failed: {err}");
    }

    // Last-good snapshot, replaced wholesale on each successful refresh.
    let mut snapshot: Option<Reading> = None;
    loop {
        match api.latest_reading() {
            Ok(reading) => {
                info!("refreshed, {} sensors", reading.wind_sensor_detail.len());
                snapshot = Some(reading);
            }
            Err(err) => error!("refresh failed, keeping previous snapshot: {err}"),
        }

        match &snapshot {
            Some(reading) if args.json => match serde_json::to_string_pretty(reading) {
                Ok(json) => println!("{json}"),
                Err(err) => error!("serializing snapshot failed: {err}"),
            },
            Some(reading) => print_report(reading, args.key.as_deref()),
            None => println!("no data yet"),
        }

        match args.watch {
            Some(seconds) => thread::sleep(Duration::from_secs(seconds)),
            None => break,
        }
    }

    Ok(())
}

fn print_report(reading: &Reading, featured: Option<&str>) {
    let keys = reading.runway_keys();
    let Some(featured) = featured
        .filter(|key| keys.contains(key))
        .or_else(|| keys.first().copied())
    else {
        println!("no runway sensors in snapshot");
        return;
    };

    print_sensor(featured, &reading.wind_sensor_detail[featured]);
    for key in exclude(&keys, featured) {
        print_sensor(key, &reading.wind_sensor_detail[key]);
    }
    print_weather_figures(reading);
    print_forecast(reading);
}

fn print_weather_figures(reading: &Reading) {
    // Wind icons duplicate the per-runway readout above, so only the stat
    // lines are shown here.
    let stats: Vec<_> = reading
        .meteo_readings
        .readings
        .iter()
        .filter_map(|entry| match entry {
            MeteoReading::Stats {
                title, description, ..
            } => Some((title, description)),
            MeteoReading::WindIcon { .. } => None,
        })
        .collect();
    if stats.is_empty() {
        return;
    }

    println!("weather:");
    for (title, description) in stats {
        println!("  {title}: {description}");
    }
}

fn print_sensor(key: &str, detail: &SensorDetail) {
    let sensor = detail.sensor_reading();
    let wind = &sensor.wind;
    let observed = chrono::DateTime::from_timestamp(sensor.date, 0)
        .map(|ts| ts.format("%H%M UTC").to_string())
        .unwrap_or_else(|| "--".to_string());

    println!("{key} ({label}) at {observed}", label = sensor.label);
    println!(
        "  wind {:03}\u{b0} {:02}kt G{:02}kt",
        wind.wind_direction, wind.wind_speed, wind.wind_gust
    );

    let direction = i32::from(wind.wind_direction);
    let dev_left = i32::from(wind.wind_direction_deviation_left);
    let dev_right = i32::from(wind.wind_direction_deviation_right);

    let (lower, upper) = rose::variable_wind_band(direction, dev_left, dev_right);
    println!("  vrb btn {lower:03}\u{b0} and {upper:03}\u{b0}");

    if let Some(components) = detail.sensor_wind() {
        println!(
            "  cross {cross} tail {tail}",
            cross = format_component(components.cross_wind, "R", "L"),
            tail = format_component(components.tail_wind, "T", "H"),
        );
    }

    let indicator = rose::direction_indicator_arc(direction, PIE_WIDTH);
    let (left, right) = rose::variability_arcs(direction, dev_left, dev_right, PIE_WIDTH);
    let (x, y) = rose::heading_to_unit_vector(direction);
    println!(
        "  rose angle {angle}\u{b0} gap arc {start:.1}\u{b0}{span:+.1}\u{b0} \
         vrb arcs {l_start:.1}\u{b0}{l_span:+.1}\u{b0} / {r_start:.1}\u{b0}{r_span:+.1}\u{b0} \
         pointer ({x:.2}, {y:.2})",
        angle = rose::normalize_heading(direction),
        start = indicator.start,
        span = indicator.span,
        l_start = left.start,
        l_span = left.span,
        r_start = right.start,
        r_span = right.span,
    );
}

fn print_forecast(reading: &Reading) {
    if reading.wind_forecast.forecast_slots.is_empty() {
        return;
    }
    println!("forecast:");
    for slot in &reading.wind_forecast.forecast_slots {
        println!("  {} {} {}", slot.time, slot.runway, slot.wind.to_human());
    }
}
