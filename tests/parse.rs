use serde_json::{json, Value};

use barwis::batc::BatcApi;
use barwis::reading::{exclude, MeteoReading, Reading};
use barwis::rose;
use barwis::ParseError;

fn snapshot() -> Value {
    json!({
        "wind_sensor_detail": {
            "runway-25R": {
                "sensor_type": "runway",
                "sensor_reading": {
                    "type": "wind",
                    "label": "25R",
                    "date": 1767225600,
                    "wind_speed": 14,
                    "wind_direction": 250,
                    "wind_direction_deviation_left": 10,
                    "wind_direction_deviation_right": 15,
                    "wind_gust": 22,
                },
                "sensor_wind": { "tailWind": 1.8, "crossWind": -4.0 },
                "sensor_graph": { "points": [] },
            },
            "runway-25L": {
                "sensor_type": "runway",
                "sensor_reading": {
                    "type": "wind",
                    "label": "25L",
                    "date": 1767225600,
                    "wind_speed": 13,
                    "wind_direction": 255,
                    "wind_direction_deviation_left": 5,
                    "wind_direction_deviation_right": 5,
                    "wind_gust": 19,
                },
                "sensor_wind": { "tailWind": -0.6, "crossWind": 3.2 },
                "sensor_graph": {},
            },
            "sensor-mid": {
                "sensor_type": "sensor",
                "sensor_reading": {
                    "type": "wind",
                    "label": 2,
                    "date": 1767225600,
                    "wind_speed": 11,
                    "wind_direction": 248,
                    "wind_direction_deviation_left": 0,
                    "wind_direction_deviation_right": 0,
                    "wind_gust": 16,
                },
            },
        },
        "wind_forecast": {
            "forecast_slots": [
                {
                    "runway": "25R",
                    "time": "14:20",
                    "wind_speed": 15,
                    "wind_direction": 260,
                    "wind_direction_deviation_left": 10,
                    "wind_direction_deviation_right": 10,
                    "wind_gust": 23,
                },
            ],
        },
        "meteo_readings": {
            "date": 1767225600,
            "readings": [
                {
                    "type": "stats",
                    "icon": "qnh",
                    "title": "QNH",
                    "description": "1013 hPa",
                },
                {
                    "type": "wind_icon",
                    "runway": "25R",
                    "wind_speed": 14,
                    "wind_direction": 250,
                    "wind_direction_deviation_left": 10,
                    "wind_direction_deviation_right": 15,
                    "wind_gust": 22,
                },
            ],
        },
        "wind_aloft": { "fl050": { "wind_direction": 270, "wind_speed": 35 } },
    })
}

#[test]
fn full_snapshot_round_trip() {
    let reading = Reading::parse(&snapshot()).unwrap();

    let keys = reading.runway_keys();
    assert_eq!(keys, ["runway-25L", "runway-25R"]);
    assert_eq!(exclude(&keys, "runway-25R"), ["runway-25L"]);

    let featured = &reading.wind_sensor_detail["runway-25R"];
    let wind = &featured.sensor_reading().wind;
    assert_eq!(
        rose::variable_wind_band(
            i32::from(wind.wind_direction),
            i32::from(wind.wind_direction_deviation_left),
            i32::from(wind.wind_direction_deviation_right),
        ),
        (240, 265)
    );

    assert_eq!(featured.sensor_wind().unwrap().cross_wind, -4.0);
    assert!(reading.wind_sensor_detail["sensor-mid"].sensor_wind().is_none());
    assert_eq!(reading.wind_sensor_detail["sensor-mid"].sensor_reading().label, "2");
    assert_eq!(reading.wind_forecast.forecast_slots.len(), 1);
    assert_eq!(reading.wind_forecast.forecast_slots[0].runway, "25R");

    assert_eq!(reading.meteo_readings.readings.len(), 2);
    assert!(matches!(
        reading.meteo_readings.readings[0],
        MeteoReading::Stats { ref title, .. } if title == "QNH"
    ));
    assert!(matches!(
        reading.meteo_readings.readings[1],
        MeteoReading::WindIcon { ref runway, .. } if runway == "25R"
    ));
    assert!(reading.wind_aloft.is_some());
}

#[test]
fn null_wind_aloft_parses_as_absent() {
    let mut document = snapshot();
    document["wind_aloft"] = Value::Null;

    let reading = Reading::parse(&document).unwrap();
    assert!(reading.wind_aloft.is_none());
}

#[test]
fn unknown_meteo_reading_fails_the_parse() {
    let mut document = snapshot();
    document["meteo_readings"]["readings"][0]["type"] = json!("banner");

    let err = Reading::parse(&document).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownVariant {
            key: "meteo_readings.readings[0]".to_string(),
            discriminator: "banner".to_string(),
        }
    );
}

#[test]
fn snapshot_serializes_back_to_upstream_shape() {
    let reading = Reading::parse(&snapshot()).unwrap();
    let emitted = serde_json::to_value(&reading).unwrap();

    let entry = &emitted["wind_sensor_detail"]["runway-25R"];
    assert_eq!(entry["sensor_type"], "runway");
    assert_eq!(entry["sensor_reading"]["wind_direction"], 250);
    assert_eq!(entry["sensor_reading"]["type"], "wind");
    assert_eq!(entry["sensor_wind"]["crossWind"], -4.0);
    assert_eq!(
        emitted["wind_forecast"]["forecast_slots"][0]["runway"],
        "25R"
    );
    assert_eq!(emitted["meteo_readings"]["readings"][0]["type"], "stats");
    assert_eq!(emitted["meteo_readings"]["readings"][1]["type"], "wind_icon");
}

#[test]
fn no_partial_snapshot_on_bad_entry() {
    let mut document = snapshot();
    document["wind_sensor_detail"]["sensor-mid"]["sensor_type"] = json!("unknown");

    let err = Reading::parse(&document).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownVariant {
            key: "sensor-mid".to_string(),
            discriminator: "unknown".to_string(),
        }
    );
}

#[test]
fn missing_forecast_fails_the_parse() {
    let mut document = snapshot();
    document.as_object_mut().unwrap().remove("wind_forecast");

    let err = Reading::parse(&document).unwrap_err();
    assert_eq!(err, ParseError::MissingField("wind_forecast".to_string()));
}

#[test]
fn snapshot_selected_by_current_label() {
    let document = json!({
        "data": {
            "currentLabel": "14:10",
            "timepoints": {
                "14:00": Value::Null,
                "14:10": snapshot(),
            },
        },
    });

    let reading = BatcApi::reading_from_document(&document).unwrap();
    assert_eq!(reading.runway_keys().len(), 2);
}
