//! Derived display figures: wind component formatting and relative humidity.

/// Format a signed wind component to one decimal place with a side suffix.
///
/// The sign picks the suffix: negative takes `negative_suffix`, everything
/// else (zero included) takes `positive_suffix`. Crosswind uses
/// `("R", "L")`, tailwind `("T", "H")` where negative means a head
/// component.
pub fn format_component(value: f64, negative_suffix: &str, positive_suffix: &str) -> String {
    let suffix = if value < 0.0 {
        negative_suffix
    } else {
        positive_suffix
    };
    format!("{:.1}{}", value.abs(), suffix)
}

/// Relative humidity in percent from temperature and dew point in °C, via
/// the Magnus approximation. Not clamped; out-of-range results from
/// malformed inputs are the display layer's call.
pub fn relative_humidity(temp_c: f64, dewpoint_c: f64) -> f64 {
    let top = 17.625 * (dewpoint_c - temp_c);
    let bottom = 243.04 + temp_c - dewpoint_c;
    100.0 * (top / bottom).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn crosswind_suffixes() {
        assert_eq!(format_component(-3.2, "R", "L"), "3.2R");
        assert_eq!(format_component(3.2, "R", "L"), "3.2L");
    }

    #[test]
    fn tailwind_zero_reads_as_head() {
        assert_eq!(format_component(0.0, "T", "H"), "0.0H");
        assert_eq!(format_component(-0.05, "T", "H"), "0.1T");
    }

    #[test]
    fn saturation_at_dew_point() {
        assert_relative_eq!(relative_humidity(20.0, 20.0), 100.0);
    }

    #[test]
    fn humidity_drops_with_spread() {
        let rh = relative_humidity(25.0, 10.0);
        assert!(rh > 35.0 && rh < 37.0, "got {rh}");
        assert!(relative_humidity(25.0, 20.0) > rh);
    }
}
