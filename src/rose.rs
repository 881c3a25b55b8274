//! Angle geometry for wind-rose indicators.
//!
//! Aviation headings are clock convention: 0° is north (up) and angles grow
//! clockwise. Rendering backends want math convention: 0° on the reference
//! axis (3 o'clock) with angles growing counter-clockwise. Every conversion
//! routes through [`normalize_heading`] so the mapping exists in exactly one
//! place, and all arc arithmetic happens in unbounded degree space with
//! wrapping applied only to final angles. Clamping a span instead of
//! wrapping it truncates arcs that cross the 0°/360° boundary.
//!
//! Everything here is a total function: out-of-range or negative inputs are
//! normalized, never rejected. A glitched arc beats a crashed instrument
//! panel.

/// An arc in degrees. `span` is signed: positive sweeps toward increasing
/// normalized angle (counter-clockwise on screen), negative the other way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub start: f64,
    pub span: f64,
}

/// Convert a clock-convention heading to a math-convention angle in [0,360).
pub fn normalize_heading(heading: i32) -> i32 {
    (-heading + 90).rem_euclid(360)
}

/// Unit-radius endpoint for an indicator line at `heading`. The y component
/// is negated because screen y grows downward; callers scale by their own
/// radius.
pub fn heading_to_unit_vector(heading: i32) -> (f64, f64) {
    let angle = f64::from(normalize_heading(heading)).to_radians();
    (angle.cos(), -angle.sin())
}

/// Arc for the current-direction indicator: the full circle minus a slice of
/// `pie_width` degrees centered on the heading. The pointer is the gap, so
/// the returned span is the large complement, not the slice.
pub fn direction_indicator_arc(heading: i32, pie_width: f64) -> Arc {
    Arc {
        start: wrap_degrees(f64::from(normalize_heading(heading)) + pie_width / 2.0),
        span: 360.0 - pie_width,
    }
}

/// Arcs for the variable-wind band on either side of the mean heading.
///
/// Both deviations arrive as non-negative magnitudes in heading space. After
/// the clock-to-math conversion, "below the heading" sweeps toward increasing
/// normalized angle and "above" toward decreasing, so the two spans get
/// opposite signs regardless of the heading value.
pub fn variability_arcs(
    heading: i32,
    deviation_left: i32,
    deviation_right: i32,
    pie_width: f64,
) -> (Arc, Arc) {
    let mean = f64::from(normalize_heading(heading));
    let left = Arc {
        start: wrap_degrees(mean + pie_width / 2.0),
        span: f64::from(deviation_left),
    };
    let right = Arc {
        start: wrap_degrees(mean - pie_width / 2.0),
        span: -f64::from(deviation_right),
    };
    (left, right)
}

/// Heading-space bounds of the variable-wind band, both wrapped into
/// [0,360). The display layer zero-pads these to three digits.
pub fn variable_wind_band(heading: i32, deviation_left: i32, deviation_right: i32) -> (u16, u16) {
    let lower = (heading - deviation_left).rem_euclid(360) as u16;
    let upper = (heading + deviation_right).rem_euclid(360) as u16;
    (lower, upper)
}

fn wrap_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}
