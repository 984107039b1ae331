//! # Utility Module
//!
//! Numeric helpers shared by the generators.
//!
//! ## Example Function: `round_to`
//!
//! The sampler publishes poses and scales with a fixed number of decimals so
//! the emitted files stay short and diff-friendly. `round_to` rounds half away
//! from zero to the requested number of decimal places.

/// Rounds `value` to `places` decimal places.
///
/// # Examples
///
/// ```
/// use arena_forge::utils::util::round_to;
///
/// assert_eq!(round_to(1.23456, 2), 1.23);
/// assert_eq!(round_to(-7.9999, 3), -8.0);
/// ```
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Formats a value the short way: `3` rather than `3.0`, `0.25` as is.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    format!("{}", value)
}
