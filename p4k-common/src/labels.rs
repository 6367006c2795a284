//! Chart annotation label formatting
//!
//! Each chart carries two annotations: a caption beside the first point and
//! the final value beside the last point. How a value renders depends on the
//! indicator: AOTY points print as a whole number, BNM proportions as a
//! percentage.

use serde::{Deserialize, Serialize};

/// How a single value renders in a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// Whole number, fraction truncated (`15.8` → `"15"`)
    Points,
    /// Fraction as percent, rounded half to even (`0.2345` → `"23%"`)
    Percent,
}

impl LabelStyle {
    pub fn format(&self, value: f64) -> String {
        match self {
            LabelStyle::Points => format_points(value),
            LabelStyle::Percent => format_percent(value),
        }
    }
}

/// What the first-point label shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelVariant {
    /// Caption only (`"AOTY Points"`)
    #[default]
    Caption,
    /// Caption followed by the first value (`"AOTY Points 12"`)
    CaptionWithValue,
}

/// Format a points value as a whole number.
///
/// The fraction is truncated toward zero, matching an integer cast.
///
/// # Examples
///
/// ```
/// use p4k_common::labels::format_points;
///
/// assert_eq!(format_points(9.0), "9");
/// assert_eq!(format_points(15.8), "15");
/// ```
pub fn format_points(value: f64) -> String {
    let whole = value.trunc() as i64;
    whole.to_string()
}

/// Format a proportion in [0, 1] as a rounded percentage.
///
/// Halves round to the even integer, so 12.5% renders as `"12%"`.
///
/// # Examples
///
/// ```
/// use p4k_common::labels::format_percent;
///
/// assert_eq!(format_percent(0.2345), "23%");
/// assert_eq!(format_percent(0.5), "50%");
/// assert_eq!(format_percent(0.125), "12%");
/// ```
pub fn format_percent(value: f64) -> String {
    let percent = (value * 100.0).round_ties_even() as i64;
    format!("{}%", percent)
}

/// Label for the leftmost point
pub fn first_label(caption: &str, variant: LabelVariant, style: LabelStyle, value: f64) -> String {
    match variant {
        LabelVariant::Caption => caption.to_string(),
        LabelVariant::CaptionWithValue => format!("{} {}", caption, style.format(value)),
    }
}

/// Label for the rightmost point
pub fn last_label(style: LabelStyle, value: f64) -> String {
    style.format(value)
}
