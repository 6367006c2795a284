//! Trend selection: one genre's metric over the years
//!
//! Given the review table, a genre and an indicator, produce the ordered
//! (year, value) points plus the two annotation labels a chart shows. This is
//! the whole computation behind a dropdown change; it is pure and idempotent.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::labels::{first_label, last_label, LabelStyle, LabelVariant};
use crate::{Error, Result};

/// A metric plotted by one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Value of the `Indicator Name` column to select
    pub name: String,
    /// Caption shown beside the first point
    pub caption: String,
    /// How values render in labels
    pub label_style: LabelStyle,
}

impl Indicator {
    pub fn new(name: &str, caption: &str, label_style: LabelStyle) -> Self {
        Self {
            name: name.to_string(),
            caption: caption.to_string(),
            label_style,
        }
    }
}

/// One (year, value) sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub year: i32,
    pub value: f64,
}

/// Derived chart data for one (genre, indicator) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub genre: String,
    pub indicator: String,
    /// Sorted by year ascending, never empty
    pub points: Vec<Point>,
    pub first_label: String,
    pub last_label: String,
}

impl Series {
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Select the points for `genre` and `indicator_name`, sorted by year.
///
/// # Errors
/// - `NoData` when the genre is unknown or no row matches the pair
/// - `DuplicateYear` when the same year occurs twice in the selection
pub fn select_points(dataset: &Dataset, genre: &str, indicator_name: &str) -> Result<Vec<Point>> {
    if !dataset.contains_genre(genre) {
        return Err(Error::no_data(genre, indicator_name));
    }

    let mut points: Vec<Point> = dataset
        .rows_for(genre, indicator_name)
        .map(|r| Point {
            year: r.year,
            value: r.value,
        })
        .collect();

    if points.is_empty() {
        return Err(Error::no_data(genre, indicator_name));
    }

    // Stable: equal years keep source order, which only matters for the error below
    points.sort_by_key(|p| p.year);

    if let Some(pair) = points.windows(2).find(|w| w[0].year == w[1].year) {
        return Err(Error::DuplicateYear {
            genre: genre.to_string(),
            indicator: indicator_name.to_string(),
            year: pair[0].year,
        });
    }

    Ok(points)
}

/// Compute the points and annotation labels for one chart.
///
/// # Examples
///
/// ```
/// use p4k_common::dataset::{Dataset, ReviewRecord};
/// use p4k_common::labels::{LabelStyle, LabelVariant};
/// use p4k_common::trends::{compute_series, Indicator};
///
/// let dataset = Dataset::new(vec![
///     ReviewRecord::new("Rock", "Sum of AOTY Points", 2003, 12.0),
///     ReviewRecord::new("Rock", "Sum of AOTY Points", 2004, 15.0),
///     ReviewRecord::new("Rock", "Sum of AOTY Points", 2005, 9.0),
/// ])
/// .unwrap();
/// let indicator = Indicator::new("Sum of AOTY Points", "AOTY Points", LabelStyle::Points);
///
/// let series = compute_series(&dataset, "Rock", &indicator, LabelVariant::Caption).unwrap();
/// assert_eq!(series.years(), vec![2003, 2004, 2005]);
/// assert_eq!(series.first_label, "AOTY Points");
/// assert_eq!(series.last_label, "9");
/// ```
pub fn compute_series(
    dataset: &Dataset,
    genre: &str,
    indicator: &Indicator,
    variant: LabelVariant,
) -> Result<Series> {
    let points = select_points(dataset, genre, &indicator.name)?;

    let first = points[0];
    let last = points[points.len() - 1];

    Ok(Series {
        genre: genre.to_string(),
        indicator: indicator.name.clone(),
        first_label: first_label(&indicator.caption, variant, indicator.label_style, first.value),
        last_label: last_label(indicator.label_style, last.value),
        points,
    })
}
