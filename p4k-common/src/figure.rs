//! Figure descriptions for the browser plotting library
//!
//! A `Figure` serializes to the `{ data, layout }` JSON object the UI hands
//! straight to Plotly. One spline trace per chart; the first and last points
//! are labelled with paper-anchored annotations in the left and right margins.

use serde::{Deserialize, Serialize};

use crate::trends::Series;

const ANNOTATION_FONT_FAMILY: &str = "Arial";
const ANNOTATION_FONT_SIZE: u32 = 16;

/// Complete chart description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One plotted line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub x: Vec<i32>,
    pub y: Vec<f64>,
    pub mode: String,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub width: u32,
    pub shape: String,
    pub smoothing: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub height: u32,
    pub margin: Margin,
    pub annotations: Vec<Annotation>,
    pub yaxis: Axis,
    pub xaxis: Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub b: u32,
    pub r: u32,
    pub t: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub xref: String,
    pub x: f64,
    pub y: f64,
    pub xanchor: String,
    pub yanchor: String,
    pub text: String,
    pub font: Font,
    pub showarrow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: u32,
}

/// Axis options; unset options are left to the plotting library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default)]
    pub showgrid: bool,
    #[serde(default)]
    pub showline: bool,
    #[serde(default)]
    pub zeroline: bool,
    #[serde(default = "default_true")]
    pub fixedrange: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoverformat: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Per-chart styling, configurable from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// CSS color of the line
    pub color: String,
    #[serde(default = "default_height")]
    pub height: u32,
    pub margin: Margin,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

fn default_height() -> u32 {
    300
}

impl ChartStyle {
    /// Style of the AOTY points chart: tickless x axis line across the top chart
    pub fn points_default() -> Self {
        Self {
            color: "rgba(124, 124, 254, 1)".to_string(),
            height: default_height(),
            margin: Margin { l: 200, b: 20, r: 50, t: 20 },
            xaxis: Axis {
                showline: true,
                fixedrange: true,
                showticklabels: Some(false),
                ticks: Some(String::new()),
                ..Axis::default()
            },
            yaxis: hidden_value_axis(),
        }
    }

    /// Style of the BNM proportion chart: yearly angled ticks, percent hover
    pub fn proportion_default() -> Self {
        Self {
            color: "rgba(124, 124, 124, 1)".to_string(),
            height: default_height(),
            margin: Margin { l: 200, b: 50, r: 50, t: 0 },
            xaxis: Axis {
                fixedrange: true,
                ticks: Some("outside".to_string()),
                tickangle: Some(-45),
                dtick: Some(1.0),
                ..Axis::default()
            },
            yaxis: Axis {
                hoverformat: Some(",.0%".to_string()),
                ..hidden_value_axis()
            },
        }
    }
}

fn hidden_value_axis() -> Axis {
    Axis {
        fixedrange: true,
        showticklabels: Some(false),
        ..Axis::default()
    }
}

fn annotation(x: f64, y: f64, xanchor: &str, text: &str) -> Annotation {
    Annotation {
        xref: "paper".to_string(),
        x,
        y,
        xanchor: xanchor.to_string(),
        yanchor: "middle".to_string(),
        text: text.to_string(),
        font: Font {
            family: ANNOTATION_FONT_FAMILY.to_string(),
            size: ANNOTATION_FONT_SIZE,
        },
        showarrow: false,
    }
}

/// Build the figure for a computed series.
///
/// An empty series yields a figure with no annotations; `compute_series`
/// never produces one.
pub fn build_figure(series: &Series, style: &ChartStyle) -> Figure {
    let mut annotations = Vec::with_capacity(2);
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        annotations.push(annotation(0.0, first.value, "right", &series.first_label));
        annotations.push(annotation(1.0, last.value, "left", &series.last_label));
    }

    Figure {
        data: vec![Trace {
            x: series.years(),
            y: series.values(),
            mode: "lines".to_string(),
            line: Line {
                width: 3,
                shape: "spline".to_string(),
                smoothing: 0.3,
                color: style.color.clone(),
            },
        }],
        layout: Layout {
            height: style.height,
            margin: style.margin,
            annotations,
            yaxis: style.yaxis.clone(),
            xaxis: style.xaxis.clone(),
        },
    }
}
