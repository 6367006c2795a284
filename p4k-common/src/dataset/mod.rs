//! Review dataset: the read-only in-memory table behind every chart
//!
//! One row per (Genre, Indicator Name, Year) with a numeric Value. The table is
//! built once at startup and never mutated; handlers share it behind an `Arc`.

pub mod loader;

pub use loader::{load_dataset, DataSource, DEFAULT_DATA_URL, DEFAULT_FETCH_TIMEOUT};

use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::{Error, Result};

/// Column headers the source CSV must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["Genre", "Indicator Name", "Year", "Value"];

/// One row of the source table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "Genre")]
    pub genre: String,

    #[serde(rename = "Indicator Name")]
    pub indicator_name: String,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Value")]
    pub value: f64,
}

impl ReviewRecord {
    pub fn new(genre: &str, indicator_name: &str, year: i32, value: f64) -> Self {
        Self {
            genre: genre.to_string(),
            indicator_name: indicator_name.to_string(),
            year,
            value,
        }
    }
}

/// Read-only review table
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ReviewRecord>,
    /// Distinct genres in first-seen order
    genres: Vec<String>,
}

impl Dataset {
    /// Build a dataset from already-decoded records
    ///
    /// Fails with `InvalidData` when `records` is empty or a value is NaN or
    /// infinite.
    pub fn new(records: Vec<ReviewRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::InvalidData("dataset contains no rows".to_string()));
        }

        if let Some(record) = records.iter().find(|r| !r.value.is_finite()) {
            return Err(Error::InvalidData(format!(
                "non-finite value {} for genre '{}', indicator '{}', year {}",
                record.value, record.genre, record.indicator_name, record.year
            )));
        }

        let mut genres: Vec<String> = Vec::new();
        for record in &records {
            if !genres.iter().any(|g| g == &record.genre) {
                genres.push(record.genre.clone());
            }
        }

        Ok(Self { records, genres })
    }

    /// Decode a CSV stream with a header row
    ///
    /// Columns are matched by header name, so column order is free and extra
    /// columns are ignored. A missing required column is reported by name
    /// before any row is decoded.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::InvalidData(format!("missing column '{}'", column)));
            }
        }

        let records = csv_reader
            .deserialize::<ReviewRecord>()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        Self::new(records)
    }

    /// Decode CSV text already held in memory
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// All rows in source order
    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    /// Distinct genres in first-seen order
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn contains_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Distinct indicator names in first-seen order
    pub fn indicators(&self) -> Vec<&str> {
        let mut indicators: Vec<&str> = Vec::new();
        for record in &self.records {
            if !indicators.contains(&record.indicator_name.as_str()) {
                indicators.push(&record.indicator_name);
            }
        }
        indicators
    }

    /// Rows matching both `genre` and `indicator`, in source order
    pub fn rows_for<'a>(
        &'a self,
        genre: &'a str,
        indicator: &'a str,
    ) -> impl Iterator<Item = &'a ReviewRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.genre == genre && r.indicator_name == indicator)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
