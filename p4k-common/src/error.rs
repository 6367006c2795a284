//! Common error types for the genre trends dashboard

use thiserror::Error;

/// Common result type for dashboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the library and the dashboard service
#[derive(Error, Debug)]
pub enum Error {
    /// No rows matched the requested (genre, indicator) pair
    #[error("No data for genre '{genre}' and indicator '{indicator}'")]
    NoData { genre: String, indicator: String },

    /// The same year appeared twice within one (genre, indicator) series
    #[error("Duplicate year {year} for genre '{genre}' and indicator '{indicator}'")]
    DuplicateYear {
        genre: String,
        indicator: String,
        year: i32,
    },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset download error (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dataset content is unusable (missing columns, unparsable cells, empty)
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Build a `NoData` error for a (genre, indicator) pair
    pub fn no_data(genre: &str, indicator: &str) -> Self {
        Error::NoData {
            genre: genre.to_string(),
            indicator: indicator.to_string(),
        }
    }
}
