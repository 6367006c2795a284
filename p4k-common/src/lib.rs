//! # p4k-common
//!
//! Shared code for the genre trends dashboard:
//! - Review dataset model and CSV loading
//! - Trend selection (per-genre series and annotation labels)
//! - Figure descriptions for the browser plotting library
//! - Configuration loading
//! - API request/response types

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod labels;
pub mod trends;

pub use dataset::{Dataset, ReviewRecord};
pub use error::{Error, Result};
pub use trends::{compute_series, Series};
