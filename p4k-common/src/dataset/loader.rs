//! Dataset loading from a local CSV file or an HTTP(S) URL
//!
//! Loading happens once at process start. Any failure here is fatal for the
//! dashboard, so errors are returned to the caller rather than retried.

use reqwest::{header, Client};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use super::Dataset;
use crate::Result;

/// Published Pitchfork summary table (long format)
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/cameron-marsden/pitchfork_analysis/master/p4k_summary_long_format.csv";

/// Default timeout for the dataset download
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("p4k-trends/", env!("CARGO_PKG_VERSION"));

/// Where the review table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// CSV file on local disk
    Path(PathBuf),
    /// CSV served over HTTP(S)
    Url(String),
}

impl DataSource {
    /// Interpret a CLI/TOML value: `http://` and `https://` prefixes select a
    /// download, anything else is a file path.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATA_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Load and decode the review table
pub async fn load_dataset(source: &DataSource, timeout: Duration) -> Result<Dataset> {
    let text = match source {
        DataSource::Path(path) => {
            debug!(path = %path.display(), "Reading dataset from disk");
            tokio::fs::read_to_string(path).await?
        }
        DataSource::Url(url) => fetch_csv(url, timeout).await?,
    };

    let dataset = Dataset::from_csv_str(&text)?;
    info!(
        rows = dataset.len(),
        genres = dataset.genres().len(),
        "Loaded dataset from {}",
        source
    );
    Ok(dataset)
}

/// Download CSV text; non-success statuses are errors
async fn fetch_csv(url: &str, timeout: Duration) -> Result<String> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

    let client = Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?;

    debug!(url = %url, "Fetching dataset");
    let response = client.get(url).send().await?.error_for_status()?;
    let text = response.text().await?;
    debug!(bytes = text.len(), "Dataset download complete");

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;

    #[test]
    fn test_parse_url_source() {
        assert_eq!(
            DataSource::parse("https://example.org/p4k.csv"),
            DataSource::Url("https://example.org/p4k.csv".to_string())
        );
        assert_eq!(
            DataSource::parse(" http://localhost:9000/data.csv "),
            DataSource::Url("http://localhost:9000/data.csv".to_string())
        );
    }

    #[test]
    fn test_parse_path_source() {
        assert_eq!(
            DataSource::parse("/srv/data/p4k.csv"),
            DataSource::Path(PathBuf::from("/srv/data/p4k.csv"))
        );
        assert_eq!(
            DataSource::parse("data.csv"),
            DataSource::Path(PathBuf::from("data.csv"))
        );
    }

    #[test]
    fn test_default_source_is_published_table() {
        assert_eq!(
            DataSource::default(),
            DataSource::Url(DEFAULT_DATA_URL.to_string())
        );
    }

    #[tokio::test]
    async fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Genre,Indicator Name,Year,Value").unwrap();
        writeln!(file, "Rock,Sum of AOTY Points,2003,12").unwrap();
        writeln!(file, "Pop/R&B,Sum of AOTY Points,2003,3").unwrap();
        file.flush().unwrap();

        let source = DataSource::Path(file.path().to_path_buf());
        let dataset = load_dataset(&source, DEFAULT_FETCH_TIMEOUT).await.unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.genres(), &["Rock", "Pop/R&B"]);
    }

    /// Serve a CSV at `/p4k.csv` and a 404 everywhere else; returns the base URL.
    /// The CSV route answers 400 unless the request carries our User-Agent.
    async fn spawn_csv_server() -> String {
        use axum::http::{header::USER_AGENT, HeaderMap, StatusCode};
        use axum::routing::get;

        async fn serve_csv(headers: HeaderMap) -> (StatusCode, &'static str) {
            let agent = headers
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            if !agent.starts_with("p4k-trends/") {
                return (StatusCode::BAD_REQUEST, "missing user agent");
            }
            (
                StatusCode::OK,
                "Genre,Indicator Name,Year,Value\n\
                 Rock,Sum of AOTY Points,2004,15\n\
                 Rock,Sum of AOTY Points,2003,12\n\
                 Jazz,Proportion Genre Given BNM,2003,0.25\n",
            )
        }

        let app = axum::Router::new().route("/p4k.csv", get(serve_csv));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_load_dataset_from_url() {
        let base = spawn_csv_server().await;
        let source = DataSource::parse(&format!("{}/p4k.csv", base));

        let dataset = load_dataset(&source, DEFAULT_FETCH_TIMEOUT).await.unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.genres(), &["Rock", "Jazz"]);
        assert_eq!(dataset.records()[0].year, 2004);
        assert_eq!(dataset.records()[2].value, 0.25);
    }

    #[tokio::test]
    async fn test_load_dataset_http_status_is_error() {
        let base = spawn_csv_server().await;
        let source = DataSource::Url(format!("{}/missing.csv", base));

        let result = load_dataset(&source, DEFAULT_FETCH_TIMEOUT).await;

        match result {
            Err(Error::Http(e)) => {
                assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND));
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_dataset_missing_file_is_io_error() {
        let source = DataSource::Path(PathBuf::from("/nonexistent/p4k-trends/missing.csv"));
        let result = load_dataset(&source, DEFAULT_FETCH_TIMEOUT).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
