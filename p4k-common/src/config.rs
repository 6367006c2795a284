//! Configuration loading and resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: the dashboard starts on compiled
//! defaults. A config file that exists but does not parse is an error.
//! Resolution runs before logging is initialized and does not log. The chosen
//! file is recorded in `DashboardConfig::config_file` for the caller to report.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dataset::{DataSource, DEFAULT_FETCH_TIMEOUT};
use crate::figure::ChartStyle;
use crate::labels::{LabelStyle, LabelVariant};
use crate::trends::Indicator;
use crate::{Error, Result};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8050;

/// Default bind address (loopback only)
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// Genre selected when the page first loads
pub const DEFAULT_GENRE: &str = "Rock";

/// Default log filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Indicator name of the AOTY points rows
pub const AOTY_POINTS_INDICATOR: &str = "Sum of AOTY Points";

/// Indicator name of the Best New Music proportion rows
pub const BNM_PROPORTION_INDICATOR: &str = "Proportion Genre Given BNM";

pub const ENV_PORT: &str = "P4K_PORT";
pub const ENV_BIND_ADDRESS: &str = "P4K_BIND_ADDRESS";
pub const ENV_DATA_SOURCE: &str = "P4K_DATA_SOURCE";
pub const ENV_DEFAULT_GENRE: &str = "P4K_DEFAULT_GENRE";
pub const ENV_LOG_LEVEL: &str = "P4K_LOG_LEVEL";

const CONFIG_DIR_NAME: &str = "p4k-trends";
const CONFIG_FILE_NAME: &str = "config.toml";

/// One chart on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDefinition {
    /// Identifier used in API paths (`/api/figures/:id`)
    pub id: String,
    /// Value of the `Indicator Name` column to plot
    pub indicator: String,
    /// Caption beside the first point
    pub caption: String,
    pub label_style: LabelStyle,
    /// Styling; defaults follow `label_style` when omitted
    #[serde(default)]
    pub style: Option<ChartStyle>,
}

impl ChartDefinition {
    pub fn new(id: &str, indicator: &str, caption: &str, label_style: LabelStyle) -> Self {
        Self {
            id: id.to_string(),
            indicator: indicator.to_string(),
            caption: caption.to_string(),
            label_style,
            style: None,
        }
    }

    pub fn to_indicator(&self) -> Indicator {
        Indicator::new(&self.indicator, &self.caption, self.label_style)
    }

    pub fn style(&self) -> ChartStyle {
        match &self.style {
            Some(style) => style.clone(),
            None => match self.label_style {
                LabelStyle::Points => ChartStyle::points_default(),
                LabelStyle::Percent => ChartStyle::proportion_default(),
            },
        }
    }
}

/// The two charts of the stock dashboard
pub fn default_charts() -> Vec<ChartDefinition> {
    vec![
        ChartDefinition::new(
            "aoty-points",
            AOTY_POINTS_INDICATOR,
            "AOTY Points",
            LabelStyle::Points,
        ),
        ChartDefinition::new(
            "bnm-proportion",
            BNM_PROPORTION_INDICATOR,
            "BNM Proportion",
            LabelStyle::Percent,
        ),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `tracing_subscriber::EnvFilter` expression)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Configuration file contents; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    /// File path or http(s) URL of the review CSV
    pub data_source: Option<String>,
    pub default_genre: Option<String>,
    pub label_variant: Option<LabelVariant>,
    pub fetch_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Replaces the stock charts when non-empty
    #[serde(default)]
    pub charts: Vec<ChartDefinition>,
}

impl TomlConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        toml::from_str(&text)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }
}

/// Locate the config file when none was given explicitly
///
/// Looks in the user config directory first, then `/etc` on Linux.
pub fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Load the TOML layer
///
/// An explicit path must exist. Without one, a missing file falls back to
/// defaults.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    Ok(load_toml_layer(explicit)?.0)
}

/// Load the TOML layer and report which file supplied it
fn load_toml_layer(explicit: Option<&Path>) -> Result<(TomlConfig, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    match path {
        Some(path) => Ok((TomlConfig::load(&path)?, Some(path))),
        None => Ok((TomlConfig::default(), None)),
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub data_source: Option<String>,
    pub default_genre: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub bind_address: String,
    pub port: u16,
    pub data_source: DataSource,
    pub default_genre: String,
    pub label_variant: LabelVariant,
    pub fetch_timeout: Duration,
    pub log_level: String,
    pub charts: Vec<ChartDefinition>,
    /// TOML file the settings were read from; `None` means compiled defaults
    pub config_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            data_source: DataSource::default(),
            default_genre: DEFAULT_GENRE.to_string(),
            label_variant: LabelVariant::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            charts: default_charts(),
            config_file: None,
        }
    }
}

impl DashboardConfig {
    /// Resolve from the command line, the process environment and the TOML file
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let (toml, config_file) = load_toml_layer(cli.config_path.as_deref())?;
        let mut config = Self::from_sources(cli, toml, |key| std::env::var(key).ok())?;
        config.config_file = config_file;
        Ok(config)
    }

    /// Resolve from explicit sources; `env` looks up an environment variable
    pub fn from_sources<F>(cli: &CliOverrides, toml: TomlConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_port = match env(ENV_PORT) {
            Some(value) => Some(value.trim().parse::<u16>().map_err(|e| {
                Error::Config(format!("{}='{}' is not a valid port: {}", ENV_PORT, value, e))
            })?),
            None => None,
        };

        let port = cli.port.or(env_port).or(toml.port).unwrap_or(DEFAULT_PORT);

        let bind_address = cli
            .bind_address
            .clone()
            .or_else(|| env(ENV_BIND_ADDRESS))
            .or(toml.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let data_source = cli
            .data_source
            .clone()
            .or_else(|| env(ENV_DATA_SOURCE))
            .or(toml.data_source)
            .map(|s| DataSource::parse(&s))
            .unwrap_or_default();

        let default_genre = cli
            .default_genre
            .clone()
            .or_else(|| env(ENV_DEFAULT_GENRE))
            .or(toml.default_genre)
            .unwrap_or_else(|| DEFAULT_GENRE.to_string());

        let log_level = cli
            .log_level
            .clone()
            .or_else(|| env(ENV_LOG_LEVEL))
            .unwrap_or(toml.logging.level);

        let charts = if toml.charts.is_empty() {
            default_charts()
        } else {
            toml.charts
        };

        let config = Self {
            bind_address,
            port,
            data_source,
            default_genre,
            label_variant: toml.label_variant.unwrap_or_default(),
            fetch_timeout: toml
                .fetch_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_FETCH_TIMEOUT),
            log_level,
            charts,
            config_file: None,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.default_genre.trim().is_empty() {
            return Err(Error::Config("default_genre must not be empty".to_string()));
        }
        if self.fetch_timeout.is_zero() {
            return Err(Error::Config("fetch_timeout_secs must be positive".to_string()));
        }

        for (i, chart) in self.charts.iter().enumerate() {
            if chart.id.trim().is_empty() {
                return Err(Error::Config(format!("chart #{} has an empty id", i + 1)));
            }
            if chart.indicator.trim().is_empty() {
                return Err(Error::Config(format!(
                    "chart '{}' has an empty indicator",
                    chart.id
                )));
            }
            if self.charts[..i].iter().any(|c| c.id == chart.id) {
                return Err(Error::Config(format!("duplicate chart id '{}'", chart.id)));
            }
        }

        Ok(())
    }

    /// Look up a chart by id
    pub fn chart(&self, id: &str) -> Option<&ChartDefinition> {
        self.charts.iter().find(|c| c.id == id)
    }

    /// `host:port` string for the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
