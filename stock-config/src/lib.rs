//! Typed settings for indicator defaults and logging.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use stock_engine::ChandelierParams;
use tracing_subscriber::EnvFilter;

/// Prefix for environment overrides, e.g. `STOCK_INDICATORS__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "STOCK_INDICATORS";

const ENV_SEPARATOR: &str = "__";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Settings {
    pub indicators: IndicatorDefaults,
    pub logging: LogSettings,
}

/// Parameters used when callers do not pick their own.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct IndicatorDefaults {
    pub sma_lookback_periods: usize,
    pub chandelier: ChandelierParams,
}

impl Default for IndicatorDefaults {
    fn default() -> Self {
        Self {
            sma_lookback_periods: 20,
            chandelier: ChandelierParams::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Renders the settings as a TOML document.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to render settings as TOML")
    }
}

/// Loads settings from built-in defaults, an optional TOML file, then the environment.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let mut builder = Config::builder()
        .add_source(Config::try_from(&Settings::default()).context("invalid default settings")?);
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let settings: Settings = builder
        .build()
        .context("failed to load configuration sources")?
        .try_deserialize()
        .context("failed to deserialize settings")?;
    settings
        .indicators
        .chandelier
        .validate()
        .context("invalid chandelier defaults")?;
    Ok(settings)
}

/// Installs the global tracing subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed.
pub fn init_tracing(settings: &LogSettings) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)
            .with_context(|| format!("invalid log filter '{}'", settings.level))?,
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if settings.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    Ok(installed)
}
