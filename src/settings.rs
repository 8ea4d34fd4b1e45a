//! Layered settings: built-in defaults, an optional settings file, then
//! `FLEXRECORD__SECTION__KEY` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::present::Presentation;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub presentation: Presentation,
    pub logging: Logging,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// An `EnvFilter` directive such as `flexrecord=debug`.
    pub filter: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Settings> {
        let mut builder = Config::builder()
            .set_default("presentation.indent", 2_i64)?
            .set_default("presentation.header", true)?
            .set_default("logging.filter", "warn")?;
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        let config = builder
            .add_source(Environment::with_prefix("FLEXRECORD").separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize::<Settings>()?)
    }
    /// Installs a fmt subscriber filtered by `logging.filter`. Does nothing when
    /// a global subscriber is already set.
    pub fn init_tracing(&self) {
        let filter =
            EnvFilter::try_new(&self.logging.filter).unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
