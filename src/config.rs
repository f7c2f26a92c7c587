use ::config::{Config, Environment, File, Map};
use std::path::Path;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::instance::oracle::Dsn;
use crate::selector::WaitEventNames;

pub const DEFAULT_DSN: &str = "system/manager";
pub const DEFAULT_PREFIX: &str = "oracle";

/// Raw plugin configuration, as merged from the config file, the
/// environment (prefix `MPORACLE`) and command-line overrides.
#[derive(Debug, Clone, serde_derive::Deserialize, PartialEq, Eq)]
pub struct PluginConfig {
    pub dsn: String,
    pub metric_key_prefix: String,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub debug: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            dsn: DEFAULT_DSN.to_string(),
            metric_key_prefix: DEFAULT_PREFIX.to_string(),
            events: Vec::new(),
            debug: false,
        }
    }
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dsn: Option<String>,
    pub metric_key_prefix: Option<String>,
    pub events: Vec<String>,
    pub debug: bool,
}

const ENV_PREFIX: &str = "MPORACLE";

impl PluginConfig {
    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, overrides, None)
    }

    /// Like `load`, reading `MPORACLE_*` from `env` instead of the process
    /// environment when it is given.
    pub fn load_with_env(
        config_path: Option<&Path>,
        overrides: Overrides,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("dsn", DEFAULT_DSN)?
            .set_default("metric_key_prefix", DEFAULT_PREFIX)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            // Eg. `MPORACLE_DSN=scott/tiger@db/ORCL mp_oracle` sets `dsn`,
            // `MPORACLE_EVENTS="log file sync,db file sequential read"` sets `events`.
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("events")
                    .source(env),
            )
            .set_override_option("dsn", overrides.dsn)?
            .set_override_option("metric_key_prefix", overrides.metric_key_prefix)?
            .build()?;

        let mut cfg: PluginConfig = settings.try_deserialize()?;

        // --event adds to the events listed in the config file.
        cfg.events.extend(overrides.events);
        cfg.debug |= overrides.debug;

        Ok(cfg)
    }
}

/// Validated configuration, built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    pub dsn: Dsn,
    pub metric_key_prefix: String,
    pub events: Arc<WaitEventNames>,
}

impl TryFrom<PluginConfig> for Settings {
    type Error = ConfigError;

    fn try_from(cfg: PluginConfig) -> Result<Self, Self::Error> {
        let mut events = WaitEventNames::new();
        for e in &cfg.events {
            events.add(e)?;
        }

        let metric_key_prefix = if cfg.metric_key_prefix.is_empty() {
            DEFAULT_PREFIX.to_string()
        } else {
            cfg.metric_key_prefix
        };

        Ok(Settings {
            dsn: cfg.dsn.parse()?,
            metric_key_prefix,
            events: Arc::new(events),
        })
    }
}
