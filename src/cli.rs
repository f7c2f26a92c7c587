use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::util;

// mp_oracle reports Oracle Database resource, wait class and wait event metrics to mackerel-agent.
#[derive(Parser, Debug)]
#[command(name = "mp_oracle", version = util::VERSION)]
pub struct Cli {
    /// Optional configuration file (yaml, toml, json...).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Database source name: user/password[@connect_string]. Default: "system/manager"
    #[arg(long)]
    pub dsn: Option<String>,
    /// Metric key prefix. Default: "oracle"
    #[arg(long = "metric-key-prefix")]
    pub metric_key_prefix: Option<String>,
    /// Wait event to report, by name or as /regexp/. Can be repeated.
    #[arg(long = "event", value_name = "NAME")]
    pub events: Vec<String>,
    /// Log at debug level.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            dsn: self.dsn.clone(),
            metric_key_prefix: self.metric_key_prefix.clone(),
            events: self.events.clone(),
            debug: self.debug,
        }
    }
}
