use clap::Parser;
use tracing::{error, info};

use mp_oracle::app::OraclePlugin;
use mp_oracle::cli::Cli;
use mp_oracle::config::{PluginConfig, Settings};
use mp_oracle::{logger_init, util};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let cfg = match PluginConfig::load(cli.config.as_deref(), cli.overrides()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("mp_oracle: load config: {e}");
            std::process::exit(1);
        }
    };

    logger_init(cfg.debug);
    info!("mp_oracle {}", util::version());

    let settings = match Settings::try_from(cfg) {
        Ok(settings) => settings,
        Err(e) => {
            error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let plugin = OraclePlugin::new(settings);
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = plugin.run(&mut stdout).await {
        error!("fetch metrics: {:#}", e);
        std::process::exit(1);
    }
}
