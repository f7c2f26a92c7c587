use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub mod app;
pub mod cli;
pub mod collectors;
pub mod config;
pub mod error;
pub mod graph;
pub mod instance;
pub mod key;
pub mod output;
pub mod selector;
pub mod util;

/// Installs the global subscriber. Logs go to stderr: stdout belongs to mackerel-agent.
pub fn logger_init(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}
