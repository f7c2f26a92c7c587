use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::collectors::{self, Collector, Stat};
use crate::config::Settings;
use crate::error::SourceError;
use crate::graph::{self, GraphDefinition};
use crate::instance::{Database, OracleDB};
use crate::output;

#[derive(Clone)]
pub struct OraclePlugin {
    pub settings: Settings,
    pub collectors: Vec<Box<dyn Collector>>,
}

impl OraclePlugin {
    /// Plugin with the resource, wait class and wait event collectors, merged in that order.
    pub fn new(settings: Settings) -> Self {
        let mut plugin = OraclePlugin {
            collectors: Vec::new(),
            settings,
        };
        plugin.add_collector(Box::new(collectors::ora_resource::new()));
        plugin.add_collector(Box::new(collectors::ora_wait_class::new()));
        plugin.add_collector(Box::new(collectors::ora_wait_event::new(
            plugin.settings.events.clone(),
        )));
        plugin
    }

    pub fn add_collector(&mut self, col: Box<dyn Collector>) {
        self.collectors.push(col);
    }

    pub fn metric_key_prefix(&self) -> &str {
        &self.settings.metric_key_prefix
    }

    pub fn graph_definition(&self) -> GraphDefinition {
        graph::definition(self.metric_key_prefix(), &self.settings.events)
    }

    pub async fn fetch_metrics(&self, db: &dyn Database) -> Result<Stat, SourceError> {
        debug!("events: {}", self.settings.events);
        collectors::collect(&self.collectors, db).await
    }

    /// One collection pass against `db`, values written to `w`.
    /// Nothing is written when a collector fails.
    pub async fn report<W: Write>(
        &self,
        db: &dyn Database,
        w: &mut W,
        now: u64,
    ) -> anyhow::Result<()> {
        let stat = self.fetch_metrics(db).await?;
        output::write_values(
            w,
            self.metric_key_prefix(),
            &self.graph_definition(),
            &stat,
            now,
        )?;
        Ok(())
    }

    /// Entry point of the binary: prints graph metadata when the agent asks
    /// for it, otherwise connects, collects once and prints the values.
    pub async fn run<W: Write>(&self, w: &mut W) -> anyhow::Result<()> {
        if output::meta_requested() {
            return output::write_meta(w, self.metric_key_prefix(), &self.graph_definition());
        }

        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let db = OracleDB::connect(&self.settings.dsn).await?;

        let res = self.report(&db, w, now).await;
        db.close().await;

        res
    }
}
