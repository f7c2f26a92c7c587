use async_trait::async_trait;
use tracing::debug;

use crate::error::SourceError;
use crate::instance::{self, Database, FromRow, Row};
use crate::key::MetricKey;

use super::{Collector, Stat};

const RESOURCE_QUERY: &str = "SELECT resource_name, current_utilization \
    FROM v$resource_limit \
    WHERE resource_name = 'processes' OR resource_name = 'sessions'";

const RESOURCE_COLLECTOR: &str = "resource";

#[derive(Debug)]
struct ResourceRow {
    name: String,
    current: f64,
}

impl FromRow for ResourceRow {
    fn from_row(row: &Row) -> Result<Self, String> {
        Ok(ResourceRow {
            name: row.text(0)?.to_string(),
            current: row.number(1)?,
        })
    }
}

/// Current utilization of the `processes` and `sessions` resource limits.
#[derive(Debug, Clone, Default)]
pub struct ResourceCollector;

pub fn new() -> ResourceCollector {
    ResourceCollector
}

#[async_trait]
impl Collector for ResourceCollector {
    fn name(&self) -> &'static str {
        RESOURCE_COLLECTOR
    }

    async fn fetch(&self, db: &dyn Database) -> Result<Stat, SourceError> {
        let rows: Vec<ResourceRow> =
            instance::fetch_all(db, RESOURCE_COLLECTOR, RESOURCE_QUERY).await?;

        let mut stat = Stat::new();
        for r in rows {
            debug!("resource {}: current={}", r.name, r.current);
            stat.insert(MetricKey::normalize(&r.name), r.current);
        }

        Ok(stat)
    }
}
