use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::SourceError;
use crate::instance::{self, Database, FromRow, Row};
use crate::key::MetricKey;
use crate::selector::WaitEventNames;

use super::{Collector, Stat};

// avgms: average wait in milliseconds (time_waited is in centiseconds).
const WAIT_EVENT_QUERY: &str = "SELECT \
      n.wait_class wait_class, \
      n.name wait_name, \
      m.wait_count cnt, \
      round(10*m.time_waited/nullif(m.wait_count, 0), 3) avgms \
    FROM v$eventmetric m, v$event_name n \
    WHERE m.event_id = n.event_id \
      AND n.wait_class <> 'Idle' AND m.wait_count > 0 \
    ORDER BY 1";

const WAIT_EVENT_COLLECTOR: &str = "waitevent";

pub const COUNT_SUFFIX: &str = "_count";
pub const LATENCY_SUFFIX: &str = "_latency";

#[derive(Debug)]
struct WaitEventRow {
    class: String,
    name: String,
    count: f64,
    latency: f64,
}

impl FromRow for WaitEventRow {
    fn from_row(row: &Row) -> Result<Self, String> {
        Ok(WaitEventRow {
            class: row.text(0)?.to_string(),
            name: row.text(1)?.to_string(),
            count: row.number(2)?,
            latency: row.number(3)?,
        })
    }
}

/// Count and average latency of the wait events picked by `--event`.
#[derive(Debug, Clone)]
pub struct WaitEventCollector {
    events: Arc<WaitEventNames>,
}

pub fn new(events: Arc<WaitEventNames>) -> WaitEventCollector {
    WaitEventCollector { events }
}

#[async_trait]
impl Collector for WaitEventCollector {
    fn name(&self) -> &'static str {
        WAIT_EVENT_COLLECTOR
    }

    async fn fetch(&self, db: &dyn Database) -> Result<Stat, SourceError> {
        let mut stat = Stat::new();

        // The event metric query is the expensive one; skip it when nothing was asked for.
        if self.events.is_empty() {
            return Ok(stat);
        }

        let rows: Vec<WaitEventRow> =
            instance::fetch_all(db, WAIT_EVENT_COLLECTOR, WAIT_EVENT_QUERY).await?;

        for r in rows {
            info!(
                "Event {}.{}: count={}, latency={}",
                r.class, r.name, r.count, r.latency
            );
            if self.events.matches(&r.name) {
                let key = MetricKey::normalize(&r.name);
                stat.insert(key.with_suffix(COUNT_SUFFIX), r.count);
                stat.insert(key.with_suffix(LATENCY_SUFFIX), r.latency);
            }
        }

        Ok(stat)
    }
}
