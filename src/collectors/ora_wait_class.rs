use async_trait::async_trait;
use tracing::debug;

use crate::error::SourceError;
use crate::instance::{self, Database, FromRow, Row};
use crate::key::MetricKey;

use super::{Collector, Stat};

// Average active sessions per non-idle wait class over the last metric
// interval, plus two pseudo classes: CPU used by the database, and CPU_OS,
// host CPU busy time (scaled by cpu_count) not accounted to the database.
const WAIT_CLASS_QUERY: &str = "SELECT n.wait_class, round(m.time_waited/m.intsize_csec, 3) aas \
    FROM v$waitclassmetric m, v$system_wait_class n \
    WHERE m.wait_class_id = n.wait_class_id AND n.wait_class != 'Idle' \
    UNION \
    SELECT 'CPU', round(value/100, 3) aas \
    FROM v$sysmetric WHERE metric_name = 'CPU Usage Per Sec' AND group_id = 2 \
    UNION \
    SELECT 'CPU_OS', round((prcnt.busy*parameter.cpu_count)/100, 3) - aas.cpu \
    FROM \
      (SELECT value busy FROM v$sysmetric \
        WHERE metric_name = 'Host CPU Utilization (%)' AND group_id = 2) prcnt, \
      (SELECT value cpu_count FROM v$parameter WHERE name = 'cpu_count') parameter, \
      (SELECT round(value/100, 3) cpu FROM v$sysmetric \
        WHERE metric_name = 'CPU Usage Per Sec' AND group_id = 2) aas";

const WAIT_CLASS_COLLECTOR: &str = "waitclass";

#[derive(Debug)]
struct WaitClassRow {
    class: String,
    aas: f64,
}

impl FromRow for WaitClassRow {
    fn from_row(row: &Row) -> Result<Self, String> {
        Ok(WaitClassRow {
            class: row.text(0)?.to_string(),
            aas: row.number(1)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaitClassCollector;

pub fn new() -> WaitClassCollector {
    WaitClassCollector
}

#[async_trait]
impl Collector for WaitClassCollector {
    fn name(&self) -> &'static str {
        WAIT_CLASS_COLLECTOR
    }

    async fn fetch(&self, db: &dyn Database) -> Result<Stat, SourceError> {
        let rows: Vec<WaitClassRow> =
            instance::fetch_all(db, WAIT_CLASS_COLLECTOR, WAIT_CLASS_QUERY).await?;

        let mut stat = Stat::new();
        for r in rows {
            debug!("wait class {}: aas={}", r.class, r.aas);
            stat.insert(MetricKey::normalize(&r.class), r.aas);
        }

        Ok(stat)
    }
}
