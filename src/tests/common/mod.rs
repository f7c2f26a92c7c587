use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mp_oracle::config::{PluginConfig, Settings};
use mp_oracle::error::SourceError;
use mp_oracle::instance::{Database, Row, Value};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub fn setup_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

pub fn num(n: f64) -> Value {
    Value::Number(n)
}

/// In-memory database answering by the table the query reads from.
#[derive(Default, Clone)]
pub struct FakeDB {
    results: HashMap<&'static str, Result<Vec<Row>, String>>,
    queries: Arc<Mutex<Vec<&'static str>>>,
}

impl FakeDB {
    /// Canned rows for every query that mentions `view`.
    pub fn with_rows(mut self, view: &'static str, rows: Vec<Vec<Value>>) -> Self {
        self.results
            .insert(view, Ok(rows.into_iter().map(Row::new).collect()));
        self
    }

    pub fn with_failure(mut self, view: &'static str, reason: &str) -> Self {
        self.results.insert(view, Err(reason.to_string()));
        self
    }

    /// Typical answers for all three collectors.
    pub fn populated() -> Self {
        FakeDB::default()
            .with_rows(
                "v$resource_limit",
                vec![
                    vec![text("processes"), num(42.0)],
                    vec![text("sessions"), num(57.0)],
                ],
            )
            .with_rows(
                "v$waitclassmetric",
                vec![
                    vec![text("CPU"), num(0.52)],
                    vec![text("CPU_OS"), num(0.11)],
                    vec![text("Concurrency"), num(0.003)],
                    vec![text("User I/O"), num(0.2)],
                ],
            )
            .with_rows(
                "v$eventmetric",
                vec![
                    vec![text("Commit"), text("log file sync"), num(120.0), num(1.25)],
                    vec![
                        text("User I/O"),
                        text("db file sequential read"),
                        num(300.0),
                        num(0.4),
                    ],
                    vec![text("User I/O"), text("db file scattered read"), num(20.0), num(2.0)],
                    vec![
                        text("Network"),
                        text("SQL*Net message to client"),
                        num(999.0),
                        num(0.001),
                    ],
                ],
            )
    }

    pub fn queries(&self) -> Vec<&'static str> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Database for FakeDB {
    async fn query(&self, sql: &'static str) -> Result<Vec<Row>, SourceError> {
        self.queries.lock().unwrap().push(sql);

        for (view, result) in &self.results {
            if sql.contains(view) {
                return result
                    .clone()
                    .map_err(|reason| SourceError::query("fake", reason));
            }
        }
        Ok(Vec::new())
    }
}

pub fn settings(events: &[&str]) -> Settings {
    let cfg = PluginConfig {
        events: events.iter().map(|e| e.to_string()).collect(),
        ..Default::default()
    };
    Settings::try_from(cfg).expect("settings should be valid")
}
