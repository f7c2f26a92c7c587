pub mod oracle;

use async_trait::async_trait;

use crate::error::SourceError;

pub use self::oracle::OracleDB;

/// Column value as returned by a diagnostic query.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Null,
}

/// One result row, columns in select-list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<Value>,
}

impl Row {
    pub fn new(columns: Vec<Value>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn text(&self, idx: usize) -> Result<&str, String> {
        match self.columns.get(idx) {
            Some(Value::Text(s)) => Ok(s),
            Some(other) => Err(format!("column {idx}: expected text, got {other:?}")),
            None => Err(format!(
                "column {idx}: out of range ({} columns)",
                self.len()
            )),
        }
    }

    pub fn number(&self, idx: usize) -> Result<f64, String> {
        match self.columns.get(idx) {
            Some(Value::Number(n)) => Ok(*n),
            Some(other) => Err(format!("column {idx}: expected number, got {other:?}")),
            None => Err(format!(
                "column {idx}: out of range ({} columns)",
                self.len()
            )),
        }
    }
}

/// Typed view of a query row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, String>;
}

/// Read-only query surface the collectors run against.
#[async_trait]
pub trait Database: Send + Sync {
    async fn query(&self, sql: &'static str) -> Result<Vec<Row>, SourceError>;
}

/// Runs `sql` and decodes every row as `T`.
pub async fn fetch_all<T: FromRow>(
    db: &dyn Database,
    collector: &'static str,
    sql: &'static str,
) -> Result<Vec<T>, SourceError> {
    // Driver errors are reported under the collector that ran the query.
    let rows = db.query(sql).await.map_err(|e| match e {
        SourceError::Query { reason, .. } => SourceError::query(collector, reason),
        SourceError::Decode { reason, .. } => SourceError::decode(collector, reason),
        other => other,
    })?;

    rows.iter()
        .map(|row| T::from_row(row).map_err(|reason| SourceError::decode(collector, reason)))
        .collect()
}
