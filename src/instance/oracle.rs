use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use ::oracle::Connection;
use ::oracle::sql_type::OracleType;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{Database, Row, Value};
use crate::error::{ConfigError, SourceError};

const DRIVER: &str = "oracle";

/// `user/password[@connect_string]`. Without a connect string the driver
/// falls back to the local instance (ORACLE_SID / TWO_TASK).
#[derive(Clone, PartialEq, Eq)]
pub struct Dsn {
    pub user: String,
    pub password: String,
    pub connect_string: String,
}

impl FromStr for Dsn {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Passwords may contain '@'; the connect string follows the last one.
        let (credentials, connect_string) = match s.rsplit_once('@') {
            Some((credentials, connect_string)) => (credentials, connect_string),
            None => (s, ""),
        };

        let Some((user, password)) = credentials.split_once('/') else {
            return Err(ConfigError::Dsn(
                "expected user/password[@connect_string]".to_string(),
            ));
        };

        if user.is_empty() {
            return Err(ConfigError::Dsn("user must not be empty".to_string()));
        }

        Ok(Dsn {
            user: user.to_string(),
            password: password.to_string(),
            connect_string: connect_string.to_string(),
        })
    }
}

// Keeps the password out of logs.
impl fmt::Debug for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dsn")
            .field("user", &self.user)
            .field("password", &"***")
            .field("connect_string", &self.connect_string)
            .finish()
    }
}

/// Connection scoped to one collection cycle.
///
/// The driver is blocking, so every call goes through `spawn_blocking`.
#[derive(Clone)]
pub struct OracleDB {
    conn: Arc<Mutex<Connection>>,
}

impl OracleDB {
    pub async fn connect(dsn: &Dsn) -> Result<OracleDB, SourceError> {
        let dsn = dsn.clone();
        let target = format!("{}@{}", dsn.user, dsn.connect_string);

        let conn = tokio::task::spawn_blocking(move || {
            Connection::connect(&dsn.user, &dsn.password, &dsn.connect_string)
                .map_err(|e| SourceError::Connect(e.to_string()))
        })
        .await
        .map_err(|e| SourceError::Connect(format!("internal error: {e:?}")))??;

        info!("connected to {}", target);

        Ok(OracleDB {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Closes the session. Failures are logged only; the cycle result stands.
    pub async fn close(self) {
        let conn = self.conn;
        let res = tokio::task::spawn_blocking(move || -> Result<(), String> {
            let conn = conn
                .lock()
                .map_err(|e| format!("can't acquire connection lock: {e}"))?;
            conn.close().map_err(|e| e.to_string())
        })
        .await;

        match res {
            Ok(Ok(())) => debug!("connection closed"),
            Ok(Err(e)) => warn!("close connection: {}", e),
            Err(e) => warn!("close connection: internal error: {:?}", e),
        }
    }
}

#[async_trait]
impl Database for OracleDB {
    async fn query(&self, sql: &'static str) -> Result<Vec<Row>, SourceError> {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || -> Result<Vec<Row>, SourceError> {
            let conn = conn.lock().map_err(|e| {
                SourceError::query(DRIVER, format!("can't acquire connection lock: {e}"))
            })?;

            let rows = conn.query(sql, &[]).map_err(|e| SourceError::query(DRIVER, e))?;

            let mut result = Vec::new();
            for row in rows {
                let row = row.map_err(|e| SourceError::query(DRIVER, e))?;
                result.push(decode_row(&row).map_err(|e| SourceError::decode(DRIVER, e))?);
            }
            Ok(result)
        })
        .await
        .map_err(|e| SourceError::query(DRIVER, format!("internal error: {e:?}")))?
    }
}

fn decode_row(row: &::oracle::Row) -> Result<Row, ::oracle::Error> {
    let mut columns = Vec::with_capacity(row.column_info().len());

    for (idx, info) in row.column_info().iter().enumerate() {
        let value = match info.oracle_type() {
            OracleType::Number(_, _)
            | OracleType::Float(_)
            | OracleType::BinaryFloat
            | OracleType::BinaryDouble => row
                .get::<usize, Option<f64>>(idx)?
                .map_or(Value::Null, Value::Number),
            _ => row
                .get::<usize, Option<String>>(idx)?
                .map_or(Value::Null, Value::Text),
        };
        columns.push(value);
    }

    Ok(Row::new(columns))
}
