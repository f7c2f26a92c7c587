use thiserror::Error;

/// Invalid wait-event selector configuration. Fatal at startup.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("empty selector")]
    Empty,

    #[error("invalid selector {selector:?}: {source}")]
    Pattern {
        selector: String,
        #[source]
        source: regex::Error,
    },
}

/// A collection cycle could not produce a complete metric snapshot.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("connect: {0}")]
    Connect(String),

    #[error("{collector}: query failed: {reason}")]
    Query {
        collector: &'static str,
        reason: String,
    },

    #[error("{collector}: can't decode row: {reason}")]
    Decode {
        collector: &'static str,
        reason: String,
    },
}

impl SourceError {
    pub fn query<S: ToString>(collector: &'static str, reason: S) -> Self {
        Self::Query {
            collector,
            reason: reason.to_string(),
        }
    }

    pub fn decode<S: ToString>(collector: &'static str, reason: S) -> Self {
        Self::Decode {
            collector,
            reason: reason.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("event: {0}")]
    Selector(#[from] ParseError),

    #[error("dsn: {0}")]
    Dsn(String),
}
