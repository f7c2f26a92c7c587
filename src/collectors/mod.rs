pub mod ora_resource;
pub mod ora_wait_class;
pub mod ora_wait_event;

use std::collections::HashMap;

use async_trait::async_trait;
use dyn_clone::DynClone;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::instance::Database;
use crate::key::MetricKey;

/// Flat result of one collector (or of a whole cycle after merging).
pub type Stat = HashMap<MetricKey, f64>;

#[async_trait]
pub trait Collector: DynClone + Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    async fn fetch(&self, db: &dyn Database) -> Result<Stat, SourceError>;
}

impl Clone for Box<dyn Collector> {
    fn clone(&self) -> Self {
        dyn_clone::clone_box(&**self)
    }
}

/// Copies `src` into `dst`. Keys already in `dst` are overwritten.
pub fn merge_stat(dst: &mut Stat, src: Stat) {
    for (key, value) in src {
        if let Some(prev) = dst.insert(key.clone(), value) {
            warn!(
                "metric {} collected twice, {} replaced by {}",
                key, prev, value
            );
        }
    }
}

/// Runs every collector in order and merges their results.
/// The first failure aborts the cycle; nothing partial is returned.
pub async fn collect(
    collectors: &[Box<dyn Collector>],
    db: &dyn Database,
) -> Result<Stat, SourceError> {
    let mut stat = Stat::new();
    for col in collectors {
        let part = col.fetch(db).await?;
        debug!("{}: {} metrics", col.name(), part.len());
        merge_stat(&mut stat, part);
    }
    Ok(stat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(pairs: &[(&str, f64)]) -> Stat {
        pairs
            .iter()
            .map(|(k, v)| (MetricKey::normalize(k), *v))
            .collect()
    }

    #[test]
    fn test_merge_last_writer_wins() {
        let mut dst = Stat::new();
        merge_stat(&mut dst, stat(&[("a", 1.0)]));
        merge_stat(&mut dst, stat(&[("b", 2.0)]));
        merge_stat(&mut dst, stat(&[("a", 3.0)]));

        assert_eq!(dst, stat(&[("a", 3.0), ("b", 2.0)]));
    }

    #[test]
    fn test_merge_empty() {
        let mut dst = stat(&[("processes", 10.0)]);
        merge_stat(&mut dst, Stat::new());
        assert_eq!(dst, stat(&[("processes", 10.0)]));
    }
}
