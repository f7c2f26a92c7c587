//! mackerel-agent plugin protocol.
//!
//! Values are printed as `<prefix>.<group>.<metric>\t<value>\t<epoch>`.
//! When the agent sets `MACKEREL_AGENT_PLUGIN_META=1` it wants the graph
//! definitions instead, as one JSON document after a header line.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde_derive::Serialize;
use tracing::debug;

use crate::collectors::Stat;
use crate::graph::{Graph, GraphDefinition};

pub const META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";
const META_HEADER: &str = "# mackerel-agent-plugin";

#[derive(Serialize)]
struct Meta<'a> {
    graphs: BTreeMap<String, &'a Graph>,
}

pub fn meta_requested() -> bool {
    std::env::var(META_ENV).is_ok_and(|v| v == "1")
}

pub fn write_meta<W: Write>(
    w: &mut W,
    prefix: &str,
    graphdef: &GraphDefinition,
) -> anyhow::Result<()> {
    let meta = Meta {
        graphs: graphdef
            .iter()
            .map(|(name, graph)| (format!("{prefix}.{name}"), graph))
            .collect(),
    };

    writeln!(w, "{META_HEADER}")?;
    serde_json::to_writer(&mut *w, &meta)?;
    writeln!(w)?;
    Ok(())
}

/// Prints every metric the graph definition declares and the cycle collected.
pub fn write_values<W: Write>(
    w: &mut W,
    prefix: &str,
    graphdef: &GraphDefinition,
    stat: &Stat,
    now: u64,
) -> io::Result<()> {
    for (name, graph) in graphdef {
        for metric in &graph.metrics {
            match stat.get(metric.name.as_str()) {
                Some(value) => {
                    writeln!(w, "{prefix}.{name}.{}\t{value:.6}\t{now}", metric.name)?
                }
                None => debug!("{}.{}: not collected", name, metric.name),
            }
        }
    }
    Ok(())
}
