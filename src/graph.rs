//! Graph definitions reported to mackerel-agent.
//!
//! `resource` and `waitclass` are fixed; every configured wait-event selector
//! adds one more group holding its `_count` and `_latency` metrics.

use std::collections::BTreeMap;

use serde_derive::Serialize;

use crate::collectors::ora_wait_event::{COUNT_SUFFIX, LATENCY_SUFFIX};
use crate::key::MetricKey;
use crate::selector::WaitEventNames;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Integer,
    Float,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphMetric {
    pub name: String,
    pub label: String,
    pub diff: bool,
    pub stacked: bool,
}

impl GraphMetric {
    fn new(name: &str, label: &str) -> Self {
        GraphMetric {
            name: name.to_string(),
            label: label.to_string(),
            diff: false,
            stacked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub label: String,
    pub unit: Unit,
    pub metrics: Vec<GraphMetric>,
}

/// Group name -> graph.
pub type GraphDefinition = BTreeMap<String, Graph>;

const WAIT_CLASS_METRICS: [(&str, &str); 8] = [
    ("administrative", "Administrative"),
    ("cpu", "CPU"),
    ("cpu_os", "CPU/OS"),
    ("concurrency", "Concurrency"),
    ("configuration", "Configuration"),
    ("network", "Network"),
    ("other", "Other"),
    ("scheduler", "Scheduler"),
];

pub fn definition(prefix: &str, events: &WaitEventNames) -> GraphDefinition {
    let label_prefix = title_case(prefix);
    let mut graphdef = GraphDefinition::new();

    graphdef.insert(
        "resource".to_string(),
        Graph {
            label: format!("{label_prefix} Resource Limit"),
            unit: Unit::Integer,
            metrics: vec![
                GraphMetric::new("processes", "Processes"),
                GraphMetric::new("sessions", "Sessions"),
            ],
        },
    );

    graphdef.insert(
        "waitclass".to_string(),
        Graph {
            label: format!("{label_prefix} Wait Class"),
            unit: Unit::Float,
            metrics: WAIT_CLASS_METRICS
                .iter()
                .map(|(name, label)| GraphMetric::new(name, label))
                .collect(),
        },
    );

    for e in events {
        let key = MetricKey::normalize(e.name());
        graphdef.insert(
            key.to_string(),
            Graph {
                label: format!("{label_prefix} Wait Events: {}", e.name()),
                unit: Unit::Float,
                metrics: vec![
                    GraphMetric::new(key.with_suffix(COUNT_SUFFIX).as_str(), "Count"),
                    GraphMetric::new(key.with_suffix(LATENCY_SUFFIX).as_str(), "Latency"),
                ],
            },
        );
    }

    graphdef
}

/// Upper-cases the first letter of every word: `oracle` -> `Oracle`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}
