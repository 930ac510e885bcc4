use crate::series::SeriesSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date-keyed counts as served by `requests-per-day`, `active-guilds` and
/// `dictionary_api_usage`. Keys are unparsed day strings.
pub type DailyCounts = BTreeMap<String, u64>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandUsageRow {
    pub date: String,
    #[serde(default)]
    pub text_count: u64,
    #[serde(default)]
    pub slash_count: u64,
}

/// Served by `commands_per_day`.
pub type CommandsPerDay = BTreeMap<String, Vec<CommandUsageRow>>;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommandTotal {
    pub name: String,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    Line {
        labels: Vec<String>,
        datasets: Vec<Dataset>,
    },
    Bar {
        labels: Vec<String>,
        values: Vec<u64>,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<u64>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphResponse {
    pub canvas: &'static str,
    pub title: &'static str,
    pub chart: ChartData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SeriesSummary>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub loaded: bool,
    pub graphs: Vec<GraphResponse>,
}
