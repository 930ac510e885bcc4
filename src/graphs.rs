//! Dashboard graphs: each one fetches a single statistics endpoint,
//! turns the payload into chart-ready arrays and draws into its own canvas.

use crate::api::StatsClient;
use crate::chart;
use crate::config::Config;
use crate::errors::LoadError;
use crate::models::{
    ChartData, CommandTotal, CommandUsageRow, CommandsPerDay, DailyCounts, Dataset, GraphResponse,
};
use crate::series::{
    command_totals, day_label, fill_gaps, fill_gaps_cumulative, sparse_from_counts, summarize,
    text_and_slash_series, DailyValue, SeriesSummary,
};
use chrono::NaiveDate;
use std::sync::{Arc, OnceLock};
use tokio::sync::mpsc;
use tracing::debug;

pub const COMMANDS_PER_DAY_PATH: &str = "commands_per_day";
pub const TEXT_VS_SLASH_PATH: &str = "text_vs_slash_commands";
pub const DICTIONARY_API_USAGE_PATH: &str = "dictionary_api_usage";
pub const ACTIVE_GUILDS_PATH: &str = "active-guilds";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    /// Gap-filled daily counts as a line, optionally with min/max/average.
    Daily { summary: bool },
    /// Running total of gap-filled daily counts.
    Cumulative,
    /// Per-command totals as bars, busiest first.
    CommandTotals,
    /// Per-command totals as pie slices.
    CommandShare,
    /// Text and slash invocations per day as two lines.
    TextVsSlash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSpec {
    pub canvas: &'static str,
    pub title: &'static str,
    pub endpoint: String,
    pub kind: GraphKind,
}

impl GraphSpec {
    pub fn new(
        canvas: &'static str,
        title: &'static str,
        endpoint: impl Into<String>,
        kind: GraphKind,
    ) -> Self {
        Self {
            canvas,
            title,
            endpoint: endpoint.into(),
            kind,
        }
    }
}

/// The fixed set of graphs shown on the statistics page.
pub fn standard_graphs(config: &Config) -> Vec<GraphSpec> {
    let requests = config.requests_path.as_str();
    vec![
        GraphSpec::new(
            "requests_per_day_canvas",
            "Daily Requests",
            requests,
            GraphKind::Daily { summary: true },
        ),
        GraphSpec::new(
            "total_requests_canvas",
            "Total Requests",
            requests,
            GraphKind::Cumulative,
        ),
        GraphSpec::new(
            "commands_per_day_canvas",
            "Command Usage",
            COMMANDS_PER_DAY_PATH,
            GraphKind::CommandTotals,
        ),
        GraphSpec::new(
            "command_share_canvas",
            "Command Share",
            COMMANDS_PER_DAY_PATH,
            GraphKind::CommandShare,
        ),
        GraphSpec::new(
            "text_vs_slash_canvas",
            "Text vs Slash Commands",
            TEXT_VS_SLASH_PATH,
            GraphKind::TextVsSlash,
        ),
        GraphSpec::new(
            "dictionary_api_usage_canvas",
            "Dictionary API Requests",
            DICTIONARY_API_USAGE_PATH,
            GraphKind::Daily { summary: false },
        ),
        GraphSpec::new(
            "active_guilds_canvas",
            "Active Servers",
            ACTIVE_GUILDS_PATH,
            GraphKind::Cumulative,
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct Drawing {
    pub chart: ChartData,
    pub summary: Option<SeriesSummary>,
    pub svg: String,
}

/// Slot on the page that exactly one graph draws into, at most once.
#[derive(Debug)]
pub struct Canvas {
    pub id: &'static str,
    pub title: &'static str,
    drawing: OnceLock<Drawing>,
}

impl Canvas {
    fn new(id: &'static str, title: &'static str) -> Self {
        Self {
            id,
            title,
            drawing: OnceLock::new(),
        }
    }

    pub fn drawing(&self) -> Option<&Drawing> {
        self.drawing.get()
    }

    fn draw(&self, drawing: Drawing) {
        let _ = self.drawing.set(drawing);
    }

    pub fn to_response(&self) -> Option<GraphResponse> {
        self.drawing().map(|drawing| GraphResponse {
            canvas: self.id,
            title: self.title,
            chart: drawing.chart.clone(),
            summary: drawing.summary,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Graph {
    spec: GraphSpec,
    canvas: Arc<Canvas>,
}

impl Graph {
    pub fn new(spec: GraphSpec) -> Self {
        let canvas = Arc::new(Canvas::new(spec.canvas, spec.title));
        Self { spec, canvas }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Fetch, transform and draw.
    pub async fn load(&self, client: &StatsClient, today: NaiveDate) -> Result<(), LoadError> {
        let endpoint = self.spec.endpoint.as_str();
        let (chart, summary) = match self.spec.kind {
            GraphKind::Daily { summary: with_summary } => {
                let counts: DailyCounts = client.fetch(endpoint).await?;
                let (chart, summary) = daily_chart(self.spec.title, &counts, today)?;
                (chart, summary.filter(|_| with_summary))
            }
            GraphKind::Cumulative => {
                let counts: DailyCounts = client.fetch(endpoint).await?;
                (cumulative_chart(self.spec.title, &counts, today)?, None)
            }
            GraphKind::CommandTotals => {
                let usage: CommandsPerDay = client.fetch(endpoint).await?;
                (command_bar_chart(&usage), None)
            }
            GraphKind::CommandShare => {
                let usage: CommandsPerDay = client.fetch(endpoint).await?;
                (command_pie_chart(&usage), None)
            }
            GraphKind::TextVsSlash => {
                let rows: Vec<CommandUsageRow> = client.fetch(endpoint).await?;
                (text_vs_slash_chart(&rows, today)?, None)
            }
        };

        let svg = chart::render(self.spec.title, &chart);
        self.canvas.draw(Drawing { chart, summary, svg });
        debug!("drew {}", self.spec.canvas);
        Ok(())
    }
}

fn line(label: &str, dense: &[DailyValue]) -> ChartData {
    ChartData::Line {
        labels: dense.iter().map(|point| day_label(point.date)).collect(),
        datasets: vec![Dataset {
            label: label.to_string(),
            values: dense.iter().map(|point| point.value).collect(),
        }],
    }
}

pub fn daily_chart(
    label: &str,
    counts: &DailyCounts,
    today: NaiveDate,
) -> Result<(ChartData, Option<SeriesSummary>), LoadError> {
    let dense = fill_gaps(&sparse_from_counts(counts)?, today);
    Ok((line(label, &dense), summarize(&dense)))
}

pub fn cumulative_chart(
    label: &str,
    counts: &DailyCounts,
    today: NaiveDate,
) -> Result<ChartData, LoadError> {
    let totals = fill_gaps_cumulative(&sparse_from_counts(counts)?, today);
    Ok(line(label, &totals))
}

fn totals_by_usage(usage: &CommandsPerDay) -> Vec<CommandTotal> {
    let mut totals = command_totals(usage);
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    totals
}

pub fn command_bar_chart(usage: &CommandsPerDay) -> ChartData {
    let totals = totals_by_usage(usage);
    ChartData::Bar {
        labels: totals.iter().map(|item| item.name.clone()).collect(),
        values: totals.iter().map(|item| item.total).collect(),
    }
}

pub fn command_pie_chart(usage: &CommandsPerDay) -> ChartData {
    let totals = totals_by_usage(usage);
    ChartData::Pie {
        labels: totals.iter().map(|item| item.name.clone()).collect(),
        values: totals.iter().map(|item| item.total).collect(),
    }
}

pub fn text_vs_slash_chart(
    rows: &[CommandUsageRow],
    today: NaiveDate,
) -> Result<ChartData, LoadError> {
    let (text, slash) = text_and_slash_series(rows)?;
    let text = fill_gaps(&text, today);
    let slash = fill_gaps(&slash, today);
    Ok(ChartData::Line {
        labels: text.iter().map(|point| day_label(point.date)).collect(),
        datasets: vec![
            Dataset {
                label: "Text".to_string(),
                values: text.iter().map(|point| point.value).collect(),
            },
            Dataset {
                label: "Slash".to_string(),
                values: slash.iter().map(|point| point.value).collect(),
            },
        ],
    })
}

/// A fresh set of graphs. Built per page load and dropped afterwards.
#[derive(Debug)]
pub struct Dashboard {
    graphs: Vec<Graph>,
}

impl Dashboard {
    pub fn new(specs: Vec<GraphSpec>) -> Self {
        Self {
            graphs: specs.into_iter().map(Graph::new).collect(),
        }
    }

    pub fn standard(config: &Config) -> Self {
        Self::new(standard_graphs(config))
    }

    pub fn canvases(&self) -> impl Iterator<Item = &Canvas> {
        self.graphs.iter().map(Graph::canvas)
    }

    /// Starts every graph at once and resolves when all have drawn, or with
    /// the first failure to arrive. Loads still in flight after a failure
    /// are left running and draw when they finish.
    pub async fn load(&self, client: &StatsClient, today: NaiveDate) -> Result<(), LoadError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for graph in &self.graphs {
            let graph = graph.clone();
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = graph.load(&client, today).await;
                let _ = tx.send(result);
            });
        }
        drop(tx);

        let mut pending = self.graphs.len();
        while pending > 0 {
            match rx.recv().await {
                Some(Ok(())) => pending -= 1,
                Some(Err(err)) => return Err(err),
                None => return Err(LoadError::Incomplete { pending }),
            }
        }
        Ok(())
    }
}
