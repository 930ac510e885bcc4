//! Server-side SVG rendering for the dashboard canvases.

use crate::models::{ChartData, Dataset};
use std::fmt::Write;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PADDING_X: f64 = 44.0;
const PADDING_Y: f64 = 34.0;
const TOP: f64 = 36.0;
const Y_TICKS: u32 = 4;
const MAX_X_LABELS: usize = 3;

const PALETTE: [&str; 8] = [
    "rgb(75, 192, 192)",
    "rgb(255, 99, 132)",
    "rgb(255, 205, 86)",
    "rgb(54, 162, 235)",
    "rgb(153, 102, 255)",
    "rgb(255, 159, 64)",
    "rgb(201, 203, 207)",
    "rgb(120, 220, 120)",
];

pub fn render(title: &str, chart: &ChartData) -> String {
    match chart {
        ChartData::Line { labels, datasets } => render_line_chart(title, labels, datasets),
        ChartData::Bar { labels, values } => render_bar_chart(title, labels, values),
        ChartData::Pie { labels, values } => render_pie_chart(title, labels, values),
    }
}

pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn open_svg(title: &str) -> String {
    format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{label}"><text class="chart-title" x="{x}" y="22" text-anchor="middle">{label}</text>"#,
        label = escape_text(title),
        x = WIDTH / 2.0,
    )
}

fn empty_chart(title: &str) -> String {
    let mut svg = open_svg(title);
    let _ = write!(
        svg,
        r#"<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text></svg>"#
    );
    svg
}

fn format_axis_value(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Value axis shared by line and bar charts. Always includes zero.
struct Scale {
    min: f64,
    range: f64,
}

impl Scale {
    fn new<'a>(values: impl Iterator<Item = &'a u64>) -> Self {
        let max = values.copied().max().unwrap_or(0) as f64;
        let min = 0.0;
        let max = if max == min { min + 1.0 } else { max };
        Self { min, range: max - min }
    }

    fn y(&self, value: f64) -> f64 {
        let scale = (HEIGHT - TOP - PADDING_Y) / self.range;
        HEIGHT - PADDING_Y - (value - self.min) * scale
    }

    fn grid(&self, svg: &mut String) {
        for tick in 0..=Y_TICKS {
            let value = self.min + self.range * f64::from(tick) / f64::from(Y_TICKS);
            let y = self.y(value);
            let _ = write!(
                svg,
                r#"<line class="chart-grid" x1="{PADDING_X}" y1="{y:.2}" x2="{x2}" y2="{y:.2}" /><text class="chart-label" x="{lx}" y="{ly:.2}" text-anchor="end">{text}</text>"#,
                x2 = WIDTH - PADDING_X,
                lx = PADDING_X - 10.0,
                ly = y + 4.0,
                text = format_axis_value(value),
            );
        }
    }
}

pub fn render_line_chart(title: &str, labels: &[String], datasets: &[Dataset]) -> String {
    if labels.is_empty() || datasets.iter().all(|dataset| dataset.values.is_empty()) {
        return empty_chart(title);
    }

    let scale = Scale::new(datasets.iter().flat_map(|dataset| dataset.values.iter()));
    let count = labels.len();
    let x_step = if count > 1 {
        (WIDTH - PADDING_X * 2.0) / (count - 1) as f64
    } else {
        0.0
    };
    let x = |index: usize| PADDING_X + index as f64 * x_step;

    let mut svg = open_svg(title);
    scale.grid(&mut svg);

    for (index, dataset) in datasets.iter().enumerate() {
        let path = dataset
            .values
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, value)| {
                let command = if i == 0 { 'M' } else { 'L' };
                format!("{command} {:.2} {:.2}", x(i), scale.y(*value as f64))
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            svg,
            r#"<path class="chart-line" d="{path}" stroke="{stroke}"><title>{label}</title></path>"#,
            stroke = color(index),
            label = escape_text(&dataset.label),
        );
    }

    let label_every = count.div_ceil(MAX_X_LABELS).max(1);
    for (index, label) in labels.iter().enumerate() {
        if index % label_every != 0 {
            continue;
        }
        let _ = write!(
            svg,
            r#"<text class="chart-label" x="{:.2}" y="{}" text-anchor="middle">{}</text>"#,
            x(index),
            HEIGHT - PADDING_Y + 18.0,
            escape_text(label),
        );
    }

    if datasets.len() > 1 {
        legend(&mut svg, datasets.iter().map(|dataset| dataset.label.as_str()));
    }

    svg.push_str("</svg>");
    svg
}

pub fn render_bar_chart(title: &str, labels: &[String], values: &[u64]) -> String {
    let count = labels.len().min(values.len());
    if count == 0 {
        return empty_chart(title);
    }

    let scale = Scale::new(values.iter());
    let slot = (WIDTH - PADDING_X * 2.0) / count as f64;
    let bar_width = slot * 0.7;

    let mut svg = open_svg(title);
    scale.grid(&mut svg);

    for (index, (label, value)) in labels.iter().zip(values).enumerate() {
        let x = PADDING_X + slot * index as f64 + (slot - bar_width) / 2.0;
        let y = scale.y(*value as f64);
        let _ = write!(
            svg,
            r#"<rect class="chart-bar" x="{x:.2}" y="{y:.2}" width="{bar_width:.2}" height="{h:.2}" fill="{fill}"><title>{label}: {value}</title></rect><text class="chart-label" x="{cx:.2}" y="{ly}" text-anchor="middle">{label}</text>"#,
            h = (HEIGHT - PADDING_Y - y).max(0.0),
            fill = color(index),
            label = escape_text(label),
            cx = x + bar_width / 2.0,
            ly = HEIGHT - PADDING_Y + 18.0,
        );
    }

    svg.push_str("</svg>");
    svg
}

pub fn render_pie_chart(title: &str, labels: &[String], values: &[u64]) -> String {
    let total: u64 = values.iter().fold(0u64, |acc, value| acc.saturating_add(*value));
    if labels.is_empty() || total == 0 {
        return empty_chart(title);
    }

    let cx = WIDTH / 3.0;
    let cy = (HEIGHT + TOP - PADDING_Y / 2.0) / 2.0;
    let radius = (HEIGHT - TOP - PADDING_Y / 2.0) / 2.0 - 4.0;

    let mut svg = open_svg(title);
    let mut angle = -std::f64::consts::FRAC_PI_2;

    for (index, (label, value)) in labels.iter().zip(values).enumerate() {
        if *value == 0 {
            continue;
        }
        let fill = color(index);
        let label = escape_text(label);
        let share = *value as f64 / total as f64;

        if *value == total {
            let _ = write!(
                svg,
                r#"<circle class="chart-slice" cx="{cx:.2}" cy="{cy:.2}" r="{radius:.2}" fill="{fill}"><title>{label}: {value}</title></circle>"#
            );
            continue;
        }

        let end = angle + share * std::f64::consts::TAU;
        let (x1, y1) = (cx + radius * angle.cos(), cy + radius * angle.sin());
        let (x2, y2) = (cx + radius * end.cos(), cy + radius * end.sin());
        let large_arc = u8::from(share > 0.5);
        let _ = write!(
            svg,
            r#"<path class="chart-slice" d="M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z" fill="{fill}"><title>{label}: {value}</title></path>"#
        );
        angle = end;
    }

    legend(&mut svg, labels.iter().map(String::as_str));
    svg.push_str("</svg>");
    svg
}

fn legend<'a>(svg: &mut String, labels: impl Iterator<Item = &'a str>) {
    let x = WIDTH * 2.0 / 3.0;
    for (index, label) in labels.enumerate() {
        let y = TOP + 8.0 + index as f64 * 18.0;
        let _ = write!(
            svg,
            r#"<rect class="chart-key" x="{x:.2}" y="{y:.2}" width="10" height="10" fill="{fill}" /><text class="chart-label" x="{tx:.2}" y="{ty:.2}">{label}</text>"#,
            fill = color(index),
            tx = x + 16.0,
            ty = y + 9.0,
            label = escape_text(label),
        );
    }
}
