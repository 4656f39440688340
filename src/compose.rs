//! Chart specifications built from the normalized series.
//!
//! A [`ChartSpec`] is renderer-agnostic: named layers of `(epoch_secs, value)`
//! points. The terminal viewer draws them and `charts --json` prints them.

use crate::model::WeeklyChurnSample;
use crate::normalize::AuthorSeries;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Overlay,
    RawChurn,
    RawCommits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum LayerStyle {
    Additions,
    Deletions,
    Contributor(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    pub style: LayerStyle,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl ChartSpec {
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Extents over every layer; the y range always contains zero.
    pub fn bounds(&self) -> Bounds {
        let mut x = [f64::INFINITY, f64::NEG_INFINITY];
        let mut y = [0.0_f64, 0.0_f64];
        for &(px, py) in self.layers.iter().flat_map(|l| l.points.iter()) {
            x[0] = x[0].min(px);
            x[1] = x[1].max(px);
            y[0] = y[0].min(py);
            y[1] = y[1].max(py);
        }
        if x[0] > x[1] {
            x = [0.0, 1.0];
        }
        Bounds { x, y }
    }
}

/// Build the views: the overlay (only when a scale is known), raw churn, raw commits.
pub fn compose(churn: &[WeeklyChurnSample], groups: &AuthorSeries, scale: Option<f64>) -> Vec<ChartSpec> {
    let mut charts = Vec::with_capacity(3);

    if let Some(scale) = scale {
        let mut layers = churn_layers(churn, scale, " (scaled)");
        layers.extend(commit_layers(groups, "Commits by: "));
        charts.push(ChartSpec {
            kind: ChartKind::Overlay,
            title: "Code frequency with contributor activity".to_string(),
            x_label: "Date".to_string(),
            y_label: "Changes (additions/deletions scaled)".to_string(),
            layers,
        });
    }

    charts.push(ChartSpec {
        kind: ChartKind::RawChurn,
        title: "Raw code frequency".to_string(),
        x_label: "Date".to_string(),
        y_label: "Additions/Deletions".to_string(),
        layers: churn_layers(churn, 1.0, ""),
    });

    charts.push(ChartSpec {
        kind: ChartKind::RawCommits,
        title: "Raw commit activity".to_string(),
        x_label: "Date".to_string(),
        y_label: "Commits".to_string(),
        layers: commit_layers(groups, "Commits by "),
    });

    charts
}

fn churn_layers(churn: &[WeeklyChurnSample], scale: f64, suffix: &str) -> Vec<Layer> {
    let x = |s: &WeeklyChurnSample| s.timestamp.timestamp() as f64;
    vec![
        Layer {
            name: format!("Additions{suffix}"),
            style: LayerStyle::Additions,
            points: churn.iter().map(|s| (x(s), s.additions as f64 * scale)).collect(),
        },
        Layer {
            name: format!("Deletions{suffix}"),
            style: LayerStyle::Deletions,
            points: churn.iter().map(|s| (x(s), s.deletions as f64 * scale)).collect(),
        },
    ]
}

fn commit_layers(groups: &AuthorSeries, prefix: &str) -> Vec<Layer> {
    groups
        .iter()
        .enumerate()
        .map(|(i, (author, samples))| Layer {
            name: format!("{prefix}{author}"),
            style: LayerStyle::Contributor(i),
            points: samples
                .iter()
                .map(|s| (s.timestamp.timestamp() as f64, s.commits as f64))
                .collect(),
        })
        .collect()
}
