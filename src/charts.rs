use crate::cli::CommonArgs;
use crate::compose::{compose, ChartSpec};
use crate::error::Result;
use crate::fetch::acquire_payloads;
use crate::model::{ChartsOutput, ContributorWeekSample, RawPayloads, WeeklyChurnSample, SCHEMA_VERSION};
use crate::normalize::{group_by_author, normalize_churn, normalize_commit_activity};
use crate::scale::try_scale_factor;
use anyhow::Context;
use chrono::Utc;
use console::{style, Term};

/// Everything one run derives from the two payloads.
#[derive(Debug, Clone)]
pub struct ChartReport {
    pub churn: Vec<WeeklyChurnSample>,
    pub commits: Vec<ContributorWeekSample>,
    /// `None` when no churn was recorded and the overlay is skipped.
    pub scale: Option<f64>,
    pub charts: Vec<ChartSpec>,
}

/// Normalize, scale and compose. Fails before composing if either payload is malformed.
pub fn build_report(payloads: &RawPayloads) -> Result<ChartReport> {
    let churn = normalize_churn(&payloads.code_frequency)?;
    let commits = normalize_commit_activity(&payloads.contributors)?;
    let scale = try_scale_factor(&churn, &commits)?;
    let groups = group_by_author(&commits);
    let charts = compose(&churn, &groups, scale);

    tracing::debug!(
        weeks = churn.len(),
        contributors = groups.len(),
        charts = charts.len(),
        "built chart report"
    );
    Ok(ChartReport { churn, commits, scale, charts })
}

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let (repository, payloads) = acquire_payloads(&common)?;
    let report = build_report(&payloads).context("Failed to prepare chart data")?;

    if report.scale.is_none() && !common.quiet {
        eprintln!(
            "{}",
            style("No churn recorded; showing the raw views without the combined overlay").yellow()
        );
    }

    if json {
        let output = ChartsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            repository,
            scale: report.scale,
            charts: report.charts,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !Term::stdout().is_term() {
        anyhow::bail!("Interactive charts need a terminal; use `charts --json` when piping output");
    }

    crate::tui::run(&repository, &report.charts).context("Failed to run chart viewer")?;
    Ok(())
}
