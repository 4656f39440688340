use crate::cli::CommonArgs;
use crate::fetch::acquire_payloads;
use crate::model::{FrequencyOutput, WeeklyChurnSample, SCHEMA_VERSION};
use crate::normalize::normalize_churn;
use crate::util::week_key;
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let (repository, payloads) = acquire_payloads(&common)?;
    let churn = normalize_churn(&payloads.code_frequency)
        .context("Failed to normalize code frequency")?;

    if json {
        output_json(&churn, repository)?;
    } else if ndjson {
        output_ndjson(&churn)?;
    } else {
        output_table(&churn, &repository);
    }

    Ok(())
}

fn output_json(churn: &[WeeklyChurnSample], repository: String) -> anyhow::Result<()> {
    let output = FrequencyOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository,
        samples: churn.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(churn: &[WeeklyChurnSample]) -> anyhow::Result<()> {
    for sample in churn {
        println!("{}", serde_json::to_string(sample)?);
    }
    Ok(())
}

fn output_table(churn: &[WeeklyChurnSample], repository: &str) {
    if churn.is_empty() {
        println!("No code frequency data for {repository}");
        return;
    }

    println!("{}", style(format!("Code frequency for {repository}")).bold());
    println!(
        "{:<10} {:<12} {:>10} {:>10} {:>10}",
        style("Week").bold(),
        style("Start").bold(),
        style("Added").bold(),
        style("Deleted").bold(),
        style("Net").bold()
    );
    println!("{}", "─".repeat(56));

    for s in churn {
        let net = s.additions as i64 + s.deletions;
        println!(
            "{:<10} {:<12} {:>10} {:>10} {:>10}",
            week_key(&s.timestamp),
            s.timestamp.format("%Y-%m-%d"),
            style(format!("+{}", s.additions)).green(),
            style(s.deletions).red(),
            net
        );
    }

    let added: u64 = churn.iter().map(|s| s.additions).sum();
    let deleted: u64 = churn.iter().map(|s| s.deletion_magnitude()).sum();
    println!("{}", "─".repeat(56));
    println!(
        "{} weeks, {} lines added, {} lines deleted",
        churn.len(),
        style(added).green(),
        style(deleted).red()
    );
}
