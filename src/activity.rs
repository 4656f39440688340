use crate::cli::CommonArgs;
use crate::fetch::acquire_payloads;
use crate::model::{ActivityOutput, AuthorActivity, ContributorWeekSample, SCHEMA_VERSION};
use crate::normalize::{group_by_author, normalize_commit_activity, AuthorSeries};
use crate::util::week_key;
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let (repository, payloads) = acquire_payloads(&common)?;
    let commits = normalize_commit_activity(&payloads.contributors)
        .context("Failed to normalize contributor statistics")?;

    if ndjson {
        return output_ndjson(&commits);
    }

    let authors = summarize(&group_by_author(&commits));
    if json {
        output_json(authors, repository)?;
    } else {
        output_table(&authors, &repository);
    }

    Ok(())
}

/// Per-author totals, busiest authors first.
pub fn summarize(groups: &AuthorSeries) -> Vec<AuthorActivity> {
    let mut authors: Vec<AuthorActivity> = groups
        .iter()
        .map(|(author, weeks)| AuthorActivity {
            author: author.to_string(),
            total_commits: weeks.iter().map(|w| w.commits).sum(),
            weeks: weeks.to_vec(),
        })
        .collect();
    authors.sort_by(|a, b| b.total_commits.cmp(&a.total_commits));
    authors
}

fn output_json(authors: Vec<AuthorActivity>, repository: String) -> anyhow::Result<()> {
    let output = ActivityOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository,
        authors,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(commits: &[ContributorWeekSample]) -> anyhow::Result<()> {
    for sample in commits {
        println!("{}", serde_json::to_string(sample)?);
    }
    Ok(())
}

fn output_table(authors: &[AuthorActivity], repository: &str) {
    if authors.is_empty() {
        println!("No contributor activity for {repository}");
        return;
    }

    println!("{}", style(format!("Contributor activity for {repository}")).bold());
    println!(
        "{:<30} {:>8} {:>12} {:>14}",
        style("Author").bold(),
        style("Commits").bold(),
        style("Active weeks").bold(),
        style("Busiest week").bold()
    );
    println!("{}", "─".repeat(67));

    for a in authors.iter().take(50) {
        let active = a.weeks.iter().filter(|w| w.commits > 0).count();
        let busiest = a
            .weeks
            .iter()
            .filter(|w| w.commits > 0)
            .max_by_key(|w| w.commits)
            .map(|w| format!("{} ({})", week_key(&w.timestamp), w.commits))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<30} {:>8} {:>12} {:>14}",
            a.author, a.total_commits, active, busiest
        );
    }
    if authors.len() > 50 {
        println!("\n... and {} more contributors", authors.len() - 50);
    }
}
