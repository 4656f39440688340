use crate::error::{FreqError, Result};
use crate::model::{ContributorWeekSample, WeeklyChurnSample};

/// Multiplier that brings churn into the range of weekly commit counts.
///
/// `max_commits / max(peak additions, peak |deletions|)`, with `max_commits`
/// clamped to at least 1. Only the combined overlay uses it.
pub fn scale_factor(
    churn: &[WeeklyChurnSample],
    commits: &[ContributorWeekSample],
) -> Result<f64> {
    let max_commits = commits.iter().map(|s| s.commits).max().unwrap_or(0).max(1);

    let peak_additions = churn.iter().map(|s| s.additions).max().unwrap_or(0);
    let peak_deletions = churn.iter().map(WeeklyChurnSample::deletion_magnitude).max().unwrap_or(0);
    let denominator = peak_additions.max(peak_deletions);

    if denominator == 0 {
        return Err(FreqError::DegenerateSeries);
    }

    Ok(max_commits as f64 / denominator as f64)
}

/// Like [`scale_factor`], but a degenerate series becomes `None`.
pub fn try_scale_factor(
    churn: &[WeeklyChurnSample],
    commits: &[ContributorWeekSample],
) -> Result<Option<f64>> {
    match scale_factor(churn, commits) {
        Ok(scale) => {
            tracing::debug!(scale, "computed overlay scale factor");
            Ok(Some(scale))
        }
        Err(FreqError::DegenerateSeries) => {
            tracing::warn!("no churn recorded, skipping the combined overlay");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
