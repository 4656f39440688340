//! Reshapes the two raw statistics payloads into weekly series.
//!
//! The code frequency payload is a flat array of `[week, additions, deletions]`
//! triples; the contributor payload nests `{w, c}` weeks under each author.
//! Both become flat, timestamped sample lists that share the week-start axis.

use crate::error::{FreqError, Result};
use crate::model::{ContributorWeekSample, WeeklyChurnSample};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::collections::HashMap;

/// Convert a code frequency payload into churn samples, keeping source order.
///
/// Deletions are accepted with either sign and stored as `-|d|`.
pub fn normalize_churn(payload: &Value) -> Result<Vec<WeeklyChurnSample>> {
    let records = top_level_array(payload, "code frequency")?;
    records
        .iter()
        .enumerate()
        .map(|(index, record)| churn_sample(index, record))
        .collect()
}

fn churn_sample(index: usize, record: &Value) -> Result<WeeklyChurnSample> {
    let fields = record.as_array().ok_or_else(|| {
        FreqError::malformed(format!("code frequency record {index} is not an array"))
    })?;

    let field = |pos: usize, what: &str| -> Result<i64> {
        fields.get(pos).and_then(Value::as_i64).ok_or_else(|| {
            FreqError::malformed(format!("code frequency record {index} has no integer {what}"))
        })
    };

    let week = field(0, "week")?;
    let additions = field(1, "additions")?;
    let deletions = field(2, "deletions")?;

    let additions = u64::try_from(additions).map_err(|_| {
        FreqError::malformed(format!(
            "code frequency record {index} has negative additions ({additions})"
        ))
    })?;
    let deletions = deletions.checked_abs().ok_or_else(|| {
        FreqError::malformed(format!("code frequency record {index} deletions out of range"))
    })?;

    Ok(WeeklyChurnSample {
        timestamp: week_start(week, || format!("code frequency record {index}"))?,
        additions,
        deletions: -deletions,
    })
}

/// Flatten a contributor statistics payload into one sample per (author, week).
///
/// Each author's weeks keep the order the source supplied them in. A record
/// without an author login or a `weeks` list fails the whole conversion.
pub fn normalize_commit_activity(payload: &Value) -> Result<Vec<ContributorWeekSample>> {
    let contributors = top_level_array(payload, "contributor statistics")?;
    let mut samples = Vec::new();

    for (index, contributor) in contributors.iter().enumerate() {
        let author = contributor
            .get("author")
            .and_then(|a| a.get("login"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                FreqError::malformed(format!("contributor record {index} has no author login"))
            })?;
        let weeks = contributor
            .get("weeks")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                FreqError::malformed(format!("contributor {author} (record {index}) has no weeks"))
            })?;

        samples.reserve(weeks.len());
        for (pos, week) in weeks.iter().enumerate() {
            let w = week.get("w").and_then(Value::as_i64).ok_or_else(|| {
                FreqError::malformed(format!("contributor {author} week {pos} has no `w`"))
            })?;
            let c = week.get("c").and_then(Value::as_u64).ok_or_else(|| {
                FreqError::malformed(format!("contributor {author} week {pos} has no `c`"))
            })?;

            samples.push(ContributorWeekSample {
                author: author.to_string(),
                timestamp: week_start(w, || format!("contributor {author} week {pos}"))?,
                commits: c,
            });
        }
    }

    tracing::debug!(
        contributors = contributors.len(),
        samples = samples.len(),
        "normalized commit activity"
    );
    Ok(samples)
}

fn top_level_array<'a>(payload: &'a Value, what: &str) -> Result<&'a [Value]> {
    payload
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| FreqError::malformed(format!("{what} payload is not an array")))
}

fn week_start(epoch_secs: i64, context: impl FnOnce() -> String) -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(epoch_secs, 0).single().ok_or_else(|| {
        FreqError::malformed(format!("{}: timestamp {epoch_secs} out of range", context()))
    })
}

/// Commit samples grouped by author in a single pass.
///
/// Authors are kept in order of first appearance. A login that shows up in
/// more than one payload record is concatenated into one series.
#[derive(Debug, Default, Clone)]
pub struct AuthorSeries {
    groups: Vec<(String, Vec<ContributorWeekSample>)>,
    index: HashMap<String, usize>,
}

impl AuthorSeries {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, author: &str) -> Option<&[ContributorWeekSample]> {
        self.index.get(author).map(|&i| self.groups[i].1.as_slice())
    }

    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(author, _)| author.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ContributorWeekSample])> {
        self.groups
            .iter()
            .map(|(author, samples)| (author.as_str(), samples.as_slice()))
    }

    fn push(&mut self, sample: ContributorWeekSample) {
        match self.index.get(&sample.author) {
            Some(&i) => self.groups[i].1.push(sample),
            None => {
                self.index.insert(sample.author.clone(), self.groups.len());
                self.groups.push((sample.author.clone(), vec![sample]));
            }
        }
    }
}

impl FromIterator<ContributorWeekSample> for AuthorSeries {
    fn from_iter<I: IntoIterator<Item = ContributorWeekSample>>(iter: I) -> Self {
        let mut series = AuthorSeries::default();
        for sample in iter {
            series.push(sample);
        }
        series
    }
}

pub fn group_by_author(samples: &[ContributorWeekSample]) -> AuthorSeries {
    samples.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const WEEK: i64 = 604_800;
    const START: i64 = 1_700_000_000;

    fn contributor(login: &str, weeks: &[(i64, u64)]) -> Value {
        let weeks: Vec<Value> = weeks.iter().map(|(w, c)| json!({"w": w, "c": c, "a": 0, "d": 0})).collect();
        json!({"total": 0, "author": {"login": login}, "weeks": weeks})
    }

    #[test]
    fn churn_deletions_are_non_positive() {
        let payload = json!([
            [START, 120, -40],
            [START + WEEK, 0, 0],
            [START + 2 * WEEK, 15, 300],
        ]);
        let samples = normalize_churn(&payload).unwrap();
        assert_eq!(samples.len(), 3);
        for s in &samples {
            assert!(s.deletions <= 0, "deletions {} should be <= 0", s.deletions);
        }
        assert_eq!(samples[0].additions, 120);
        assert_eq!(samples[0].deletions, -40);
        assert_eq!(samples[2].deletions, -300);
        assert_eq!(samples[1].timestamp.timestamp(), START + WEEK);
    }

    #[test]
    fn churn_keeps_source_order() {
        let payload = json!([[START + WEEK, 1, 1], [START, 2, 2]]);
        let samples = normalize_churn(&payload).unwrap();
        assert_eq!(samples[0].timestamp.timestamp(), START + WEEK);
        assert_eq!(samples[1].timestamp.timestamp(), START);
    }

    #[test]
    fn churn_missing_count_is_malformed() {
        let err = normalize_churn(&json!([[START, 10]])).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("deletions"));
    }

    #[test]
    fn churn_negative_additions_is_malformed() {
        let err = normalize_churn(&json!([[START, -5, 3]])).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn churn_object_payload_is_malformed() {
        assert!(normalize_churn(&json!({})).unwrap_err().is_malformed());
    }

    #[test]
    fn empty_payloads_yield_empty_output() {
        assert!(normalize_churn(&json!([])).unwrap().is_empty());
        assert!(normalize_commit_activity(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn flattening_tags_each_week_with_author() {
        let payload = json!([
            contributor("alice", &[(START, 1), (START + WEEK, 4), (START + 2 * WEEK, 0)]),
            contributor("bob", &[(START, 2), (START + WEEK, 7)]),
        ]);
        let samples = normalize_commit_activity(&payload).unwrap();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples.iter().filter(|s| s.author == "alice").count(), 3);
        assert_eq!(samples.iter().filter(|s| s.author == "bob").count(), 2);

        let groups = group_by_author(&samples);
        let alice: Vec<(i64, u64)> = groups
            .get("alice")
            .unwrap()
            .iter()
            .map(|s| (s.timestamp.timestamp(), s.commits))
            .collect();
        assert_eq!(alice, vec![(START, 1), (START + WEEK, 4), (START + 2 * WEEK, 0)]);
        let bob: Vec<u64> = groups.get("bob").unwrap().iter().map(|s| s.commits).collect();
        assert_eq!(bob, vec![2, 7]);
    }

    #[test]
    fn contributor_without_weeks_contributes_nothing() {
        let payload = json!([contributor("alice", &[]), contributor("bob", &[(START, 3)])]);
        let samples = normalize_commit_activity(&payload).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].author, "bob");
    }

    #[test]
    fn missing_weeks_is_malformed() {
        let payload = json!([
            contributor("alice", &[(START, 1)]),
            {"author": {"login": "bob"}, "total": 3},
        ]);
        let err = normalize_commit_activity(&payload).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("bob"));
    }

    #[test]
    fn missing_or_null_author_is_malformed() {
        let missing = json!([{"weeks": [{"w": START, "c": 1}]}]);
        assert!(normalize_commit_activity(&missing).unwrap_err().is_malformed());
        let null = json!([{"author": null, "weeks": []}]);
        assert!(normalize_commit_activity(&null).unwrap_err().is_malformed());
    }

    #[test]
    fn week_missing_commit_count_is_malformed() {
        let payload = json!([{"author": {"login": "a"}, "weeks": [{"w": START}]}]);
        let err = normalize_commit_activity(&payload).unwrap_err();
        assert!(err.to_string().contains("`c`"));
    }

    #[test]
    fn duplicate_logins_concatenate() {
        let payload = json!([
            contributor("alice", &[(START, 1)]),
            contributor("bob", &[(START, 2)]),
            contributor("alice", &[(START, 5)]),
        ]);
        let samples = normalize_commit_activity(&payload).unwrap();
        let groups = group_by_author(&samples);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.authors().collect::<Vec<_>>(), vec!["alice", "bob"]);
        let alice: Vec<u64> = groups.get("alice").unwrap().iter().map(|s| s.commits).collect();
        assert_eq!(alice, vec![1, 5]);
    }
}
