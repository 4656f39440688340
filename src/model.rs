use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Lines added and removed during one week of the repository's lifetime.
///
/// `deletions` is stored sign-flipped so both counts share a zero-centered axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyChurnSample {
    pub timestamp: DateTime<Utc>,
    pub additions: u64,
    pub deletions: i64,
}

impl WeeklyChurnSample {
    pub fn deletion_magnitude(&self) -> u64 {
        self.deletions.unsigned_abs()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorWeekSample {
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub commits: u64,
}

/// Repository coordinates, `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoords {
    pub owner: String,
    pub name: String,
}

impl RepoCoords {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self { owner: owner.into(), name: name.into() }
    }

    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// The two raw payloads as returned by the hosting API.
#[derive(Debug, Clone)]
pub struct RawPayloads {
    pub code_frequency: serde_json::Value,
    pub contributors: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub samples: Vec<WeeklyChurnSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorActivity {
    pub author: String,
    pub total_commits: u64,
    pub weeks: Vec<ContributorWeekSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub authors: Vec<AuthorActivity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub scale: Option<f64>,
    pub charts: Vec<crate::compose::ChartSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn deletion_magnitude_is_absolute() {
        let sample = WeeklyChurnSample {
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
            additions: 3,
            deletions: -7,
        };
        assert_eq!(sample.deletion_magnitude(), 7);
    }

    #[test]
    fn slug_joins_owner_and_name() {
        assert_eq!(RepoCoords::new("rust-lang", "cargo").slug(), "rust-lang/cargo");
    }
}
