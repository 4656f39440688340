use crate::cli::CommonArgs;
use crate::config::{self, CredentialOverrides, Credentials, Settings};
use crate::error::Result;
use crate::github::{parse_payload, StatsClient};
use crate::model::{RawPayloads, RepoCoords};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Request both statistics endpoints at once; both must succeed.
pub fn fetch_payloads(client: &StatsClient, coords: &RepoCoords) -> Result<RawPayloads> {
    fetch_both(|| client.code_frequency(coords), || client.contributors(coords))
}

/// Run both fetches concurrently. When both fail, the churn error is returned.
fn fetch_both<C, A>(churn: C, activity: A) -> Result<RawPayloads>
where
    C: FnOnce() -> Result<serde_json::Value> + Send,
    A: FnOnce() -> Result<serde_json::Value>,
{
    let (code_frequency, contributors) = std::thread::scope(|s| {
        let churn = s.spawn(churn);
        let activity = activity();
        let churn = churn
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (churn, activity)
    });

    Ok(RawPayloads {
        code_frequency: code_frequency?,
        contributors: contributors?,
    })
}

/// Read previously saved payloads instead of calling the API.
pub fn load_payloads(code_frequency: &Path, contributors: &Path) -> Result<RawPayloads> {
    let read = |path: &Path| -> Result<serde_json::Value> {
        let text = std::fs::read_to_string(path)?;
        parse_payload(&text, &path.display().to_string())
    };
    Ok(RawPayloads {
        code_frequency: read(code_frequency)?,
        contributors: read(contributors)?,
    })
}

/// Resolve where the payloads come from and obtain them.
///
/// Offline files skip credential resolution entirely; the returned label is
/// the repository slug, or the code frequency file path for offline runs.
pub fn acquire_payloads(common: &CommonArgs) -> anyhow::Result<(String, RawPayloads)> {
    if let (Some(freq), Some(contrib)) = (&common.code_frequency, &common.contributors) {
        let payloads = load_payloads(freq, contrib).context("Failed to read payload files")?;
        return Ok((format!("offline: {}", freq.display()), payloads));
    }

    let env_file = common.env_file();
    let overrides = CredentialOverrides {
        owner: common.owner.clone(),
        name: common.name.clone(),
        url: common.url.clone(),
        token: common.token.clone(),
    };
    let settings = if env_file.exists() {
        Settings::load(&env_file).context("Failed to read settings file")?
    } else {
        Settings::default()
    };
    // Flags alone may be enough; the template is only written when they are not.
    let credentials = match Credentials::resolve(&settings, &overrides) {
        Ok(credentials) => credentials,
        Err(err) => {
            config::ensure_env_file(&env_file)?;
            return Err(err.into());
        }
    };
    tracing::debug!(?credentials, "resolved credentials");

    let client = StatsClient::new(
        &common.api_base,
        &credentials.token,
        Duration::from_secs(common.timeout),
    )
    .context("Failed to build HTTP client")?;

    let spinner = spinner(common.quiet, &credentials.coords);
    let fetched = fetch_payloads(&client, &credentials.coords);
    spinner.finish_and_clear();

    let payloads = fetched
        .with_context(|| format!("Failed to fetch statistics for {}", credentials.coords.slug()))?;
    Ok((credentials.coords.slug(), payloads))
}

fn spinner(quiet: bool, coords: &RepoCoords) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching statistics for {}", coords.slug()));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
