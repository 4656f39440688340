//! Credential source: a `.env`-style settings file plus command-line overrides.

use crate::error::{FreqError, Result};
use crate::model::RepoCoords;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub const DEFAULT_ENV_FILE: &str = ".env";

pub const KEY_OWNER: &str = "REPO_OWNER";
pub const KEY_NAME: &str = "REPO_NAME";
pub const KEY_TOKEN: &str = "TOKEN";
pub const KEY_URL: &str = "URL";

const TEMPLATE: &str = "# GitHub API data for requests\nREPO_OWNER=\nREPO_NAME=\nTOKEN=\nURL=\n";

/// Write the settings template if `path` does not exist. Returns `true` when created.
pub fn init_env_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, TEMPLATE)?;
    tracing::info!(path = %path.display(), "created settings template");
    Ok(true)
}

/// Like [`init_env_file`], but a freshly created file is a configuration error.
pub fn ensure_env_file(path: &Path) -> Result<()> {
    if init_env_file(path)? {
        return Err(FreqError::ConfigurationMissing(format!(
            "settings file created at {}, fill in the necessary details and rerun",
            path.display()
        )));
    }
    Ok(())
}

/// Key-value pairs read from the settings file. Blank values count as absent.
#[derive(Debug, Default, Clone)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Parse `path` without touching the process environment.
    ///
    /// Lines that are not `KEY=value` (stray notes) are skipped with a warning.
    pub fn load(path: &Path) -> Result<Self> {
        let mut values = HashMap::new();
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = match item {
                Ok(pair) => pair,
                Err(dotenvy::Error::LineParse(line, _)) => {
                    tracing::warn!(path = %path.display(), line = %line, "skipping settings line without '='");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
        tracing::debug!(path = %path.display(), keys = values.len(), "loaded settings");
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Values given on the command line; they win over the settings file.
#[derive(Debug, Default, Clone)]
pub struct CredentialOverrides {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub token: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub coords: RepoCoords,
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("coords", &self.coords)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Resolve owner, name and token.
    ///
    /// Precedence: explicit `--owner`/`--name`, then a parsable `URL`, then
    /// `REPO_OWNER`/`REPO_NAME`. The token comes from `--token` or `TOKEN`.
    pub fn resolve(settings: &Settings, overrides: &CredentialOverrides) -> Result<Self> {
        let url = non_blank(overrides.url.as_deref()).or_else(|| settings.get(KEY_URL));
        let from_url = url.and_then(|u| {
            let parsed = parse_repo_url(u);
            if parsed.is_none() {
                tracing::warn!(url = u, "invalid URL format, falling back to REPO_OWNER and REPO_NAME");
            }
            parsed
        });

        let owner = non_blank(overrides.owner.as_deref())
            .or(from_url.as_ref().map(|c| c.owner.as_str()))
            .or_else(|| settings.get(KEY_OWNER));
        let name = non_blank(overrides.name.as_deref())
            .or(from_url.as_ref().map(|c| c.name.as_str()))
            .or_else(|| settings.get(KEY_NAME));
        let token = non_blank(overrides.token.as_deref()).or_else(|| settings.get(KEY_TOKEN));

        let missing: Vec<&str> = [(KEY_TOKEN, token), (KEY_OWNER, owner), (KEY_NAME, name)]
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| *k)
            .collect();

        match (owner, name, token) {
            (Some(owner), Some(name), Some(token)) => Ok(Self {
                coords: RepoCoords::new(owner, name),
                token: token.to_string(),
            }),
            _ => Err(FreqError::ConfigurationMissing(format!(
                "missing {}; fill in 'TOKEN' and either 'URL' or 'REPO_OWNER' and 'REPO_NAME'",
                missing.join(", ")
            ))),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Extract `owner/name` from `https://host/owner/name[.git]` or `git@host:owner/name[.git]`.
pub fn parse_repo_url(url: &str) -> Option<RepoCoords> {
    let url = url.trim();
    let path = if let Some(rest) = url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")) {
        rest.split_once('/')?.1
    } else if let Some(rest) = url.strip_prefix("git@") {
        rest.split_once(':')?.1
    } else {
        return None;
    };

    let path = path.trim_matches('/');
    let (owner, name) = path.split_once('/')?;
    let name = name.strip_suffix(".git").unwrap_or(name);
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some(RepoCoords::new(owner, name))
}
