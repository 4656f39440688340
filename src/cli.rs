use crate::config::DEFAULT_ENV_FILE;
use crate::github::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghfreq")]
#[command(about = "GitHub code frequency and contributor activity charts")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, help = "Settings file with REPO_OWNER, REPO_NAME, TOKEN and URL [default: .env]")]
    pub env_file: Option<PathBuf>,

    #[arg(long, help = "Repository owner (overrides the settings file)")]
    pub owner: Option<String>,

    #[arg(long, help = "Repository name (overrides the settings file)")]
    pub name: Option<String>,

    #[arg(long, help = "Repository URL, e.g. https://github.com/owner/name")]
    pub url: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub API token")]
    pub token: Option<String>,

    #[arg(long, default_value = DEFAULT_API_BASE, help = "GitHub API base URL")]
    pub api_base: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "Per-request timeout in seconds")]
    pub timeout: u64,

    #[arg(long, requires = "contributors", help = "Read the code frequency payload from a JSON file")]
    pub code_frequency: Option<PathBuf>,

    #[arg(long, requires = "code_frequency", help = "Read the contributor statistics payload from a JSON file")]
    pub contributors: Option<PathBuf>,

    #[arg(short, long, conflicts_with = "quiet", help = "Verbose logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Only log errors and hide progress")]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn env_file(&self) -> PathBuf {
        self.env_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the overlay, raw churn and raw commit charts
    Charts {
        #[arg(long, help = "Print chart specifications as JSON instead of drawing them")]
        json: bool,
    },
    /// Weekly additions and deletions
    Frequency {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Weekly commits per contributor
    Activity {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Create the settings file template
    Init,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::logger::init(self.common.quiet, self.common.verbose)?;

        match self.command {
            Commands::Charts { json } => crate::charts::exec(self.common, json),
            Commands::Frequency { json, ndjson } => crate::frequency::exec(self.common, json, ndjson),
            Commands::Activity { json, ndjson } => crate::activity::exec(self.common, json, ndjson),
            Commands::Init => init(&self.common),
        }
    }
}

fn init(common: &CommonArgs) -> Result<()> {
    let path = common.env_file();
    if crate::config::init_env_file(&path)? {
        println!("Created {}. Fill in TOKEN and either URL or REPO_OWNER and REPO_NAME.", path.display());
    } else {
        println!("{} already exists, leaving it untouched.", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn payload_files_must_come_together() {
        let res = Cli::try_parse_from(["ghfreq", "--code-frequency", "a.json", "frequency"]);
        assert!(res.is_err());
        let cli = Cli::try_parse_from([
            "ghfreq",
            "--code-frequency",
            "a.json",
            "--contributors",
            "b.json",
            "frequency",
            "--json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Frequency { json: true, ndjson: false }));
    }
}
