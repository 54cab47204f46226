//! CLI and run configuration for census
//!
//! Two configuration surfaces feed a run: command-line flags (clap) and the
//! declarative settings file naming the repositories to fetch and the
//! contributors to track. The full-history variant instead takes a flat
//! repository list file, one clone URL per line.

use std::fs;
use std::path::{Path, PathBuf};

use census_log::aggregate::Contributor;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use thiserror::Error;

/// Commit census - contributor and domain statistics across repositories
#[derive(Parser, Debug, Clone)]
#[command(name = "census")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Report to run
    #[command(subcommand)]
    pub command: Command,

    /// External fetch helper, invoked as `<command> <name> <url>`
    ///
    /// On success it must have written `<work-dir>/<name>_log.txt`.
    #[arg(long, env = "CENSUS_FETCH_COMMAND", default_value = "bin/fetch-source")]
    pub fetch_command: PathBuf,

    /// Directory where fetched logs and report files live
    #[arg(long, env = "CENSUS_WORK_DIR", default_value = "work")]
    pub work_dir: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Per-contributor commit matrix and matched commit log
    ///
    /// Fetches every repository in the settings file, counts commits whose
    /// author or co-author is a tracked contributor, and writes
    /// `result.csv` and `result_log.csv` under the work directory.
    Contributors {
        /// Settings file listing repositories and tracked contributors
        #[arg(short, long, default_value = "setting.yml")]
        settings: PathBuf,
    },

    /// Domain-level commit counts over a repository list
    ///
    /// Fetches every repository in the list file under a bounded number of
    /// simultaneous workers, counts commits per author/co-author email
    /// domain inside the date window, and writes `total_count.csv`.
    Domains {
        /// Repository list file, one clone URL per line
        #[arg(short, long, default_value = "repos.txt")]
        repos: PathBuf,

        /// Count commits strictly after this date (YYYY-MM-DD)
        #[arg(long)]
        begin: NaiveDate,

        /// Count commits on or before this date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Maximum simultaneous fetch+parse workers
        #[arg(long, default_value_t = 30)]
        concurrency: usize,
    },
}

impl Cli {
    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// A repository to fetch history from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Short name, also the key for the fetched log file
    pub name: String,
    /// Clone URL handed to the fetch helper
    pub url: String,
}

/// Declarative run configuration loaded from the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Repositories to fetch, in report column order
    pub repositories: Vec<Repository>,
    /// Tracked contributors, in report row order
    pub contributors: Vec<Contributor>,
}

impl Settings {
    /// Parse settings from YAML text
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }
}

/// Derive a repository name from its clone URL: the final path segment up
/// to the first `.` (`.../cloudfoundry/nodejs-buildpack.git` becomes
/// `nodejs-buildpack`).
#[must_use]
pub fn repo_name_from_url(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or(url);
    segment.split('.').next().unwrap_or(segment).to_string()
}

/// Load a repository list file, one clone URL per non-empty line, in file
/// order.
pub fn load_repo_list(path: &Path) -> Result<Vec<Repository>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|url| Repository {
            name: repo_name_from_url(url),
            url: url.to_string(),
        })
        .collect())
}

/// Configuration errors; all of them abort the run before any work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Settings file did not match the expected structure
    #[error("malformed settings file: {0}")]
    Malformed(#[from] serde_yaml::Error),
}
