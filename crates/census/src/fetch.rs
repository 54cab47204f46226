// Copyright (c) 2026 - present Commit Census contributors
// SPDX-License-Identifier: MIT

//! External fetch collaborator
//!
//! History retrieval is delegated to an external helper invoked as
//! `<command> <name> <url>`; on success the helper has written the
//! repository's textual log to `<work-dir>/<name>_log.txt`. The fetcher
//! runs the helper and hands the log text back as a string. Any failure
//! here is fatal to the whole run.

use std::path::PathBuf;

use thiserror::Error;
use tokio::process::Command;
use tracing::info;

use crate::config::Repository;

/// Fetch failures; all of them abort the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The helper could not be launched at all
    #[error("failed to launch fetch command {command}: {source}")]
    Spawn {
        /// The helper path
        command: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The helper ran but exited non-zero
    #[error("fetch failed for {repo}: {detail}")]
    Failed {
        /// Repository that failed to fetch
        repo: String,
        /// Exit status plus the tail of stderr
        detail: String,
    },

    /// The helper succeeded but its output log could not be read
    #[error("could not read log for {repo} at {path}: {source}")]
    LogRead {
        /// Repository whose log is missing
        repo: String,
        /// Expected log path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Runs the external fetch helper and reads back the log it produces.
#[derive(Debug, Clone)]
pub struct Fetcher {
    command: PathBuf,
    work_dir: PathBuf,
}

impl Fetcher {
    /// Create a fetcher around a helper executable and a work directory
    #[must_use]
    pub fn new(command: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Path where the helper writes a repository's log
    #[must_use]
    pub fn log_path(&self, repo_name: &str) -> PathBuf {
        self.work_dir.join(format!("{repo_name}_log.txt"))
    }

    /// Fetch one repository's history and return the raw log text
    pub async fn fetch(&self, repo: &Repository) -> Result<String, FetchError> {
        info!(repo = %repo.name, url = %repo.url, "fetching history");

        let output = Command::new(&self.command)
            .arg(&repo.name)
            .arg(&repo.url)
            .output()
            .await
            .map_err(|source| FetchError::Spawn {
                command: self.command.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FetchError::Failed {
                repo: repo.name.clone(),
                detail: format!("{}; stderr: {}", output.status, stderr_tail(&stderr)),
            });
        }

        let path = self.log_path(&repo.name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::LogRead {
                repo: repo.name.clone(),
                path,
                source,
            })
    }
}

/// Last few stderr lines, enough to diagnose a failed helper run.
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(3);
    lines[start..].join(" / ")
}
