// Copyright (c) 2026 - present Commit Census contributors
// SPDX-License-Identifier: MIT

//! Concurrent run orchestration
//!
//! One worker per repository: fetch, parse, aggregate into accumulators
//! private to the worker. Partial results are merged sequentially after
//! join, so no map is ever written from two tasks. The domains variant
//! additionally gates admission with a semaphore to avoid overwhelming
//! the external fetch helper.
//!
//! Any worker failure fails the whole run; in-flight workers are not
//! cancelled, but no reports are written.

use std::sync::Arc;

use anyhow::{Context, Result};
use census_log::aggregate::{
    ContributionMatrix, DateWindow, DomainCounts, MatchedLog, matched_contributor,
};
use census_log::parser::parse_log;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::{Repository, Settings};
use crate::fetch::Fetcher;

/// Aggregation results of a contributor run.
#[derive(Debug, Default)]
pub struct ContributorReport {
    /// Contributor-by-repository commit counts
    pub matrix: ContributionMatrix,
    /// Every matched commit, keyed by contributor
    pub log: MatchedLog,
}

/// Fetch and parse every configured repository, counting and logging the
/// commits of tracked contributors.
pub async fn contributor_run(settings: &Settings, fetcher: &Fetcher) -> Result<ContributorReport> {
    let mut workers = JoinSet::new();

    for repo in settings.repositories.clone() {
        let fetcher = fetcher.clone();
        let contributors = settings.contributors.clone();

        workers.spawn(async move {
            let text = fetcher.fetch(&repo).await?;
            let outcome = parse_log(text.lines(), &repo.name);
            for warning in &outcome.warnings {
                warn!(repo = %repo.name, "{warning}");
            }

            let mut matrix = ContributionMatrix::new();
            let mut log = MatchedLog::new();
            for commit in outcome.commits {
                if let Some(name) = matched_contributor(&commit, &contributors) {
                    matrix.increment(name, &commit.repo);
                    log.push(name, commit);
                }
            }

            anyhow::Ok((repo.name, matrix, log))
        });
    }

    let mut report = ContributorReport::default();
    while let Some(joined) = workers.join_next().await {
        let (repo, matrix, log) = joined.context("fetch worker panicked")??;
        info!(repo = %repo, "merged contributor counts");
        report.matrix.merge(matrix);
        report.log.merge(log);
    }

    Ok(report)
}

/// Fetch and parse a repository list under a concurrency ceiling, counting
/// commits per email domain inside the date window.
pub async fn domain_run(
    repos: Vec<Repository>,
    fetcher: &Fetcher,
    window: DateWindow,
    concurrency: usize,
) -> Result<DomainCounts> {
    let gate = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut workers = JoinSet::new();

    for repo in repos {
        let fetcher = fetcher.clone();
        let gate = Arc::clone(&gate);

        workers.spawn(async move {
            let _permit = gate.acquire_owned().await?;

            let text = fetcher.fetch(&repo).await?;
            let outcome = parse_log(text.lines(), &repo.name);
            for warning in &outcome.warnings {
                warn!(repo = %repo.name, "{warning}");
            }

            let mut counts = DomainCounts::new();
            for commit in &outcome.commits {
                counts.record(commit, &window);
            }
            info!(repo = %repo.name, total = counts.total(), "counted domains");

            anyhow::Ok(counts)
        });
    }

    let mut merged = DomainCounts::new();
    while let Some(joined) = workers.join_next().await {
        let counts = joined.context("fetch worker panicked")??;
        merged.merge(counts);
    }

    Ok(merged)
}
