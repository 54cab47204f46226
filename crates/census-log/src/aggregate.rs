// Copyright (c) 2026 - present Commit Census contributors
// SPDX-License-Identifier: MIT

//! Aggregation folds over commit records
//!
//! Three independent, order-insensitive folds feed the reports: the
//! contributor-by-repository count matrix, the matched commit log, and the
//! per-domain count within a date window. Each accumulator supports
//! `merge` so concurrent workers keep a private instance per repository
//! and hand off pre-aggregated partial results after join; nothing here
//! is shared across tasks.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::commit::CommitRecord;

/// A tracked person whose commits are counted and logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Display name as it appears on author and sign-off lines
    pub name: String,
}

/// Key under which [`DomainCounts`] accumulates the overall tally.
///
/// Each non-empty domain field contributes one increment, so a commit
/// carrying both an author and a co-author domain counts twice.
pub const TOTAL_KEY: &str = "TOTAL";

/// First tracked contributor, in configuration order, whose name equals
/// the record's author or co-author.
///
/// A commit where the same person is both author and co-author therefore
/// matches exactly once.
#[must_use]
pub fn matched_contributor<'a>(
    commit: &CommitRecord,
    contributors: &'a [Contributor],
) -> Option<&'a str> {
    contributors
        .iter()
        .find(|c| commit.involves(&c.name))
        .map(|c| c.name.as_str())
}

/// Per-contributor, per-repository commit counts.
#[derive(Debug, Clone, Default)]
pub struct ContributionMatrix {
    counts: HashMap<String, HashMap<String, u64>>,
}

impl ContributionMatrix {
    /// Create an empty matrix
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one commit for a contributor in a repository
    pub fn increment(&mut self, contributor: &str, repo: &str) {
        *self
            .counts
            .entry(contributor.to_string())
            .or_default()
            .entry(repo.to_string())
            .or_default() += 1;
    }

    /// Count for a contributor/repository pair, zero when never seen
    #[must_use]
    pub fn count(&self, contributor: &str, repo: &str) -> u64 {
        self.counts
            .get(contributor)
            .and_then(|repos| repos.get(repo))
            .copied()
            .unwrap_or(0)
    }

    /// Fold another matrix into this one
    pub fn merge(&mut self, other: Self) {
        for (contributor, repos) in other.counts {
            let entry = self.counts.entry(contributor).or_default();
            for (repo, count) in repos {
                *entry.entry(repo).or_default() += count;
            }
        }
    }
}

/// Matched commits kept in full, keyed by contributor.
///
/// Entries are appended, never deduplicated; per-repository ingestion
/// order is preserved, ordering across repositories is not guaranteed.
#[derive(Debug, Clone, Default)]
pub struct MatchedLog {
    entries: HashMap<String, Vec<CommitRecord>>,
}

impl MatchedLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a matched commit to a contributor's log
    pub fn push(&mut self, contributor: &str, commit: CommitRecord) {
        self.entries
            .entry(contributor.to_string())
            .or_default()
            .push(commit);
    }

    /// Ordered commits recorded for a contributor
    #[must_use]
    pub fn commits_for(&self, contributor: &str) -> &[CommitRecord] {
        self.entries.get(contributor).map_or(&[], Vec::as_slice)
    }

    /// Fold another log into this one, appending per contributor
    pub fn merge(&mut self, other: Self) {
        for (contributor, commits) in other.entries {
            self.entries.entry(contributor).or_default().extend(commits);
        }
    }
}

/// Date window for domain counting: strictly after `begin`, and on or
/// before `end` when an end boundary is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Exclusive lower boundary
    pub begin: NaiveDate,
    /// Inclusive upper boundary, unbounded when `None`
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// Window open towards the future
    #[must_use]
    pub fn since(begin: NaiveDate) -> Self {
        Self { begin, end: None }
    }

    /// Window with both boundaries
    #[must_use]
    pub fn bounded(begin: NaiveDate, end: NaiveDate) -> Self {
        Self {
            begin,
            end: Some(end),
        }
    }

    /// Whether a date falls inside the window
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date > self.begin && self.end.is_none_or(|end| date <= end)
    }
}

/// Commit counts keyed by email domain, plus the [`TOTAL_KEY`] tally.
#[derive(Debug, Clone, Default)]
pub struct DomainCounts {
    counts: HashMap<String, u64>,
}

impl DomainCounts {
    /// Create an empty tally
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one commit into the tally if it falls inside the window.
    ///
    /// Records with a degraded (`None`) date never match. Each non-empty
    /// domain field increments its own key and `TOTAL` independently.
    pub fn record(&mut self, commit: &CommitRecord, window: &DateWindow) {
        let Some(date) = commit.date else { return };
        if !window.contains(date) {
            return;
        }
        for domain in commit.domains() {
            *self.counts.entry(domain.to_string()).or_default() += 1;
            *self.counts.entry(TOTAL_KEY.to_string()).or_default() += 1;
        }
    }

    /// Count for one domain key, zero when never seen
    #[must_use]
    pub fn get(&self, domain: &str) -> u64 {
        self.counts.get(domain).copied().unwrap_or(0)
    }

    /// The overall tally across all domains
    #[must_use]
    pub fn total(&self) -> u64 {
        self.get(TOTAL_KEY)
    }

    /// Number of keys, `TOTAL` included once non-empty
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been counted yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All rows sorted by domain key, for deterministic report output
    #[must_use]
    pub fn sorted_rows(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(domain, count)| (domain.as_str(), *count))
            .collect();
        rows.sort_unstable();
        rows
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: Self) {
        for (domain, count) in other.counts {
            *self.counts.entry(domain).or_default() += count;
        }
    }
}
