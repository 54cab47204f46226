//! Commit record types and operations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single commit reconstructed from a repository's textual log.
///
/// Records are created by the parser, never mutated afterwards, and consumed
/// by the aggregators. Optional string fields use the empty string for
/// "absent", matching the log format they come from; the date uses `None`
/// as the explicit degraded outcome for a missing or unparseable date line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Primary author display name ("First Last")
    pub author: String,
    /// Secondary contributor name, from a sign-off line or a two-author
    /// author line; empty if none
    pub co_author: String,
    /// Authored date at day granularity
    pub date: Option<NaiveDate>,
    /// Whitespace-normalized commit message body
    pub description: String,
    /// Name of the repository this commit came from
    pub repo: String,
    /// Domain portion of the author's email; always empty in the two-author
    /// branch, which carries no usable address
    pub author_domain: String,
    /// Domain portion of the co-author's email, filled only from a sign-off
    /// line
    pub co_author_domain: String,
}

impl CommitRecord {
    /// Check whether a tracked name is the author or the co-author
    #[must_use]
    pub fn involves(&self, name: &str) -> bool {
        self.author == name || self.co_author == name
    }

    /// Check whether a secondary contributor was recorded
    #[must_use]
    pub fn has_co_author(&self) -> bool {
        !self.co_author.is_empty()
    }

    /// Non-empty email domains carried by this record, author first
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        [self.author_domain.as_str(), self.co_author_domain.as_str()]
            .into_iter()
            .filter(|d| !d.is_empty())
    }
}
