// Copyright (c) 2026 - present Commit Census contributors
// SPDX-License-Identifier: MIT

//! census-log: commit-log parsing and aggregation for commit-census
//!
//! This library crate turns the line-oriented textual output of `git log`
//! into structured commit records and folds those records into the
//! contributor and domain statistics the reporting binary emits.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use census_log::parser::parse_log;
//!
//! let log = "\
//! Author: Maria Shaldibina <mshaldibina@pivotal.io>
//! Date:   Thu Oct 15 09:43:35 2015 -0700
//!
//!     Update README.md
//! ";
//!
//! let outcome = parse_log(log.lines(), "docs");
//! assert_eq!(outcome.commits[0].author, "Maria Shaldibina");
//! assert_eq!(outcome.commits[0].author_domain, "pivotal.io");
//! ```

pub mod aggregate;
pub mod commit;
pub mod line;
pub mod parser;

pub use aggregate::{ContributionMatrix, Contributor, DateWindow, DomainCounts, MatchedLog};
pub use commit::CommitRecord;
pub use parser::{ParseOutcome, ParseWarning, parse_log};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::{
        ContributionMatrix, Contributor, DateWindow, DomainCounts, MatchedLog,
        matched_contributor,
    };
    pub use crate::commit::CommitRecord;
    pub use crate::parser::{ParseOutcome, ParseWarning, parse_log};
}
