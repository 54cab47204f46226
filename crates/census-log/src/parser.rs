// Copyright (c) 2026 - present Commit Census contributors
// SPDX-License-Identifier: MIT

//! Commit-log parser
//!
//! A line-driven state machine over the textual output of `git log`. The
//! parser makes a single forward pass: it scans for an `Author:` line,
//! consumes the date line and the blank separator that follow it, then
//! accumulates body lines until a sign-off line, a `commit` boundary, or
//! end of input closes the record.
//!
//! Malformed input never fails the scan. Anomalies degrade the affected
//! fields (empty strings, `None` date) and are reported alongside the
//! records as [`ParseWarning`]s so callers can surface or ignore them.

use thiserror::Error;
use tracing::debug;

use crate::commit::CommitRecord;
use crate::line;

/// A tolerated anomaly encountered while parsing a log.
///
/// Warnings accompany degraded records; they are never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    /// An `Author:` line too short to carry a name
    #[error("malformed author line: {line:?}")]
    MalformedAuthorLine {
        /// The offending line
        line: String,
    },

    /// Input ended where a date line was expected
    #[error("missing date line after author {author:?}")]
    MissingDateLine {
        /// Author of the truncated commit
        author: String,
    },

    /// A date line whose tokens did not form a calendar date
    #[error("unparseable date line: {line:?}")]
    UnparseableDate {
        /// The offending line
        line: String,
    },
}

/// Records and warnings produced by one pass over a log.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Parsed commits, in log emission order
    pub commits: Vec<CommitRecord>,
    /// Anomalies tolerated during the pass
    pub warnings: Vec<ParseWarning>,
}

/// Parse a repository's commit log from a forward-only line sequence.
///
/// `repo` is stamped onto every record. Lines before the first `Author:`
/// line (including `commit <hash>` boundary markers) are skipped; a commit
/// still open at end of input is emitted with whatever was accumulated.
pub fn parse_log<I, S>(lines: I, repo: &str) -> ParseOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter();
    let mut outcome = ParseOutcome::default();

    while let Some(scan_line) = lines.next() {
        let scan_line = scan_line.as_ref();
        if line::first_token(scan_line) != "Author:" {
            continue;
        }

        let mut author = String::new();
        let mut co_author = String::new();
        let mut author_domain = String::new();
        let mut co_author_domain = String::new();

        // The two branches are mutually exclusive: a two-author line has no
        // usable email, a single-author line may carry a domain.
        if let Some((first, second)) = line::two_author(scan_line) {
            author = first;
            co_author = second;
        } else if let Some(name) = line::display_name(scan_line) {
            author = name;
            author_domain = line::email_domain(scan_line);
        } else {
            outcome.warnings.push(ParseWarning::MalformedAuthorLine {
                line: scan_line.to_string(),
            });
        }

        // The date line follows the author line unconditionally.
        let date = match lines.next() {
            Some(date_line) => {
                let date_line = date_line.as_ref();
                let date = line::commit_date(date_line);
                if date.is_none() {
                    outcome.warnings.push(ParseWarning::UnparseableDate {
                        line: date_line.to_string(),
                    });
                }
                date
            }
            None => {
                outcome.warnings.push(ParseWarning::MissingDateLine {
                    author: author.clone(),
                });
                None
            }
        };

        // Blank separator between the headers and the message body; its
        // content is not inspected.
        let _ = lines.next();

        let mut description = String::new();
        while let Some(body_line) = lines.next() {
            let body_line = body_line.as_ref();
            match line::first_token(body_line) {
                "Signed-off-by:" => {
                    // Overwrites any two-author co-author.
                    co_author = line::display_name(body_line).unwrap_or_default();
                    co_author_domain = line::email_domain(body_line);
                    break;
                }
                "commit" => break,
                _ => {
                    let trimmed = body_line.trim();
                    if !trimmed.is_empty() {
                        if !description.is_empty() {
                            description.push(' ');
                        }
                        description.push_str(trimmed);
                    }
                }
            }
        }

        outcome.commits.push(CommitRecord {
            author,
            co_author,
            date,
            description,
            repo: repo.to_string(),
            author_domain,
            co_author_domain,
        });
    }

    debug!(
        repo,
        commits = outcome.commits.len(),
        warnings = outcome.warnings.len(),
        "parsed commit log"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use similar_asserts::assert_eq;

    const TWO_COMMIT_LOG: &str = "
Author: Maria Shaldibina <mshaldibina@pivotal.io>
Date:   Thu Oct 15 09:43:35 2015 -0700

    Merge branch 'master' into hotfix-postgres

    Signed-off-by: Tyler Schultz <tschultz@pivotal.io>

commit 7ce9e8b628034446c28b4955863386fbf4aa8c1d
Author: Devin Fallak <dfallak@pivotal.io>
Date:   Wed Oct 14 15:44:34 2015 -0400

    Update README.md

";

    #[test]
    fn test_parses_each_author_block() {
        let outcome = parse_log(TWO_COMMIT_LOG.lines(), "repo1");
        assert_eq!(outcome.commits.len(), 2);
        assert!(outcome.warnings.is_empty());

        let first = &outcome.commits[0];
        assert_eq!(first.author, "Maria Shaldibina");
        assert_eq!(first.description, "Merge branch 'master' into hotfix-postgres");
        assert_eq!(first.repo, "repo1");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2015, 10, 15));

        let second = &outcome.commits[1];
        assert_eq!(second.author, "Devin Fallak");
        assert_eq!(second.description, "Update README.md");
        assert_eq!(second.date, NaiveDate::from_ymd_opt(2015, 10, 14));
    }

    #[test]
    fn test_sign_off_sets_co_author_and_domain() {
        let outcome = parse_log(TWO_COMMIT_LOG.lines(), "repo1");
        let first = &outcome.commits[0];
        assert_eq!(first.co_author, "Tyler Schultz");
        assert_eq!(first.co_author_domain, "pivotal.io");
        assert_eq!(first.author_domain, "pivotal.io");
    }

    #[test]
    fn test_commit_boundary_leaves_co_author_empty() {
        let outcome = parse_log(TWO_COMMIT_LOG.lines(), "repo1");
        let second = &outcome.commits[1];
        assert_eq!(second.co_author, "");
        assert_eq!(second.co_author_domain, "");
    }

    #[test]
    fn test_two_author_line() {
        let log = "
Author: Chris Piraino and Yu Zhang <cpiraino@pivotal.io>
Date:   Thu Oct 15 09:43:35 2015 -0700

    Add route services
";
        let outcome = parse_log(log.lines(), "routing");
        assert_eq!(outcome.commits.len(), 1);

        let commit = &outcome.commits[0];
        assert_eq!(commit.author, "Chris Piraino");
        assert_eq!(commit.co_author, "Yu Zhang");
        // No usable email in the two-author branch.
        assert_eq!(commit.author_domain, "");
    }

    #[test]
    fn test_sign_off_overrides_two_author_co_author() {
        let log = "
Author: Chris Piraino and Yu Zhang <cpiraino@pivotal.io>
Date:   Thu Oct 15 09:43:35 2015 -0700

    Add route services

    Signed-off-by: Min Su Han <glide1@gmail.com>
";
        let outcome = parse_log(log.lines(), "routing");
        let commit = &outcome.commits[0];
        assert_eq!(commit.co_author, "Min Su Han");
        assert_eq!(commit.co_author_domain, "gmail.com");
    }

    #[test]
    fn test_boundary_before_first_author_is_skipped() {
        let log = "\
commit 7ce9e8b628034446c28b4955863386fbf4aa8c1d
Author: Devin Fallak <dfallak@pivotal.io>
Date:   Wed Oct 14 15:44:34 2015 -0400

    Update README.md
";
        let outcome = parse_log(log.lines(), "repo1");
        assert_eq!(outcome.commits.len(), 1);
        assert_eq!(outcome.commits[0].author, "Devin Fallak");
    }

    #[test]
    fn test_multi_line_description_joined_with_single_spaces() {
        let log = "
Author: Devin Fallak <dfallak@pivotal.io>
Date:   Wed Oct 14 15:44:34 2015 -0400

    Update README.md

    Document the new buildpack pipeline
    and its caveats.
";
        let outcome = parse_log(log.lines(), "repo1");
        assert_eq!(
            outcome.commits[0].description,
            "Update README.md Document the new buildpack pipeline and its caveats."
        );
    }

    #[test]
    fn test_truncated_input_emits_open_commit() {
        let log = "\
Author: Devin Fallak <dfallak@pivotal.io>
Date:   Wed Oct 14 15:44:34 2015 -0400

    Update README.md";
        let outcome = parse_log(log.lines(), "repo1");
        assert_eq!(outcome.commits.len(), 1);
        assert_eq!(outcome.commits[0].description, "Update README.md");
    }

    #[test]
    fn test_input_ending_at_date_line() {
        let log = "\
Author: Devin Fallak <dfallak@pivotal.io>
Date:   Wed Oct 14 15:44:34 2015 -0400";
        let outcome = parse_log(log.lines(), "repo1");
        assert_eq!(outcome.commits.len(), 1);
        assert_eq!(outcome.commits[0].date, NaiveDate::from_ymd_opt(2015, 10, 14));
        assert_eq!(outcome.commits[0].description, "");
    }

    #[test]
    fn test_unparseable_date_degrades_with_warning() {
        let log = "\
Author: Devin Fallak <dfallak@pivotal.io>
garbage where the date should be

    Update README.md
";
        let outcome = parse_log(log.lines(), "repo1");
        assert_eq!(outcome.commits.len(), 1);
        assert_eq!(outcome.commits[0].date, None);
        assert_eq!(outcome.commits[0].author, "Devin Fallak");
        assert!(matches!(
            outcome.warnings[0],
            ParseWarning::UnparseableDate { .. }
        ));
    }

    #[test]
    fn test_missing_date_line_at_end_of_input() {
        let log = "Author: Devin Fallak <dfallak@pivotal.io>";
        let outcome = parse_log(log.lines(), "repo1");
        assert_eq!(outcome.commits.len(), 1);
        assert_eq!(outcome.commits[0].date, None);
        assert_eq!(
            outcome.warnings,
            vec![ParseWarning::MissingDateLine {
                author: "Devin Fallak".to_string()
            }]
        );
    }

    #[test]
    fn test_malformed_author_line_degrades_with_warning() {
        let log = "\
Author: X
Date:   Wed Oct 14 15:44:34 2015 -0400

    Update README.md
";
        let outcome = parse_log(log.lines(), "repo1");
        assert_eq!(outcome.commits.len(), 1);
        assert_eq!(outcome.commits[0].author, "");
        assert_eq!(outcome.commits[0].date, NaiveDate::from_ymd_opt(2015, 10, 14));
        assert!(matches!(
            outcome.warnings[0],
            ParseWarning::MalformedAuthorLine { .. }
        ));
    }

    #[test]
    fn test_empty_input() {
        let outcome = parse_log(std::iter::empty::<&str>(), "repo1");
        assert!(outcome.commits.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_warning_display() {
        let warning = ParseWarning::MissingDateLine {
            author: "Devin Fallak".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "missing date line after author \"Devin Fallak\""
        );
    }
}
