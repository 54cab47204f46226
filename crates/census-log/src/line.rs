// Copyright (c) 2026 - present Commit Census contributors
// SPDX-License-Identifier: MIT

//! Per-line-kind classifiers for commit-log text
//!
//! The log format is positional: names are two whitespace-delimited tokens,
//! the email is the bracketed last token, the date line has a fixed token
//! layout. Each classifier owns the brittleness of one line kind so the
//! parser's scan loop stays free of token arithmetic.

use chrono::NaiveDate;

/// First whitespace-delimited token of a line, `""` for blank lines.
///
/// Classification only ever inspects this token, so short or malformed
/// lines are tolerated everywhere.
#[must_use]
pub fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

/// Extract both names from a two-author line.
///
/// Returns `Some((author, co_author))` iff the token at position 3
/// (0-based, counting the `Author:` label) is the literal `and` and both
/// names are complete: `Author: Chris Piraino and Yu Zhang <..>`.
/// No email domain is usable in this branch.
#[must_use]
pub fn two_author(line: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() >= 6 && tokens[3] == "and" {
        Some((
            format!("{} {}", tokens[1], tokens[2]),
            format!("{} {}", tokens[4], tokens[5]),
        ))
    } else {
        None
    }
}

/// Extract a "First Last" display name from an `Author:` or
/// `Signed-off-by:` line (both share the `<label> <name> <name> <email>`
/// shape). Returns `None` when fewer than three tokens are present.
#[must_use]
pub fn display_name(line: &str) -> Option<String> {
    let mut tokens = line.split_whitespace().skip(1);
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        _ => None,
    }
}

/// Extract the email domain from the last token of a line.
///
/// The token must split on `@` into exactly two parts; a trailing `>` from
/// the bracketed address is stripped. Anything else yields `""`.
#[must_use]
pub fn email_domain(line: &str) -> String {
    let Some(last) = line.split_whitespace().next_back() else {
        return String::new();
    };
    let mut parts = last.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(domain), None) => {
            domain.strip_suffix('>').unwrap_or(domain).to_string()
        }
        _ => String::new(),
    }
}

/// Parse a `Date:   <Weekday> <Month> <Day> <Time> <Year> <TZ>` line into
/// a calendar date. Time of day and timezone offset are discarded; only
/// day granularity is kept for window filtering.
///
/// Returns `None` on any shape or calendar failure; the caller records the
/// degraded outcome.
#[must_use]
pub fn commit_date(line: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 6 {
        return None;
    }
    let (month, day, year) = (tokens[2], tokens[3], tokens[5]);
    NaiveDate::parse_from_str(&format!("{year}-{month}-{day}"), "%Y-%b-%d").ok()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a single name token (no whitespace)
    fn name_token() -> impl Strategy<Value = String> {
        "[A-Za-z]{1,12}"
    }

    proptest! {
        /// Property: first_token never contains whitespace and is a prefix
        /// of the trimmed line
        #[test]
        fn prop_first_token_shape(line in ".{0,80}") {
            let token = first_token(&line);
            prop_assert!(!token.chars().any(char::is_whitespace));
            prop_assert!(line.trim_start().starts_with(token));
        }

        /// Property: a well-formed author line round-trips name and domain
        #[test]
        fn prop_author_line_extraction(
            first in name_token(),
            last in name_token(),
            user in "[a-z]{1,10}",
            domain in "[a-z]{1,10}\\.[a-z]{2,4}",
        ) {
            let line = format!("Author: {first} {last} <{user}@{domain}>");
            prop_assert_eq!(display_name(&line), Some(format!("{first} {last}")));
            prop_assert_eq!(email_domain(&line), domain);
        }

        /// Property: the two-author branch never yields a domain
        #[test]
        fn prop_two_author_names(
            a1 in name_token(), a2 in name_token(),
            b1 in name_token(), b2 in name_token(),
        ) {
            let line = format!("Author: {a1} {a2} and {b1} {b2}");
            prop_assert_eq!(
                two_author(&line),
                Some((format!("{a1} {a2}"), format!("{b1} {b2}")))
            );
        }

        /// Property: classifiers never panic on arbitrary input
        #[test]
        fn prop_classifiers_total(line in ".{0,200}") {
            let _ = first_token(&line);
            let _ = display_name(&line);
            let _ = two_author(&line);
            let _ = email_domain(&line);
            let _ = commit_date(&line);
        }
    }
}
