//! CSV report writers
//!
//! Three report shapes, all rendered with the `csv` crate over any
//! `io::Write`: the contributor-by-repository matrix, the matched commit
//! log, and the per-domain counts. Column and row order for the first two
//! follow the settings file; domain rows are written in sorted key order
//! (the contract leaves them unspecified).

use std::io::Write;

use census_log::aggregate::{ContributionMatrix, DomainCounts, MatchedLog};
use thiserror::Error;

use crate::config::Settings;

/// Report rendering failures; fatal, no partial file is kept.
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV serialization or underlying I/O failure
    #[error("failed to write report: {0}")]
    Csv(#[from] csv::Error),

    /// Flush failure on the underlying writer
    #[error("failed to flush report: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the contributor-by-repository matrix.
///
/// Header row is an empty cell followed by repository names; one row per
/// contributor with a count per repository, zeros included.
pub fn write_matrix<W: Write>(
    writer: W,
    settings: &Settings,
    matrix: &ContributionMatrix,
) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(settings.repositories.iter().map(|r| r.name.clone()));
    csv.write_record(&header)?;

    for contributor in &settings.contributors {
        let mut row = vec![contributor.name.clone()];
        row.extend(
            settings
                .repositories
                .iter()
                .map(|repo| matrix.count(&contributor.name, &repo.name).to_string()),
        );
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the matched commit log, in per-contributor (settings order) then
/// per-commit order.
pub fn write_matched_log<W: Write>(
    writer: W,
    settings: &Settings,
    log: &MatchedLog,
) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["Author", "CoAuthor", "Code Repo", "Commit Description"])?;
    for contributor in &settings.contributors {
        for commit in log.commits_for(&contributor.name) {
            csv.write_record([
                commit.author.as_str(),
                commit.co_author.as_str(),
                commit.repo.as_str(),
                commit.description.as_str(),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}

/// Write the per-domain counts, one `<domain>,<count>` row per key, the
/// `TOTAL` row included.
pub fn write_domain_counts<W: Write>(writer: W, counts: &DomainCounts) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);

    for (domain, count) in counts.sorted_rows() {
        csv.write_record([domain, &count.to_string()])?;
    }

    csv.flush()?;
    Ok(())
}
