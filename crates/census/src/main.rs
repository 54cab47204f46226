// Copyright (c) 2026 - present Commit Census contributors
// SPDX-License-Identifier: MIT

//! census: contributor and domain commit statistics across repositories
//!
//! This binary fetches the commit history of a configured set of source
//! repositories through an external helper, parses the textual logs into
//! commit records, and writes aggregate CSV reports.

use std::fs::{self, File};

use anyhow::{Context, Result};
use census_log::aggregate::DateWindow;
use clap::Parser;
use tracing::info;

use census::config::{Cli, Command, Settings, load_repo_list};
use census::fetch::Fetcher;
use census::report::{write_domain_counts, write_matched_log, write_matrix};
use census::run::{contributor_run, domain_run};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli.log_level().into()),
        )
        .init();

    fs::create_dir_all(&cli.work_dir)
        .with_context(|| format!("creating work directory {}", cli.work_dir.display()))?;
    let fetcher = Fetcher::new(&cli.fetch_command, &cli.work_dir);

    match cli.command {
        Command::Contributors { ref settings } => {
            info!(path = %settings.display(), "reading settings file");
            let settings = Settings::load(settings)?;

            let report = contributor_run(&settings, &fetcher).await?;

            let matrix_path = cli.work_dir.join("result.csv");
            write_matrix(File::create(&matrix_path)?, &settings, &report.matrix)?;
            info!(path = %matrix_path.display(), "wrote contributor matrix");

            let log_path = cli.work_dir.join("result_log.csv");
            write_matched_log(File::create(&log_path)?, &settings, &report.log)?;
            info!(path = %log_path.display(), "wrote matched commit log");
        }
        Command::Domains {
            ref repos,
            begin,
            end,
            concurrency,
        } => {
            info!(path = %repos.display(), "reading repository list");
            let repos = load_repo_list(repos)?;
            let window = match end {
                Some(end) => DateWindow::bounded(begin, end),
                None => DateWindow::since(begin),
            };

            let counts = domain_run(repos, &fetcher, window, concurrency).await?;

            let counts_path = cli.work_dir.join("total_count.csv");
            write_domain_counts(File::create(&counts_path)?, &counts)?;
            info!(
                path = %counts_path.display(),
                domains = counts.len(),
                total = counts.total(),
                "wrote domain counts"
            );
        }
    }

    Ok(())
}
