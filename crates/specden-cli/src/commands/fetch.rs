use anyhow::Result;
use std::path::Path;
use tracing::debug;

use specden_core::error::{FetchError, SpecdenError};
use specden_core::fetcher::fetch_all_sources;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let report = match fetch_all_sources(config_path).await {
        Ok(report) => report,
        Err(SpecdenError::Fetch(FetchError::KaggleNotFound)) => {
            println!("Error: {}", FetchError::KaggleNotFound);
            return Ok(());
        }
        Err(SpecdenError::Config(e)) => {
            println!("Error: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let succeeded = report.outcomes.iter().filter(|o| o.result.is_ok()).count();
    let failed: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| o.result.is_err())
        .collect();
    debug!("fetch finished: {} succeeded, {} failed", succeeded, failed.len());

    println!("\n=== Fetch Complete ===");
    println!("Succeeded: {}", succeeded);
    println!("Failed: {}", failed.len());

    if !failed.is_empty() {
        println!("\nFailed sources:");
        for outcome in &failed {
            if let Err(e) = &outcome.result {
                println!("  {} - {}", outcome.name, e);
            }
        }
    }

    if report.aborted() {
        println!("\nRun aborted: the kaggle CLI went missing mid-run; remaining sources were skipped.");
    }

    Ok(())
}
