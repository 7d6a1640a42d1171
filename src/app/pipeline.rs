//! Shared collection pipeline used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! feed fetch -> per-entity page fetches + extraction -> table -> CSV export
//!
//! Per-entity work runs on a bounded rayon pool. The indexed parallel
//! iterator collects results in listing order regardless of which worker
//! finishes first, and the per-host throttles in the source keep the request
//! rate polite.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::data::{CelebritySource, HttpSource, SourceConfig};
use crate::domain::{CollectConfig, EntityListing, ResultTable};
use crate::error::AppError;
use crate::progress::Progress;
use crate::record::assemble_record;

const PROGRESS_EVERY: usize = 10;

/// All outputs of a single `celeb collect` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub listing: EntityListing,
    pub table: ResultTable,
    pub export_path: PathBuf,
}

/// Execute the full collection against the live endpoints.
pub fn run_collection(config: &CollectConfig, progress: &dyn Progress) -> Result<RunOutput, AppError> {
    let source = HttpSource::new(SourceConfig::from_env(config.min_interval))?;
    run_collection_with_source(&source, config, progress)
}

/// Execute the collection against any source.
pub fn run_collection_with_source<S: CelebritySource + ?Sized>(
    source: &S,
    config: &CollectConfig,
    progress: &dyn Progress,
) -> Result<RunOutput, AppError> {
    // 1) The listing is the only fatal fetch.
    let listing = source.fetch_listing()?;
    let listing = match config.limit {
        Some(n) => listing.truncated(n),
        None => listing,
    };
    progress.listing_fetched(listing.len());

    // 2) One record per entity, in rank order.
    let table = collect_table(source, &listing, config, progress)?;

    // 3) Export.
    let export_path = crate::io::export::write_table_csv(&config.out_dir, &table, Local::now().naive_local())?;
    info!(rows = table.len(), path = %export_path.display(), "exported table");
    progress.finished(table.len(), &export_path);

    Ok(RunOutput {
        listing,
        table,
        export_path,
    })
}

/// Assemble a record for every listed entity.
///
/// Records that fail under the configured policy are dropped with a warning;
/// the remaining rows keep their relative order.
pub fn collect_table<S: CelebritySource + ?Sized>(
    source: &S,
    listing: &EntityListing,
    config: &CollectConfig,
    progress: &dyn Progress,
) -> Result<ResultTable, AppError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers.max(1))
        .build()
        .map_err(|e| AppError::config(format!("Failed to start worker pool: {e}")))?;

    let total = listing.len();
    // Counting and reporting share one lock so progress lines stay in order.
    let done = Mutex::new(0usize);

    let rows = pool.install(|| {
        listing
            .entries()
            .par_iter()
            .map(|entry| {
                let now = Local::now().naive_local();
                let outcome = assemble_record(source, listing, &entry.name, config.policy, now);

                let record = match outcome {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(celebrity = %entry.name, error = %e, "unable to add record");
                        progress.skipped(&entry.name, e.message());
                        None
                    }
                };

                let mut finished = done.lock().unwrap_or_else(PoisonError::into_inner);
                *finished += 1;
                if *finished % PROGRESS_EVERY == 0 {
                    progress.collected(*finished, total);
                }
                record
            })
            .collect::<Vec<_>>()
    });

    Ok(ResultTable {
        rows: rows.into_iter().flatten().collect(),
    })
}
