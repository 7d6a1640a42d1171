//! Progress reporting for collection runs.
//!
//! The driver only emits events; front-ends decide how to show them.
//! Implementations must be `Sync` because events arrive from worker threads.

use std::path::Path;

pub trait Progress: Sync {
    /// The listing was fetched and `total` entities will be collected.
    fn listing_fetched(&self, _total: usize) {}

    /// Emitted each time another ten entities have been processed.
    fn collected(&self, _done: usize, _total: usize) {}

    /// A record was abandoned; the run continues.
    fn skipped(&self, _name: &str, _reason: &str) {}

    /// The table was written to `path`.
    fn finished(&self, _rows: usize, _path: &Path) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Human-readable progress lines on stdout.
pub struct StdoutProgress;

impl Progress for StdoutProgress {
    fn listing_fetched(&self, total: usize) {
        println!("API request is successful.");
        println!("There are {total} celebrities who have Celebrity Bucks values!");
    }

    fn collected(&self, done: usize, total: usize) {
        println!("{done} celebrities out of {total} collected!");
    }

    fn skipped(&self, name: &str, _reason: &str) {
        println!("Unable to add record for {name} to data frame.");
    }

    fn finished(&self, rows: usize, path: &Path) {
        println!("Done!");
        println!("Wrote {rows} rows to {}", path.display());
    }
}
