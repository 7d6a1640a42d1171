//! Export the collected table to CSV.
//!
//! One file per run, named after the collection time, with the fixed
//! 15-column header.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::domain::{COLUMNS, ResultTable};
use crate::error::AppError;

/// `celebrity_data_attributes_2020-11-5_9_7_3.csv` (unpadded components).
pub fn export_file_name(at: NaiveDateTime) -> String {
    format!(
        "celebrity_data_attributes_{}.csv",
        at.format("%Y-%-m-%-d_%-H_%-M_%-S")
    )
}

/// Write the table into `out_dir`, creating it if needed. Returns the path.
pub fn write_table_csv(out_dir: &Path, table: &ResultTable, at: NaiveDateTime) -> Result<PathBuf, AppError> {
    create_dir_all(out_dir)
        .map_err(|e| AppError::config(format!("Failed to create output dir '{}': {e}", out_dir.display())))?;

    let path = out_dir.join(export_file_name(at));
    write_rows(&path, table)?;
    Ok(path)
}

fn write_rows(path: &Path, table: &ResultTable) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::config(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(COLUMNS)
        .map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;

    for record in &table.rows {
        writer
            .write_record(record.to_row())
            .map_err(|e| AppError::config(format!("Failed to write export CSV row for '{}': {e}", record.name)))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::config(format!("Failed to flush export CSV '{}': {e}", path.display())))?;
    Ok(())
}
