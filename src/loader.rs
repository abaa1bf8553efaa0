//! CSV loading into typed records.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Reads a header-bearing delimited file into a vector of typed rows.
///
/// Columns are matched by header name, so source files may carry columns the
/// record type does not declare. A missing file or a missing declared column
/// is an error and aborts the run.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: T =
            result.with_context(|| format!("failed to read a row from {}", path.display()))?;
        rows.push(record);
    }

    debug!(path = %path.display(), rows = rows.len(), "CSV loaded");
    Ok(rows)
}
