use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

use crate::domain::AppError;

/// One package/image row. All logical columns are total: a column the
/// source did not provide is the empty string, never absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub version: String,
    pub sha256: String,
    pub date: String,
}

impl Record {
    pub fn from_row(row: &HashMap<String, String>) -> Self {
        let field = |key: &str| row.get(key).cloned().unwrap_or_default();
        Record {
            name: field("Name"),
            version: field("Version"),
            sha256: field("Sha256"),
            date: field("Date"),
        }
    }
}

/// Parse comma-delimited text into one column-name -> value map per data
/// row. The first line is the header. Headers and values are trimmed and
/// bound positionally; a short row pads missing trailing columns with "".
/// There is no quoting support, a comma inside a value shifts the
/// columns after it.
pub fn parse_delimited(raw: &str) -> Vec<HashMap<String, String>> {
    let mut lines = raw.trim().split('\n');
    let headers: Vec<&str> = match lines.next() {
        Some(header_line) => header_line.split(',').map(str::trim).collect(),
        None => return Vec::new(),
    };

    lines
        .map(|line| {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = values.get(idx).copied().unwrap_or("");
                    (header.to_string(), value.to_string())
                })
                .collect()
        })
        .collect()
}

/// Read and parse a single source file in one go.
pub fn load_source(path: &Path) -> Result<Vec<Record>, AppError> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::FileNotFound,
        ErrorKind::PermissionDenied => AppError::PermissionDenied,
        _ => AppError::IoError(e),
    })?;

    let records: Vec<Record> = parse_delimited(&raw).iter().map(Record::from_row).collect();
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub struct LoadOutcome {
    pub records: Vec<Record>,
    pub failed: usize,
    pub total: usize,
}

impl LoadOutcome {
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.failed == self.total
    }
}

/// Load every source concurrently and concatenate the results in the
/// order the sources were given, not the order the reads finish in. A
/// source that fails to read is logged and contributes nothing; only the
/// caller decides whether losing all of them is fatal.
pub fn merge_all(sources: &[PathBuf]) -> LoadOutcome {
    let start_time = Instant::now();

    let results: Vec<Result<Vec<Record>, AppError>> =
        sources.par_iter().map(|path| load_source(path)).collect();

    let mut records = Vec::new();
    let mut failed = 0;
    for (path, result) in sources.iter().zip(results) {
        match result {
            Ok(rows) => records.extend(rows),
            Err(e) => {
                error!("Error loading {}: {:?}", path.display(), e);
                failed += 1;
            }
        }
    }

    info!(
        "Loaded {} total records from {}/{} sources in {}ms",
        records.len(),
        sources.len() - failed,
        sources.len(),
        start_time.elapsed().as_millis()
    );

    LoadOutcome {
        records,
        failed,
        total: sources.len(),
    }
}
