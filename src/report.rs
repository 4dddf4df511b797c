use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that may occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to create report file '{path}': {source}")]
    FileCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report: {0}")]
    Write(#[source] std::io::Error),
}

/// Serializes `report` as pretty JSON followed by a newline.
///
/// # Arguments
///
/// * `writer` - Destination, e.g. stdout.
/// * `report` - Any serializable report.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: W,
    report: &T,
) -> Result<(), ReportError> {
    let json_output = serde_json::to_string_pretty(report)?;
    let mut writer = BufWriter::new(writer);
    writer
        .write_all(json_output.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .and_then(|()| writer.flush())
        .map_err(ReportError::Write)
}

/// Creates `path` and writes `report` into it as pretty JSON.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, report: &T) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|source| ReportError::FileCreation {
        path: path.to_path_buf(),
        source,
    })?;
    write_json(file, report)
}
