//! JSON serialization of exported records

use serde::Serialize;
use std::io::Write;

use super::{OutputError, OutputResult};

/// Write `records` as a pretty-printed JSON array
pub fn write_records<W, T>(mut writer: W, records: &[T]) -> OutputResult<usize>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| OutputError::SerializationError(e.to_string()))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| OutputError::FlushError(e.to_string()))?;
    Ok(records.len())
}
