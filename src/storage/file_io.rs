//! File I/O utilities with atomic writes
//!
//! Every failure here is reported as [`GastosError::Io`]; deciding whether
//! file *contents* are acceptable is left to the caller.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::GastosError;

/// Read a whole file as text, returning `None` if it doesn't exist
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<Option<String>, GastosError> {
    let path = path.as_ref();

    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GastosError::Io(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all. Output is
/// pretty-printed with two-space indentation and non-ASCII text kept as-is.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), GastosError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            GastosError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| GastosError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| GastosError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| GastosError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| GastosError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GastosError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
