//! Entry table snapshots using `MessagePack`.
//!
//! A snapshot stores a parsed table, labels included, so later runs can skip
//! parsing.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use bibtable_foundation::{Error, ErrorKind, Result};
use bibtable_storage::EntryTable;

/// Serializes a table to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(table: &EntryTable) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(table).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a table from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a table snapshot.
pub fn from_bytes(bytes: &[u8]) -> Result<EntryTable> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Saves a table snapshot, overwriting any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(table: &EntryTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(table)?;
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;
    Ok(())
}

/// Loads a table snapshot.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a snapshot.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<EntryTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;
    from_bytes(&bytes)
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> Error {
    Error::new(ErrorKind::Io(format!(
        "failed to {action} file '{}': {err}",
        path.display()
    )))
}
