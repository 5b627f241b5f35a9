use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{ArchiveWriteError, DataLoadError};
use crate::validate::MatchRecord;

pub const DEFAULT_ARCHIVE_FILE: &str = "last_week_matches.json";

/// Overwrites `path` with this period's results.
pub fn archive(records: &[MatchRecord], path: &Path) -> Result<(), ArchiveWriteError> {
    let wrap = |source: io::Error| ArchiveWriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut json = Vec::with_capacity(256 * records.len().max(1));
    let mut ser = serde_json::Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut ser)
        .map_err(|err| wrap(io::Error::new(io::ErrorKind::InvalidData, err)))?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(wrap)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json).map_err(wrap)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(wrap(err));
    }
    Ok(())
}

pub fn load_archive(path: &Path) -> Result<Vec<MatchRecord>, DataLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
