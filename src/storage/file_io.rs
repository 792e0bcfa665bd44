//! JSON file access for the data directory
//!
//! Reads treat a missing file as an empty collection. Writes go to a sibling
//! `.tmp` file that is synced and then renamed over the target.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::FoodCostError;

fn storage_error(what: &str, path: &Path, e: impl std::fmt::Display) -> FoodCostError {
    FoodCostError::Storage(format!("Failed to {} {}: {}", what, path.display(), e))
}

/// Load `T` from a JSON file, or `T::default()` if there is no file yet
pub fn read_json<T, P>(path: P) -> Result<T, FoodCostError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no data file yet");
            return Ok(T::default());
        }
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with the pretty-printed JSON of `data`
///
/// On failure the previous contents of `path` are left as they were.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FoodCostError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;
    }

    let staging = path.with_extension("json.tmp");
    let result = write_synced(&staging, data).and_then(|()| {
        fs::rename(&staging, path).map_err(|e| storage_error("replace", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    } else {
        debug!(path = %path.display(), "saved");
    }
    result
}

fn write_synced<T: Serialize>(path: &Path, data: &T) -> Result<(), FoodCostError> {
    let file = File::create(path).map_err(|e| storage_error("create", path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize into", path, e))?;
    writer.flush().map_err(|e| storage_error("write", path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", path, e))
}
