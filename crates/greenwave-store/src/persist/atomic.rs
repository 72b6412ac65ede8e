//! Atomic write primitive
//!
//! Uses temp→fsync→rename so no partial file is ever visible at the target path

use crate::errors::{io_error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Atomically replace `target_path` with `content`
///
/// The temp file sits next to the target (same filesystem) with an extra
/// `.tmp` suffix. A crash before the rename leaves the old target intact.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_data_dir", e))?;
    }

    let mut temp_name = target_path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let mut file = File::create(temp_path).map_err(|e| io_error("create_temp", e))?;
    file.write_all(content)
        .map_err(|e| io_error("write_temp", e))?;
    file.sync_all().map_err(|e| io_error("sync_temp", e))?;
    drop(file);

    fs::rename(temp_path, target_path).map_err(|e| io_error("rename_temp", e))?;

    Ok(())
}
