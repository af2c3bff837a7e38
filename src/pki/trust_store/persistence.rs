use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::pki::trust_store::error::TrustStoreError;

/// Write `contents` to `path`, replacing any existing file.
///
/// With `atomic` set the data goes to a temporary file in the same directory
/// which is then renamed over `path`, so readers never observe a partial
/// trust store. The temporary file is removed on every error path.
/// Symlinks are resolved first so the file they point to is replaced, not the link.
pub fn write_file(path: &Path, contents: &[u8], atomic: bool) -> Result<(), TrustStoreError> {
    if !atomic {
        return fs::write(path, contents).map_err(|e| TrustStoreError::write(path, e));
    }

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| TrustStoreError::write(path, e))?;
    debug!("Staging {} via {}", target.display(), tmp.path().display());

    // Keep the mode of the file being replaced instead of the 0600 temp default
    if let Ok(metadata) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| TrustStoreError::write(path, e))?;
    }

    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| TrustStoreError::write(path, e))?;

    tmp.persist(&target)
        .map_err(|e| TrustStoreError::write(path, e.error))?;
    Ok(())
}

/// Copy `path` to `backup` before it gets overwritten.
pub fn backup_file(path: &Path, backup: &Path) -> Result<(), TrustStoreError> {
    fs::copy(path, backup)
        .map(|_| ())
        .map_err(|e| TrustStoreError::write(backup, e))
}
