// fluxcheck-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Replaces `path` in one step: readers of a ledger never see a half-written file.
/// The temporary file lives next to the target so the final rename stays on one device.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(content.as_ref())?;
    staged
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;
    debug!(path = ?path, "Written");
    Ok(())
}

/// Move a file, creating the destination directory. Never overwrites: an existing
/// destination is an error and the source is left untouched.
///
/// The destination is claimed with a hard link, which the OS refuses when the name is
/// taken. Where links are not possible (other device, unsupported filesystem) the
/// destination is created with `create_new` and the bytes copied in.
pub fn move_without_overwrite(source: &Path, destination: &Path) -> Result<(), InfrastructureError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    match fs::hard_link(source, destination) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(InfrastructureError::DestinationExists(destination.to_path_buf()));
        }
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(InfrastructureError::Io(e)),
        Err(e) => {
            debug!(from = ?source, to = ?destination, error = %e, "Hard link refused, copying");
            copy_new(source, destination)?;
        }
    }
    fs::remove_file(source)?;
    Ok(())
}

fn copy_new(source: &Path, destination: &Path) -> Result<(), InfrastructureError> {
    let mut input = File::open(source)?;
    let mut output = match OpenOptions::new().write(true).create_new(true).open(destination) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(InfrastructureError::DestinationExists(destination.to_path_buf()));
        }
        Err(e) => return Err(InfrastructureError::Io(e)),
    };
    // Partial copy: remove what we created, the source is still there.
    if let Err(e) = io::copy(&mut input, &mut output).and_then(|_| output.sync_all()) {
        drop(output);
        let _ = fs::remove_file(destination);
        return Err(InfrastructureError::Io(e));
    }
    Ok(())
}

/// Regular files directly under `dir`, sorted by file name. Missing directory: empty list.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, InfrastructureError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| InfrastructureError::Io(e.into()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Regular files at any depth under `dir`, sorted by path.
pub fn list_files_recursive(dir: &Path) -> Result<Vec<PathBuf>, InfrastructureError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| InfrastructureError::Io(e.into()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
