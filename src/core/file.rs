//! Purpose: Open the fixed-name example file for reading.
//! Exports: `DEFAULT_FILE_NAME`, `open_file`, `open_file_in`.
//! Role: Thin wrapper over the platform open; the caller owns the returned handle.
//! Invariants: Platform errors are returned untouched (no translation here).
//! Invariants: The file is opened read-only and never created.
//! Invariants: A directory at the fixed name is refused with `IsADirectory`.
use std::fs::File;
use std::io;
use std::path::Path;

pub const DEFAULT_FILE_NAME: &str = "file";

/// Opens `file` in the current working directory.
///
/// Fails with [`io::ErrorKind::NotFound`] when it does not exist and with
/// [`io::ErrorKind::PermissionDenied`] when it cannot be read, and with
/// [`io::ErrorKind::IsADirectory`] when the name is taken by a directory.
pub fn open_file() -> io::Result<File> {
    open_file_in(Path::new("."))
}

pub fn open_file_in(dir: &Path) -> io::Result<File> {
    let path = dir.join(DEFAULT_FILE_NAME);
    tracing::debug!(path = %path.display(), "opening file");
    let file = File::open(&path)?;
    if file.metadata()?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("{} is a directory", path.display()),
        ));
    }
    Ok(file)
}
