//! Core facade trait.

use std::io;
use std::path::{Path, PathBuf};

use globber::{DirEntry, EntryKind, FsError};

/// An open directory listing. Dropping it closes the handle.
pub type DirIter = Box<dyn Iterator<Item = Result<DirEntry, FsError>> + Send>;

/// Synchronous, object-safe filesystem interface.
///
/// Relative paths resolve against the backend's working directory, which
/// `set_current_dir` changes.
pub trait Filesystem: Send + Sync {
    /// Change the working directory.
    fn set_current_dir(&self, path: &Path) -> io::Result<()>;

    /// The working directory as an absolute path.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Create a directory and any missing parents.
    ///
    /// Succeeds if the directory already exists.
    fn make_dir(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Delete a file. Fails on directories.
    fn unlink(&self, path: &Path) -> io::Result<()>;

    /// Move `from` to `to`, replacing an existing file at `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copy the file at `from` to `to`, replacing an existing file at `to`.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Kind of whatever lives at `path` after following symlinks, or `None`.
    fn path_kind(&self, path: &Path) -> Option<EntryKind>;

    /// Open a directory for enumeration.
    fn read_dir(&self, path: &Path) -> Result<DirIter, FsError>;

    /// Read an environment variable. Unset or non-UTF-8 values are `None`.
    fn get_env(&self, name: &str) -> Option<String>;

    /// Resolve symlinks. Backends without links return the path unchanged.
    fn canonicalize(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }

    /// Check if a directory exists at `path`.
    fn is_dir(&self, path: &Path) -> bool {
        self.path_kind(path) == Some(EntryKind::Directory)
    }

    /// Check if a regular file exists at `path`.
    fn is_file(&self, path: &Path) -> bool {
        self.path_kind(path) == Some(EntryKind::File)
    }
}
