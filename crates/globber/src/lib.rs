//! globber: lazy glob traversal over a pluggable filesystem.
//!
//! Provides:
//! - **Mask**: splits a mask like `src/**/*.rs` into a literal root prefix and
//!   per-segment wildcard patterns
//! - **wildcard_match**: anchored `*`/`?` matching for a single path component
//! - **Globber**: a depth-first, pull-based iterator that yields one match per
//!   `next()` call, in deterministic lexical order
//! - **StdFs**: the `GlobFs` implementation for the host filesystem
//!
//! The engine is generic over `GlobFs`, a minimal read-only filesystem trait.
//! Consumers implement `GlobFs` to adapt their own filesystem abstraction.

mod globber;
pub mod mask;
pub mod pattern;
mod std_fs;

pub use globber::{
    glob_dirs, glob_files, EntryTypes, ErrorCallback, GlobContext, GlobMatch, GlobOptions,
    Globber,
};
pub use mask::{Mask, PatternError, Segment};
pub use pattern::{contains_wildcard, host_case_sensitive, wildcard_match, HiddenFiles};
pub use std_fs::{StdDir, StdFs};

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from filesystem operations during traversal.
///
/// None of these abort a glob: the engine skips the offending entry or
/// directory and carries on with its siblings.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("symlink cycle detected: {0}")]
    SymlinkCycle(String),
}

impl FsError {
    /// Classify an `io::Error` raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path.display().to_string()),
            io::ErrorKind::PermissionDenied => {
                FsError::PermissionDenied(path.display().to_string())
            }
            _ => FsError::Io(format!("{}: {}", path.display(), err)),
        }
    }
}

/// What a path or directory entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, devices, dangling symlinks and anything else.
    Other,
}

/// A single entry produced by a directory handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// The entry name (never contains a separator).
    pub name: String,
    /// Kind of the entry, after following a symlink.
    pub kind: EntryKind,
    /// True if the entry itself is a symbolic link.
    pub is_symlink: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_symlink: false,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::File)
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Directory)
    }

    /// Mark this entry as a symbolic link.
    pub fn symlink(mut self) -> Self {
        self.is_symlink = true;
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Minimal read-only filesystem abstraction for the glob engine.
///
/// A directory handle is the `Dir` iterator: it is opened by `open_dir`,
/// advanced by `next()`, and closed when dropped.
pub trait GlobFs {
    /// Open directory handle yielding entries until end of directory.
    type Dir: Iterator<Item = Result<DirEntry, FsError>>;

    /// Open a directory for enumeration.
    fn open_dir(&self, path: &Path) -> Result<Self::Dir, FsError>;

    /// Kind of whatever lives at `path`, or `None` if nothing does.
    fn path_kind(&self, path: &Path) -> Option<EntryKind>;

    /// The working directory relative masks are resolved against.
    fn current_dir(&self) -> Result<PathBuf, FsError>;

    /// Return the canonical (resolved) path, following symlinks.
    ///
    /// Used for symlink cycle detection when a globstar is allowed to follow
    /// symlinked directories. The default returns the path unchanged.
    fn canonicalize(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

impl<T: GlobFs + ?Sized> GlobFs for &T {
    type Dir = T::Dir;

    fn open_dir(&self, path: &Path) -> Result<Self::Dir, FsError> {
        (**self).open_dir(path)
    }

    fn path_kind(&self, path: &Path) -> Option<EntryKind> {
        (**self).path_kind(path)
    }

    fn current_dir(&self) -> Result<PathBuf, FsError> {
        (**self).current_dir()
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        (**self).canonicalize(path)
    }
}
