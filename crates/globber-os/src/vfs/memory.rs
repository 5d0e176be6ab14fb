//! In-memory filesystem backend.
//!
//! Used by tests. Has its own working directory and environment, so tests
//! never touch the process-wide ones.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use globber::{DirEntry, EntryKind, FsError};

use super::traits::{DirIter, Filesystem};

/// Entry in the memory filesystem.
#[derive(Debug, Clone)]
enum Entry {
    File { data: Vec<u8> },
    Directory,
}

impl Entry {
    fn kind(&self) -> EntryKind {
        match self {
            Entry::File { .. } => EntryKind::File,
            Entry::Directory => EntryKind::Directory,
        }
    }
}

/// In-memory filesystem.
///
/// Paths are stored normalized relative to `/`. Thread-safe via internal
/// `RwLock`s. All data is lost when dropped.
#[derive(Debug)]
pub struct MemoryFs {
    entries: RwLock<HashMap<PathBuf, Entry>>,
    cwd: RwLock<PathBuf>,
    env: RwLock<HashMap<String, String>>,
    denied: RwLock<HashSet<PathBuf>>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> io::Error {
    io::Error::other("lock poisoned")
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("not found: {}", path.display()),
    )
}

fn error(kind: io::ErrorKind, what: &str, path: &Path) -> io::Error {
    io::Error::new(kind, format!("{what}: {}", path.display()))
}

impl MemoryFs {
    /// Create a new filesystem holding only `/`, which is also the working
    /// directory.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        // Root directory always exists
        entries.insert(PathBuf::new(), Entry::Directory);
        Self {
            entries: RwLock::new(entries),
            cwd: RwLock::new(PathBuf::new()),
            env: RwLock::new(HashMap::new()),
            denied: RwLock::new(HashSet::new()),
        }
    }

    /// Normalize a path: remove leading `/`, resolve `.` and `..`.
    fn normalize(path: &Path) -> PathBuf {
        let mut result = PathBuf::new();
        for component in path.components() {
            match component {
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(s) => result.push(s),
            }
        }
        result
    }

    /// Storage key for `path`, resolving relative paths against the cwd.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        if path.has_root() {
            return Ok(Self::normalize(path));
        }
        let cwd = self.cwd.read().map_err(|_| poisoned())?;
        Ok(Self::normalize(&cwd.join(path)))
    }

    /// Absolute form of a storage key.
    fn absolute(key: &Path) -> PathBuf {
        Path::new("/").join(key)
    }

    /// Fails if any ancestor of `key` is denied.
    fn check_access(&self, key: &Path) -> io::Result<()> {
        let denied = self.denied.read().map_err(|_| poisoned())?;
        match key.ancestors().skip(1).find(|dir| denied.contains(*dir)) {
            Some(dir) => Err(error(
                io::ErrorKind::PermissionDenied,
                "permission denied",
                &Self::absolute(dir),
            )),
            None => Ok(()),
        }
    }

    /// Like `check_access`, and also fails if `key` itself is denied.
    fn check_listable(&self, key: &Path) -> io::Result<()> {
        self.check_access(key)?;
        let denied = self.denied.read().map_err(|_| poisoned())?;
        if denied.contains(key) {
            return Err(error(
                io::ErrorKind::PermissionDenied,
                "permission denied",
                &Self::absolute(key),
            ));
        }
        Ok(())
    }

    /// Write a file, creating parent directories as needed.
    pub fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let key = self.resolve(path)?;
        if let Some(parent) = key.parent() {
            self.make_dir(&Self::absolute(parent))?;
        }
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        if let Some(Entry::Directory) = entries.get(&key) {
            return Err(error(io::ErrorKind::IsADirectory, "is a directory", path));
        }
        entries.insert(
            key,
            Entry::File {
                data: data.to_vec(),
            },
        );
        Ok(())
    }

    /// Read back the contents of a file.
    pub fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        let key = self.resolve(path)?;
        let entries = self.entries.read().map_err(|_| poisoned())?;
        match entries.get(&key) {
            Some(Entry::File { data }) => Ok(data.clone()),
            Some(Entry::Directory) => Err(error(io::ErrorKind::IsADirectory, "is a directory", path)),
            None => Err(not_found(path)),
        }
    }

    /// Set an environment variable visible through `get_env`.
    pub fn set_env(&self, name: impl Into<String>, value: impl Into<String>) -> io::Result<()> {
        let mut env = self.env.write().map_err(|_| poisoned())?;
        env.insert(name.into(), value.into());
        Ok(())
    }

    /// Make a directory unreadable: listing it, entering it and touching
    /// anything beneath it fail with `PermissionDenied`.
    pub fn deny(&self, path: &Path) -> io::Result<()> {
        let key = self.resolve(path)?;
        let mut denied = self.denied.write().map_err(|_| poisoned())?;
        denied.insert(key);
        Ok(())
    }

    /// Check that the parent of `key` exists and is a directory.
    fn check_parent(entries: &HashMap<PathBuf, Entry>, key: &Path, path: &Path) -> io::Result<()> {
        let parent = key.parent().unwrap_or(Path::new(""));
        match entries.get(parent) {
            Some(Entry::Directory) => Ok(()),
            Some(Entry::File { .. }) => Err(error(io::ErrorKind::NotADirectory, "not a directory", path)),
            None => Err(not_found(path)),
        }
    }
}

impl Filesystem for MemoryFs {
    fn set_current_dir(&self, path: &Path) -> io::Result<()> {
        let key = self.resolve(path)?;
        self.check_listable(&key)?;
        {
            let entries = self.entries.read().map_err(|_| poisoned())?;
            match entries.get(&key) {
                Some(Entry::Directory) => {}
                Some(Entry::File { .. }) => {
                    return Err(error(io::ErrorKind::NotADirectory, "not a directory", path));
                }
                None => return Err(not_found(path)),
            }
        }
        let mut cwd = self.cwd.write().map_err(|_| poisoned())?;
        *cwd = key;
        Ok(())
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        let cwd = self.cwd.read().map_err(|_| poisoned())?;
        Ok(Self::absolute(&cwd))
    }

    fn make_dir(&self, path: &Path) -> io::Result<()> {
        let key = self.resolve(path)?;
        self.check_access(&key)?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        let mut current = PathBuf::new();
        for component in key.components() {
            current.push(component);
            match entries.get(&current) {
                Some(Entry::Directory) => {}
                Some(Entry::File { .. }) => {
                    return Err(error(
                        io::ErrorKind::AlreadyExists,
                        "file exists",
                        &Self::absolute(&current),
                    ));
                }
                None => {
                    entries.insert(current.clone(), Entry::Directory);
                }
            }
        }
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let key = self.resolve(path)?;
        if key.as_os_str().is_empty() {
            return Err(error(io::ErrorKind::PermissionDenied, "cannot remove root", path));
        }
        self.check_access(&key)?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        match entries.get(&key) {
            Some(Entry::Directory) => {}
            Some(Entry::File { .. }) => {
                return Err(error(io::ErrorKind::NotADirectory, "not a directory", path));
            }
            None => return Err(not_found(path)),
        }
        if entries.keys().any(|k| k.parent() == Some(key.as_path())) {
            return Err(error(io::ErrorKind::DirectoryNotEmpty, "directory not empty", path));
        }
        entries.remove(&key);
        Ok(())
    }

    fn unlink(&self, path: &Path) -> io::Result<()> {
        let key = self.resolve(path)?;
        self.check_access(&key)?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        match entries.get(&key) {
            Some(Entry::File { .. }) => {
                entries.remove(&key);
                Ok(())
            }
            Some(Entry::Directory) => Err(error(io::ErrorKind::IsADirectory, "is a directory", path)),
            None => Err(not_found(path)),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let src = self.resolve(from)?;
        let dest = self.resolve(to)?;
        if src.as_os_str().is_empty() || dest.as_os_str().is_empty() {
            return Err(error(io::ErrorKind::PermissionDenied, "cannot rename root", from));
        }
        self.check_access(&src)?;
        self.check_access(&dest)?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        let source = entries.get(&src).cloned().ok_or_else(|| not_found(from))?;
        if src == dest {
            return Ok(());
        }
        Self::check_parent(&entries, &dest, to)?;
        if dest.starts_with(&src) {
            return Err(error(
                io::ErrorKind::InvalidInput,
                "cannot move a directory into itself",
                to,
            ));
        }

        match (&source, entries.get(&dest)) {
            (Entry::File { .. }, Some(Entry::Directory)) => {
                return Err(error(io::ErrorKind::IsADirectory, "is a directory", to));
            }
            (Entry::Directory, Some(Entry::File { .. })) => {
                return Err(error(io::ErrorKind::NotADirectory, "not a directory", to));
            }
            (Entry::Directory, Some(Entry::Directory)) => {
                if entries.keys().any(|k| k.parent() == Some(dest.as_path())) {
                    return Err(error(io::ErrorKind::DirectoryNotEmpty, "directory not empty", to));
                }
            }
            _ => {}
        }

        let moved: Vec<PathBuf> = entries
            .keys()
            .filter(|k| k.starts_with(&src))
            .cloned()
            .collect();
        for old in moved {
            if let Some(entry) = entries.remove(&old)
                && let Ok(rest) = old.strip_prefix(&src)
            {
                let new = if rest.as_os_str().is_empty() {
                    dest.clone()
                } else {
                    dest.join(rest)
                };
                entries.insert(new, entry);
            }
        }
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        let src = self.resolve(from)?;
        let dest = self.resolve(to)?;
        self.check_access(&src)?;
        self.check_access(&dest)?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        let data = match entries.get(&src) {
            Some(Entry::File { data }) => data.clone(),
            Some(Entry::Directory) => {
                return Err(error(io::ErrorKind::IsADirectory, "is a directory", from));
            }
            None => return Err(not_found(from)),
        };
        Self::check_parent(&entries, &dest, to)?;
        if let Some(Entry::Directory) = entries.get(&dest) {
            return Err(error(io::ErrorKind::IsADirectory, "is a directory", to));
        }
        entries.insert(dest, Entry::File { data });
        Ok(())
    }

    fn path_kind(&self, path: &Path) -> Option<EntryKind> {
        let key = self.resolve(path).ok()?;
        self.check_access(&key).ok()?;
        let entries = self.entries.read().ok()?;
        entries.get(&key).map(Entry::kind)
    }

    fn read_dir(&self, path: &Path) -> Result<DirIter, FsError> {
        let key = self.resolve(path).map_err(|err| FsError::from_io(path, err))?;
        self.check_listable(&key)
            .map_err(|err| FsError::from_io(path, err))?;
        let entries = self
            .entries
            .read()
            .map_err(|_| FsError::Io("lock poisoned".to_string()))?;

        match entries.get(&key) {
            Some(Entry::Directory) => {}
            Some(Entry::File { .. }) => {
                return Err(FsError::Io(format!("not a directory: {}", path.display())));
            }
            None => return Err(FsError::NotFound(path.display().to_string())),
        }

        let listing: Vec<DirEntry> = entries
            .iter()
            .filter(|(k, _)| k.parent() == Some(key.as_path()))
            .filter_map(|(k, entry)| {
                let name = k.file_name()?.to_string_lossy().into_owned();
                Some(DirEntry::new(name, entry.kind()))
            })
            .collect();
        Ok(Box::new(listing.into_iter().map(Ok::<DirEntry, FsError>)))
    }

    fn get_env(&self, name: &str) -> Option<String> {
        self.env.read().ok()?.get(name).cloned()
    }
}
