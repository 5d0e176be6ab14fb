//! Host filesystem backend.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globber::{EntryKind, FsError, GlobFs, StdFs};

use super::traits::{DirIter, Filesystem};

/// The real filesystem and environment of this process.
///
/// `set_current_dir` changes the process working directory, so it is visible
/// to everything else running in the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFs {
    fn set_current_dir(&self, path: &Path) -> io::Result<()> {
        std::env::set_current_dir(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn make_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn unlink(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn path_kind(&self, path: &Path) -> Option<EntryKind> {
        StdFs.path_kind(path)
    }

    fn read_dir(&self, path: &Path) -> Result<DirIter, FsError> {
        Ok(Box::new(StdFs.open_dir(path)?))
    }

    fn get_env(&self, name: &str) -> Option<String> {
        // '=' and NUL can never appear in a variable name
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        std::env::var(name).ok()
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        StdFs.canonicalize(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_dir_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let deep = dir.path().join("a/b/c");

        LocalFs.make_dir(&deep).unwrap();
        assert!(LocalFs.is_dir(&deep));
        // Already there
        LocalFs.make_dir(&deep).unwrap();
    }

    #[test]
    fn test_file_primitives() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let copy = dir.path().join("copy.txt");
        let moved = dir.path().join("moved.txt");
        fs::write(&src, b"data").unwrap();

        LocalFs.copy(&src, &copy).unwrap();
        assert_eq!(fs::read(&copy).unwrap(), b"data");

        LocalFs.rename(&copy, &moved).unwrap();
        assert!(!LocalFs.is_file(&copy));
        assert!(LocalFs.is_file(&moved));

        LocalFs.unlink(&moved).unwrap();
        assert_eq!(LocalFs.path_kind(&moved), None);
    }

    #[test]
    fn test_unlink_refuses_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LocalFs.unlink(dir.path()).is_err());
        assert!(LocalFs.is_dir(dir.path()));
    }

    #[test]
    fn test_remove_dir_requires_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("f"), b"").unwrap();

        assert!(LocalFs.remove_dir(&sub).is_err());
        fs::remove_file(sub.join("f")).unwrap();
        LocalFs.remove_dir(&sub).unwrap();
        assert!(!LocalFs.is_dir(&sub));
    }

    #[test]
    fn test_read_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one"), b"").unwrap();

        let names: Vec<String> = LocalFs
            .read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().name)
            .collect();
        assert_eq!(names, vec!["one"]);
    }

    #[test]
    fn test_get_env() {
        assert!(LocalFs.get_env("PATH").is_some());
        assert_eq!(LocalFs.get_env("GLOBBER_SURELY_UNSET_VARIABLE"), None);
        assert_eq!(LocalFs.get_env(""), None);
        assert_eq!(LocalFs.get_env("A=B"), None);
    }
}
