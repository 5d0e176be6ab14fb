//! `GlobFs` adapter for `Filesystem`.
//!
//! Bridges the `os` facade to the glob engine so `globfiles` and `globdirs`
//! work against any backend.

use std::path::{Path, PathBuf};

use globber::{EntryKind, FsError, GlobFs};

use crate::vfs::{DirIter, Filesystem};

/// Wraps a `&dyn Filesystem` to implement `GlobFs`.
pub struct VfsGlobFs<'a>(pub &'a dyn Filesystem);

impl GlobFs for VfsGlobFs<'_> {
    type Dir = DirIter;

    fn open_dir(&self, path: &Path) -> Result<DirIter, FsError> {
        self.0.read_dir(path)
    }

    fn path_kind(&self, path: &Path) -> Option<EntryKind> {
        self.0.path_kind(path)
    }

    fn current_dir(&self) -> Result<PathBuf, FsError> {
        self.0
            .current_dir()
            .map_err(|e| FsError::from_io(Path::new("."), e))
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        self.0.canonicalize(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::MemoryFs;
    use globber::{glob_dirs, glob_files};

    fn make_fs() -> MemoryFs {
        let fs = MemoryFs::new();
        for path in ["/proj/src/main.rs", "/proj/src/bin/tool.rs", "/proj/README.md"] {
            fs.write_file(Path::new(path), b"").unwrap();
        }
        fs
    }

    #[test]
    fn test_globs_memory_fs() {
        let fs = make_fs();
        let adapter = VfsGlobFs(&fs);

        assert_eq!(
            glob_files(&adapter, "/proj/**/*.rs").unwrap(),
            vec!["/proj/src/bin/tool.rs", "/proj/src/main.rs"]
        );
        assert_eq!(
            glob_dirs(&adapter, "/proj/*").unwrap(),
            vec!["/proj/src"]
        );
    }

    #[test]
    fn test_relative_mask_uses_backend_cwd() {
        let fs = make_fs();
        fs.set_current_dir(Path::new("/proj/src")).unwrap();

        let found = glob_files(VfsGlobFs(&fs), "*.rs").unwrap();
        assert_eq!(found, vec!["main.rs"]);
    }
}
