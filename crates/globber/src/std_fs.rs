//! `GlobFs` for the host filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{DirEntry, EntryKind, FsError, GlobFs};

/// The host filesystem through `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

/// An open `std::fs::ReadDir` handle. Closed on drop.
#[derive(Debug)]
pub struct StdDir {
    path: PathBuf,
    inner: fs::ReadDir,
}

fn kind_of(file_type: &fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

impl Iterator for StdDir {
    type Item = Result<DirEntry, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(FsError::from_io(&self.path, err))),
        };
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => return Some(Err(FsError::from_io(&entry.path(), err))),
        };
        let name = entry.file_name().to_string_lossy().into_owned();

        if file_type.is_symlink() {
            // Dangling links stay visible as `Other`
            let kind = fs::metadata(entry.path())
                .map(|meta| kind_of(&meta.file_type()))
                .unwrap_or(EntryKind::Other);
            return Some(Ok(DirEntry::new(name, kind).symlink()));
        }
        Some(Ok(DirEntry::new(name, kind_of(&file_type))))
    }
}

impl GlobFs for StdFs {
    type Dir = StdDir;

    fn open_dir(&self, path: &Path) -> Result<StdDir, FsError> {
        let inner = fs::read_dir(path).map_err(|err| FsError::from_io(path, err))?;
        Ok(StdDir {
            path: path.to_path_buf(),
            inner,
        })
    }

    fn path_kind(&self, path: &Path) -> Option<EntryKind> {
        fs::metadata(path).ok().map(|meta| kind_of(&meta.file_type()))
    }

    fn current_dir(&self) -> Result<PathBuf, FsError> {
        std::env::current_dir().map_err(|err| FsError::from_io(Path::new("."), err))
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}
