//! Execution context for tools.

use std::sync::Arc;

use globber::{host_case_sensitive, GlobOptions, HiddenFiles};

use crate::config::OsApiConfig;
use crate::vfs::Filesystem;

/// Execution context passed to tools.
///
/// Holds the filesystem every `os` function goes through and the glob
/// behavior derived from configuration.
#[derive(Clone)]
pub struct ExecContext {
    /// Filesystem backend.
    pub fs: Arc<dyn Filesystem>,
    /// Dotfile policy for `globfiles` and `globdirs`.
    pub hidden: HiddenFiles,
    /// Case sensitivity of glob matching.
    pub case_sensitive: bool,
    /// Let `**` descend through symlinked directories.
    pub follow_symlinks: bool,
}

impl ExecContext {
    /// Create a context with default glob behavior.
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self {
            fs,
            hidden: HiddenFiles::default(),
            case_sensitive: host_case_sensitive(),
            follow_symlinks: false,
        }
    }

    /// Create a context with glob behavior taken from `config`.
    pub fn with_config(fs: Arc<dyn Filesystem>, config: &OsApiConfig) -> Self {
        Self {
            fs,
            hidden: config.hidden_files.into(),
            case_sensitive: config.case_sensitive.unwrap_or_else(host_case_sensitive),
            follow_symlinks: config.follow_symlinks,
        }
    }

    /// Options for one glob call.
    pub fn glob_options(&self) -> GlobOptions {
        GlobOptions {
            hidden: self.hidden,
            case_sensitive: self.case_sensitive,
            follow_symlinks: self.follow_symlinks,
            ..GlobOptions::default()
        }
    }
}

impl std::fmt::Debug for ExecContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecContext")
            .field("hidden", &self.hidden)
            .field("case_sensitive", &self.case_sensitive)
            .field("follow_symlinks", &self.follow_symlinks)
            .finish_non_exhaustive()
    }
}
