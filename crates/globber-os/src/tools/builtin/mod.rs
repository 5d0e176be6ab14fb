//! Built-in `os` functions.
//!
//! A missing or non-string argument is not an error. `chdir`, `mkdir` and
//! `rmdir` return `false`, `rename` returns its failure triple, and every
//! other function returns no values at all.

mod chdir;
mod copy;
mod getcwd;
mod getenv;
mod glob;
mod isdir;
mod isfile;
mod mkdir;
mod remove;
mod rename;
mod rmdir;

use super::ToolRegistry;

/// Register all built-in tools with the registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(chdir::Chdir);
    registry.register(copy::CopyFile);
    registry.register(getcwd::Getcwd);
    registry.register(getenv::Getenv);
    registry.register(glob::Glob::files());
    registry.register(glob::Glob::dirs());
    registry.register(isdir::IsDir);
    registry.register(isfile::IsFile);
    registry.register(mkdir::Mkdir);
    registry.register(remove::Remove);
    registry.register(rename::Rename);
    registry.register(rmdir::Rmdir);
}
