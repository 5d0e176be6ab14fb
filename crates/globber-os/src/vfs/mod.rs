//! Host filesystem facade for the `os` functions.
//!
//! Every native function reaches the filesystem through `Filesystem`, one
//! method per primitive:
//!
//! - **LocalFs**: the real host filesystem and process environment
//! - **MemoryFs**: an in-memory tree with its own working directory and
//!   environment, for tests
//!
//! `VfsGlobFs` (in `glob_fs`) adapts any backend to the glob engine.

mod local;
mod memory;
mod traits;

pub use local::LocalFs;
pub use memory::MemoryFs;
pub use traits::{DirIter, Filesystem};
