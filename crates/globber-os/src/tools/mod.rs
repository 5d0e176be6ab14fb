//! The `os` function table.
//!
//! Every function is a `Tool`: it takes positional `Value`s and returns zero
//! or more `Value`s, the way a native function in an embedded interpreter
//! does.
//!
//! # Architecture
//!
//! ```text
//! ToolRegistry ("os")
//! └── Builtins (chdir, getcwd, mkdir, ..., globfiles, getenv)
//!         │
//!         └── ExecContext ── Arc<dyn Filesystem> (LocalFs, MemoryFs)
//! ```

mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::ExecContext;
pub use registry::{ToolError, ToolRegistry, DEFAULT_NAMESPACE};
pub use traits::{ParamSchema, Tool, ToolArgs, ToolSchema};
