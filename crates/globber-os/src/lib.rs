//! globber-os: the `os` function table for an embedded interpreter.
//!
//! Host filesystem operations exposed as native functions under one
//! namespace:
//!
//! - **Tools**: `chdir`, `getcwd`, `mkdir`, `rmdir`, `isdir`, `isfile`,
//!   `remove`, `rename`, `copy`, `globfiles`, `globdirs`, `getenv`
//! - **Filesystem**: the facade every tool goes through, with `LocalFs` for
//!   the host and `MemoryFs` for tests
//! - **VfsGlobFs**: drives the `globber` engine over any `Filesystem`
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use globber_os::{ExecContext, MemoryFs, ToolArgs, ToolRegistry, Value};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let registry = ToolRegistry::with_builtins("os");
//! let mut ctx = ExecContext::new(Arc::new(MemoryFs::new()));
//!
//! let args: ToolArgs = ["/tmp/work"].into_iter().collect();
//! let result = registry.call("os.mkdir", args, &mut ctx).await.unwrap();
//! assert_eq!(result.values, vec![Value::Bool(true)]);
//! # });
//! ```

pub mod config;
pub mod glob_fs;
pub mod result;
pub mod tools;
pub mod value;
pub mod vfs;

pub use config::{HiddenFilesSetting, OsApiConfig};
pub use glob_fs::VfsGlobFs;
pub use result::ExecResult;
pub use tools::{
    register_builtins, ExecContext, ParamSchema, Tool, ToolArgs, ToolError, ToolRegistry,
    ToolSchema, DEFAULT_NAMESPACE,
};
pub use value::Value;
pub use vfs::{DirIter, Filesystem, LocalFs, MemoryFs};
