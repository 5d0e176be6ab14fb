//! rmdir: Remove an empty directory.

use async_trait::async_trait;
use std::path::Path;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Rmdir tool: remove an empty directory.
pub struct Rmdir;

#[async_trait]
impl Tool for Rmdir {
    fn name(&self) -> &str {
        "rmdir"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rmdir", "Remove an empty directory")
            .param(ParamSchema::new("dir", "string", "Directory to remove"))
            .returns("true on success, false otherwise")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(dir) = args.get_string(0) else {
            return ExecResult::value(false);
        };
        match ctx.fs.remove_dir(Path::new(&dir)) {
            Ok(()) => ExecResult::value(true),
            Err(e) => {
                tracing::debug!(dir = %dir, error = %e, "rmdir failed");
                ExecResult::value(false)
            }
        }
    }
}
