//! remove: Delete a file.

use async_trait::async_trait;
use std::path::Path;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Remove tool: delete a file. Directories are left alone.
pub struct Remove;

#[async_trait]
impl Tool for Remove {
    fn name(&self) -> &str {
        "remove"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("remove", "Delete a file")
            .param(ParamSchema::new("path", "string", "File to delete"))
            .returns("true, or nil, \"error\", 1 on failure")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(path) = args.get_string(0) else {
            return ExecResult::none();
        };
        match ctx.fs.unlink(Path::new(&path)) {
            Ok(()) => ExecResult::value(true),
            Err(e) => ExecResult::failure(format!("remove: {path}: {e}")),
        }
    }
}
