//! isdir: Test whether a path is a directory.

use async_trait::async_trait;
use std::path::Path;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// IsDir tool: true iff the path exists and is a directory.
pub struct IsDir;

#[async_trait]
impl Tool for IsDir {
    fn name(&self) -> &str {
        "isdir"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("isdir", "Check whether a path is a directory")
            .param(ParamSchema::new("path", "string", "Path to test"))
            .returns("true or false; nothing without a path")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        match args.get_string(0) {
            Some(path) => ExecResult::value(ctx.fs.is_dir(Path::new(&path))),
            None => ExecResult::none(),
        }
    }
}
