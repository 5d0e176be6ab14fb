//! isfile: Test whether a path is a regular file.

use async_trait::async_trait;
use std::path::Path;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// IsFile tool: true iff the path exists and is a regular file.
pub struct IsFile;

#[async_trait]
impl Tool for IsFile {
    fn name(&self) -> &str {
        "isfile"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("isfile", "Check whether a path is a regular file")
            .param(ParamSchema::new("path", "string", "Path to test"))
            .returns("true or false; nothing without a path")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        match args.get_string(0) {
            Some(path) => ExecResult::value(ctx.fs.is_file(Path::new(&path))),
            None => ExecResult::none(),
        }
    }
}
