//! copy: Copy a file.

use async_trait::async_trait;
use std::path::Path;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// CopyFile tool: copy the file at `src` to `dest`.
pub struct CopyFile;

#[async_trait]
impl Tool for CopyFile {
    fn name(&self) -> &str {
        "copy"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("copy", "Copy a file")
            .param(ParamSchema::new("src", "string", "File to copy"))
            .param(ParamSchema::new("dest", "string", "Destination file"))
            .returns("true on success, false otherwise; nothing without both paths")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let (Some(src), Some(dest)) = (args.get_string(0), args.get_string(1)) else {
            return ExecResult::none();
        };
        match ctx.fs.copy(Path::new(&src), Path::new(&dest)) {
            Ok(()) => ExecResult::value(true),
            Err(e) => {
                tracing::debug!(src = %src, dest = %dest, error = %e, "copy failed");
                ExecResult::value(false)
            }
        }
    }
}
