//! chdir: Change the working directory.

use async_trait::async_trait;
use std::path::Path;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Chdir tool: change the working directory of the filesystem backend.
pub struct Chdir;

#[async_trait]
impl Tool for Chdir {
    fn name(&self) -> &str {
        "chdir"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("chdir", "Change the current working directory")
            .param(ParamSchema::new("dir", "string", "Directory to change to"))
            .returns("true on success, false otherwise")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(dir) = args.get_string(0) else {
            return ExecResult::value(false);
        };
        match ctx.fs.set_current_dir(Path::new(&dir)) {
            Ok(()) => ExecResult::value(true),
            Err(e) => {
                tracing::debug!(dir = %dir, error = %e, "chdir failed");
                ExecResult::value(false)
            }
        }
    }
}
