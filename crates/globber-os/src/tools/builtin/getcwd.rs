//! getcwd: Get the working directory.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Getcwd tool: return the current working directory.
pub struct Getcwd;

#[async_trait]
impl Tool for Getcwd {
    fn name(&self) -> &str {
        "getcwd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("getcwd", "Get the current working directory")
            .returns("the directory as a string")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        match ctx.fs.current_dir() {
            Ok(dir) => ExecResult::value(dir.to_string_lossy().into_owned()),
            Err(e) => {
                // Always a string, even when the directory has gone away
                tracing::debug!(error = %e, "getcwd failed");
                ExecResult::value("")
            }
        }
    }
}
