//! getenv: Read an environment variable.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Getenv tool: value of an environment variable.
pub struct Getenv;

#[async_trait]
impl Tool for Getenv {
    fn name(&self) -> &str {
        "getenv"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("getenv", "Read an environment variable")
            .param(ParamSchema::new("name", "string", "Variable name"))
            .returns("the value, or nothing if unset")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        args.get_string(0)
            .and_then(|name| ctx.fs.get_env(&name))
            .map(ExecResult::value)
            .unwrap_or_else(ExecResult::none)
    }
}
