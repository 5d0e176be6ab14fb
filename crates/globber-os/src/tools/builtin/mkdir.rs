//! mkdir: Create a directory.

use async_trait::async_trait;
use std::path::Path;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Mkdir tool: create a directory and any missing parents.
pub struct Mkdir;

#[async_trait]
impl Tool for Mkdir {
    fn name(&self) -> &str {
        "mkdir"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("mkdir", "Create a directory, including missing parents")
            .param(ParamSchema::new("dir", "string", "Directory to create"))
            .returns("true on success, false otherwise")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(dir) = args.get_string(0) else {
            return ExecResult::value(false);
        };
        match ctx.fs.make_dir(Path::new(&dir)) {
            Ok(()) => ExecResult::value(true),
            Err(e) => {
                tracing::debug!(dir = %dir, error = %e, "mkdir failed");
                ExecResult::value(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::{args, make_ctx};
    use crate::value::Value;
    use crate::vfs::Filesystem;

    #[tokio::test]
    async fn test_mkdir_creates_parents() {
        let (mut ctx, fs) = make_ctx(&[]);
        let result = Mkdir.execute(args(&["a/b/c"]), &mut ctx).await;
        assert_eq!(result.values, vec![Value::Bool(true)]);
        assert!(fs.is_dir(Path::new("/a/b/c")));
    }

    #[tokio::test]
    async fn test_mkdir_existing_directory() {
        let (mut ctx, _fs) = make_ctx(&["there/"]);
        let result = Mkdir.execute(args(&["there"]), &mut ctx).await;
        assert_eq!(result.values, vec![Value::Bool(true)]);
    }

    #[tokio::test]
    async fn test_mkdir_over_file_fails() {
        let (mut ctx, _fs) = make_ctx(&["file"]);
        let result = Mkdir.execute(args(&["file/sub"]), &mut ctx).await;
        assert_eq!(result.values, vec![Value::Bool(false)]);

        let result = Mkdir.execute(ToolArgs::new(), &mut ctx).await;
        assert_eq!(result.values, vec![Value::Bool(false)]);
    }
}
