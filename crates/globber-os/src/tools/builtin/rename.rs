//! rename: Move a file or directory.

use async_trait::async_trait;
use std::path::Path;

use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Rename tool: move `src` to `dest`.
pub struct Rename;

#[async_trait]
impl Tool for Rename {
    fn name(&self) -> &str {
        "rename"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rename", "Move or rename a file or directory")
            .param(ParamSchema::new("src", "string", "Existing path"))
            .param(ParamSchema::new("dest", "string", "New path"))
            .returns("true, or nil, \"error\", 1 on failure")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let (Some(src), Some(dest)) = (args.get_string(0), args.get_string(1)) else {
            return ExecResult::failure("rename: missing operand");
        };
        match ctx.fs.rename(Path::new(&src), Path::new(&dest)) {
            Ok(()) => ExecResult::value(true),
            Err(e) => ExecResult::failure(format!("rename: {src} -> {dest}: {e}")),
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
    async fn test_rename_file() {
        let (mut ctx, fs) = make_ctx(&["old.txt", "dir/"]);
        let result = Rename.execute(args(&["old.txt", "dir/new.txt"]), &mut ctx).await;
        assert_eq!(result.values, vec![Value::Bool(true)]);
        assert_eq!(fs.path_kind(Path::new("old.txt")), None);
        assert_eq!(fs.read_file(Path::new("dir/new.txt")).unwrap(), b"old.txt");
    }

    #[tokio::test]
    async fn test_rename_directory() {
        let (mut ctx, fs) = make_ctx(&["a/inner.txt"]);
        let result = Rename.execute(args(&["a", "b"]), &mut ctx).await;
        assert!(result.ok());
        assert!(fs.is_file(Path::new("b/inner.txt")));
    }

    #[tokio::test]
    async fn test_rename_failures() {
        let (mut ctx, _fs) = make_ctx(&["present.txt"]);
        let triple = vec![Value::Null, Value::from("error"), Value::Int(1)];

        let result = Rename.execute(args(&["missing", "x"]), &mut ctx).await;
        assert_eq!(result.values, triple);

        // Missing operands fail too, rather than returning nothing
        let result = Rename.execute(args(&["present.txt"]), &mut ctx).await;
        assert_eq!(result.values, triple);
        let result = Rename.execute(ToolArgs::new(), &mut ctx).await;
        assert_eq!(result.values, triple);
    }
}
