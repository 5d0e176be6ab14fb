//! globfiles, globdirs: Expand a wildcard mask.

use async_trait::async_trait;

use globber::{GlobContext, Globber};

use crate::glob_fs::VfsGlobFs;
use crate::result::ExecResult;
use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};
use crate::value::Value;

/// Glob tool: every file (or every directory) matching a mask.
///
/// The traversal is blocking, so it runs on tokio's blocking pool and the
/// whole result is collected before returning.
pub struct Glob {
    dirs_only: bool,
}

impl Glob {
    /// `globfiles`: match files only.
    pub fn files() -> Self {
        Self { dirs_only: false }
    }

    /// `globdirs`: match directories only.
    pub fn dirs() -> Self {
        Self { dirs_only: true }
    }
}

#[async_trait]
impl Tool for Glob {
    fn name(&self) -> &str {
        if self.dirs_only { "globdirs" } else { "globfiles" }
    }

    fn schema(&self) -> ToolSchema {
        let (description, returns) = if self.dirs_only {
            ("List directories matching a mask", "array of directory paths")
        } else {
            ("List files matching a mask", "array of file paths")
        };
        ToolSchema::new(self.name(), description)
            .param(ParamSchema::new(
                "mask",
                "string",
                "Wildcard mask: * and ? within a name, ** across directories",
            ))
            .returns(returns)
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(mask) = args.get_string(0) else {
            return ExecResult::none();
        };

        let fs = ctx.fs.clone();
        let glob_ctx = GlobContext::new(mask, self.dirs_only).with_options(ctx.glob_options());
        let joined = tokio::task::spawn_blocking(move || {
            Globber::new(VfsGlobFs(fs.as_ref()), glob_ctx)
                .map(|matches| matches.map(|m| Value::String(m.path)).collect::<Vec<_>>())
        })
        .await;

        match joined {
            Ok(Ok(paths)) => ExecResult::value(Value::Array(paths)),
            Ok(Err(e)) => ExecResult::failure(format!("{}: {e}", self.name())),
            Err(e) => ExecResult::failure(format!("{}: {e}", self.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::{args, make_ctx};
    use crate::vfs::Filesystem;
    use globber::HiddenFiles;
    use std::path::Path;

    const TREE: &[&str] = &[
        "proj/.git/config",
        "proj/README.md",
        "proj/src/lib.rs",
        "proj/src/main.rs",
        "proj/src/util/strings.rs",
        "proj/target/",
    ];

    fn paths(result: &ExecResult) -> Vec<&str> {
        match result.first() {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            other => panic!("expected an array, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_globfiles() {
        let (mut ctx, _fs) = make_ctx(TREE);
        let result = Glob::files().execute(args(&["proj/src/*.rs"]), &mut ctx).await;
        assert_eq!(paths(&result), vec!["proj/src/lib.rs", "proj/src/main.rs"]);

        let result = Glob::files().execute(args(&["/proj/**/*.rs"]), &mut ctx).await;
        assert_eq!(
            paths(&result),
            vec!["/proj/src/lib.rs", "/proj/src/main.rs", "/proj/src/util/strings.rs"]
        );
    }

    #[tokio::test]
    async fn test_globdirs() {
        let (mut ctx, _fs) = make_ctx(TREE);
        let result = Glob::dirs().execute(args(&["proj/*"]), &mut ctx).await;
        assert_eq!(paths(&result), vec!["proj/.git", "proj/src", "proj/target"]);
    }

    #[tokio::test]
    async fn test_relative_to_cwd() {
        let (mut ctx, fs) = make_ctx(TREE);
        fs.set_current_dir(Path::new("proj/src")).unwrap();
        let result = Glob::files().execute(args(&["*"]), &mut ctx).await;
        assert_eq!(paths(&result), vec!["lib.rs", "main.rs"]);
    }

    #[tokio::test]
    async fn test_hidden_policy_from_context() {
        let (mut ctx, _fs) = make_ctx(TREE);
        ctx.hidden = HiddenFiles::Exclude;
        let result = Glob::dirs().execute(args(&["proj/*"]), &mut ctx).await;
        assert_eq!(paths(&result), vec!["proj/src", "proj/target"]);
    }

    #[tokio::test]
    async fn test_no_matches_is_empty_array() {
        let (mut ctx, _fs) = make_ctx(TREE);
        let result = Glob::files().execute(args(&["nowhere/**/*.rs"]), &mut ctx).await;
        assert_eq!(result.values, vec![Value::Array(vec![])]);
    }

    #[tokio::test]
    async fn test_empty_mask_fails() {
        let (mut ctx, _fs) = make_ctx(TREE);
        let result = Glob::files().execute(args(&[""]), &mut ctx).await;
        assert!(!result.ok());
        assert_eq!(result.err.as_deref(), Some("globfiles: empty mask"));
    }

    #[tokio::test]
    async fn test_without_argument() {
        let (mut ctx, _fs) = make_ctx(TREE);
        let result = Glob::dirs().execute(ToolArgs::new(), &mut ctx).await;
        assert!(result.values.is_empty());
    }

    #[tokio::test]
    async fn test_denied_branch_is_skipped() {
        let (mut ctx, fs) = make_ctx(TREE);
        fs.write_file(Path::new("proj/locked/secret.rs"), b"").unwrap();
        fs.deny(Path::new("proj/locked")).unwrap();

        let result = Glob::files().execute(args(&["proj/**/*.rs"]), &mut ctx).await;
        assert_eq!(
            paths(&result),
            vec!["proj/src/lib.rs", "proj/src/main.rs", "proj/src/util/strings.rs"]
        );
    }
}
