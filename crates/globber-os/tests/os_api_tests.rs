//! The `os` table against the real filesystem.
//!
//! Every test works on absolute paths inside its own temporary directory,
//! except `test_chdir_getcwd_and_relative_glob`, the only one that moves the
//! process working directory.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use globber_os::{ExecContext, ExecResult, LocalFs, ToolArgs, ToolRegistry, Value};
use rstest::rstest;
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, rel.as_bytes()).unwrap();
}

fn make_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for rel in [
        "build/app.log",
        "build/logs/one.log",
        "build/logs/deep/er/three.log",
        "src/main.cpp",
        "src/util/strings.cpp",
        "src/util/strings.h",
        "notes.txt",
    ] {
        touch(dir.path(), rel);
    }
    dir
}

fn under(dir: &TempDir, rel: &str) -> String {
    format!("{}/{rel}", dir.path().display())
}

async fn call(name: &str, args: &[&str]) -> ExecResult {
    let registry = ToolRegistry::with_builtins("os");
    let mut ctx = ExecContext::new(Arc::new(LocalFs::new()));
    let args: ToolArgs = args.iter().copied().collect();
    registry.call(name, args, &mut ctx).await.unwrap()
}

fn array(result: &ExecResult) -> Vec<String> {
    match result.first() {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        other => panic!("expected an array, got {other:?}"),
    }
}

#[rstest]
#[case::star_within_segment("src/*/*.cpp", &["src/util/strings.cpp"])]
#[case::globstar("build/**/*.log", &["build/app.log", "build/logs/deep/er/three.log", "build/logs/one.log"])]
#[case::question("src/util/strings.?", &["src/util/strings.h"])]
#[case::literal("notes.txt", &["notes.txt"])]
#[case::literal_dir_is_not_a_file("src", &[])]
#[case::no_match("src/*.rs", &[])]
#[tokio::test]
async fn test_globfiles(#[case] mask: &str, #[case] expected: &[&str]) {
    let tree = make_tree();
    let result = call("os.globfiles", &[&under(&tree, mask)]).await;
    let expected: Vec<String> = expected.iter().map(|rel| under(&tree, rel)).collect();
    assert_eq!(array(&result), expected);
}

#[rstest]
#[case::top_level("*", &["build", "src"])]
#[case::globstar("**/l*", &["build/logs"])]
#[case::trailing_globstar("build/**", &["build/logs", "build/logs/deep", "build/logs/deep/er"])]
#[case::literal("src/util", &["src/util"])]
#[tokio::test]
async fn test_globdirs(#[case] mask: &str, #[case] expected: &[&str]) {
    let tree = make_tree();
    let result = call("os.globdirs", &[&under(&tree, mask)]).await;
    let expected: Vec<String> = expected.iter().map(|rel| under(&tree, rel)).collect();
    assert_eq!(array(&result), expected);
}

#[tokio::test]
async fn test_directory_lifecycle() {
    let tree = make_tree();
    let deep = under(&tree, "new/a/b");

    assert_eq!(call("mkdir", &[&deep]).await.values, vec![Value::Bool(true)]);
    assert_eq!(call("isdir", &[&deep]).await.values, vec![Value::Bool(true)]);
    assert_eq!(call("isfile", &[&deep]).await.values, vec![Value::Bool(false)]);

    // Not empty
    let parent = under(&tree, "new/a");
    assert_eq!(call("rmdir", &[&parent]).await.values, vec![Value::Bool(false)]);

    assert_eq!(call("rmdir", &[&deep]).await.values, vec![Value::Bool(true)]);
    assert_eq!(call("rmdir", &[&parent]).await.values, vec![Value::Bool(true)]);
    assert_eq!(call("isdir", &[&parent]).await.values, vec![Value::Bool(false)]);
}

#[tokio::test]
async fn test_file_lifecycle() {
    let tree = make_tree();
    let notes = under(&tree, "notes.txt");
    let copy = under(&tree, "copy.txt");
    let moved = under(&tree, "src/moved.txt");

    assert_eq!(call("copy", &[&notes, &copy]).await.values, vec![Value::Bool(true)]);
    assert_eq!(fs::read(&copy).unwrap(), b"notes.txt");

    assert_eq!(call("rename", &[&copy, &moved]).await.values, vec![Value::Bool(true)]);
    assert_eq!(call("isfile", &[&copy]).await.values, vec![Value::Bool(false)]);
    assert_eq!(call("isfile", &[&moved]).await.values, vec![Value::Bool(true)]);

    assert_eq!(call("remove", &[&moved]).await.values, vec![Value::Bool(true)]);
    let again = call("remove", &[&moved]).await;
    assert!(!again.ok());
    assert_eq!(
        again.values,
        vec![Value::Null, Value::from("error"), Value::Int(1)]
    );
}

#[tokio::test]
async fn test_missing_arguments() {
    for name in ["isdir", "isfile", "remove", "copy", "globfiles", "globdirs", "getenv"] {
        assert!(call(name, &[]).await.values.is_empty(), "{name}");
    }
    for name in ["chdir", "mkdir", "rmdir"] {
        assert_eq!(call(name, &[]).await.values, vec![Value::Bool(false)], "{name}");
    }
    assert!(!call("rename", &[]).await.ok());
}

#[tokio::test]
async fn test_getenv() {
    assert!(matches!(call("getenv", &["PATH"]).await.first(), Some(Value::String(_))));
    assert!(call("getenv", &["GLOBBER_OS_SURELY_UNSET"]).await.values.is_empty());
}

#[tokio::test]
async fn test_empty_mask_is_an_error() {
    let result = call("globfiles", &[""]).await;
    assert!(!result.ok());
    assert_eq!(result.values.len(), 3);
}

#[tokio::test]
async fn test_chdir_getcwd_and_relative_glob() {
    let tree = make_tree();
    let original = std::env::current_dir().unwrap();

    let target = fs::canonicalize(tree.path().join("src")).unwrap();
    let target = target.to_str().unwrap();
    assert_eq!(call("chdir", &[target]).await.values, vec![Value::Bool(true)]);
    assert_eq!(call("getcwd", &[]).await.values, vec![Value::from(target)]);

    let result = call("globfiles", &["*/*.cpp"]).await;
    assert_eq!(array(&result), vec!["util/strings.cpp"]);

    assert_eq!(call("chdir", &["does-not-exist"]).await.values, vec![Value::Bool(false)]);

    std::env::set_current_dir(original).unwrap();
}
