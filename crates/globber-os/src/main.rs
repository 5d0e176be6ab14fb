//! globber-os CLI entry point.
//!
//! Usage:
//!   globber-os <function> [args...]   # Call one os function, print results
//!   globber-os --list                 # List the available functions
//!   globber-os --config <path> ...    # Use a specific config file

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use globber_os::{ExecContext, LocalFs, OsApiConfig, ToolArgs, ToolRegistry};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config = take_config(&mut args)?;

    match args.first().map(|s| s.as_str()) {
        None | Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!("globber-os {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }

        Some("--list") => {
            let registry = ToolRegistry::with_builtins(config.namespace.clone());
            for schema in registry.schemas() {
                let usage = format!("{}.{}", registry.namespace(), schema.usage());
                println!("{usage:<32} {}", schema.description);
            }
            Ok(ExitCode::SUCCESS)
        }

        Some(unknown) if unknown.starts_with('-') => {
            eprintln!("Unknown option: {unknown}");
            eprintln!("Run 'globber-os --help' for usage.");
            Ok(ExitCode::FAILURE)
        }

        Some(function) => call(&config, function, &args[1..]),
    }
}

/// Remove a leading `--config <path>` / `--config=<path>` from `args` and load it.
fn take_config(args: &mut Vec<String>) -> Result<OsApiConfig> {
    match split_config(args)? {
        Some(path) => OsApiConfig::load_from(&path),
        None => OsApiConfig::load(),
    }
}

/// Strip the config option when it comes first.
///
/// Anything after the function name belongs to the function, so a later
/// `--config` is left in place as an ordinary argument.
fn split_config(args: &mut Vec<String>) -> Result<Option<PathBuf>> {
    let Some(first) = args.first() else {
        return Ok(None);
    };

    if first == "--config" {
        let value = args
            .get(1)
            .cloned()
            .context("--config requires a path argument")?;
        args.drain(..2);
        Ok(Some(PathBuf::from(value)))
    } else if let Some(value) = first.strip_prefix("--config=") {
        let path = PathBuf::from(value);
        args.remove(0);
        Ok(Some(path))
    } else {
        Ok(None)
    }
}

/// Call one function against the host filesystem and print its values.
fn call(config: &OsApiConfig, function: &str, args: &[String]) -> Result<ExitCode> {
    let registry = ToolRegistry::with_builtins(config.namespace.clone());
    let mut ctx = ExecContext::with_config(Arc::new(LocalFs::new()), config);
    let tool_args: ToolArgs = args.iter().map(String::as_str).collect();

    let rt = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let result = rt
        .block_on(registry.call(function, tool_args, &mut ctx))
        .with_context(|| format!("Run 'globber-os --list' to see what {} provides", registry.namespace()))?;

    for value in &result.values {
        println!("{}", serde_json::to_string(value)?);
    }
    if let Some(err) = &result.err {
        eprintln!("{err}");
    }

    if result.ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_help() {
    println!(
        r#"globber-os v{}

Usage:
  globber-os <function> [args...]   Call an os function and print its results
  globber-os --list                 List the available functions

Options:
  --config <path>                   Config file (default: <config dir>/globber/os-api.toml)
  --list                            List functions
  -h, --help                        Show this help
  -V, --version                     Show version

Each return value is printed as JSON on its own line.

Examples:
  globber-os getcwd
  globber-os globfiles 'src/**/*.rs'
  globber-os rename old.txt new.txt
"#,
        env!("CARGO_PKG_VERSION")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_leading_config_is_taken() {
        let mut args = argv(&["--config", "/etc/os.toml", "getcwd"]);
        assert_eq!(split_config(&mut args).unwrap(), Some(PathBuf::from("/etc/os.toml")));
        assert_eq!(args, argv(&["getcwd"]));

        let mut args = argv(&["--config=/etc/os.toml", "getenv", "HOME"]);
        assert_eq!(split_config(&mut args).unwrap(), Some(PathBuf::from("/etc/os.toml")));
        assert_eq!(args, argv(&["getenv", "HOME"]));
    }

    #[test]
    fn test_config_after_function_is_an_argument() {
        let mut args = argv(&["getenv", "--config"]);
        assert_eq!(split_config(&mut args).unwrap(), None);
        assert_eq!(args, argv(&["getenv", "--config"]));

        let mut args = argv(&["rename", "--config=a", "b"]);
        assert_eq!(split_config(&mut args).unwrap(), None);
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_config_without_path() {
        let mut args = argv(&["--config"]);
        assert!(split_config(&mut args).is_err());
        assert_eq!(split_config(&mut Vec::new()).unwrap(), None);
    }
}
