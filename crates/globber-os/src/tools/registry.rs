//! Tool registry: the `os` namespace.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::result::ExecResult;

use super::builtin::register_builtins;
use super::context::ExecContext;
use super::traits::{Tool, ToolArgs, ToolSchema};

/// Default namespace the builtins are published under.
pub const DEFAULT_NAMESPACE: &str = "os";

/// Errors from dispatching a call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown function: {0}")]
    NotFound(String),
}

/// Native functions published under one namespace.
pub struct ToolRegistry {
    namespace: String,
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            tools: BTreeMap::new(),
        }
    }

    /// Create a registry holding every builtin.
    pub fn with_builtins(namespace: impl Into<String>) -> Self {
        let mut registry = Self::new(namespace);
        register_builtins(&mut registry);
        registry
    }

    /// The namespace, e.g. `os`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
    }

    /// Look up a tool by bare (`chdir`) or qualified (`os.chdir`) name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let bare = name
            .strip_prefix(self.namespace.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(name);
        self.tools.get(bare).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Schemas of every registered tool, sorted by name.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|tool| tool.schema()).collect()
    }

    /// `namespace.name` for display.
    pub fn qualified_name(&self, name: &str) -> String {
        format!("{}.{}", self.namespace, name)
    }

    /// Call a tool by name.
    #[tracing::instrument(level = "debug", skip(self, args, ctx), fields(namespace = %self.namespace))]
    pub async fn call(
        &self,
        name: &str,
        args: ToolArgs,
        ctx: &mut ExecContext,
    ) -> Result<ExecResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        let result = tool.execute(args, ctx).await;
        if let Some(err) = &result.err {
            tracing::debug!(error = %err, "call failed");
        }
        Ok(result)
    }
}
