//! ExecResult: what a native function hands back to the interpreter.

use crate::value::Value;

/// The return values of one native function call.
///
/// Functions may return nothing at all (a missing argument), a single value,
/// or the `nil, "error", 1` triple that signals failure to the script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecResult {
    /// Values pushed for the caller, in order.
    pub values: Vec<Value>,
    /// Diagnostic for a failed call. Not visible to the script.
    pub err: Option<String>,
}

impl ExecResult {
    /// No return values.
    pub fn none() -> Self {
        Self::default()
    }

    /// A single return value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            values: vec![value.into()],
            err: None,
        }
    }

    /// The failure triple `nil, "error", 1`, with a diagnostic.
    pub fn failure(err: impl Into<String>) -> Self {
        Self {
            values: vec![Value::Null, Value::from("error"), Value::Int(1)],
            err: Some(err.into()),
        }
    }

    /// True unless this is a failure result.
    pub fn ok(&self) -> bool {
        self.err.is_none()
    }

    /// The first return value, if any.
    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }
}
