//! Error types for the safety gate.

use std::io;

use thiserror::Error;

/// Failures that abort an invocation before or instead of running helm.
#[derive(Debug, Error)]
pub enum GateError {
    /// A modifying command lacks an explicit namespace and/or context.
    #[error("missing required safety flags: {}", .0.join(", "))]
    MissingSafetyFlags(Vec<String>),

    /// The requested context is not present in the kubeconfig.
    #[error("context '{name}' not found")]
    ContextNotFound {
        name: String,
        /// Known context names, sorted.
        candidates: Vec<String>,
    },

    /// The kubeconfig query tool could not be run or exited non-zero.
    #[error("failed to query kubeconfig ({command}): {reason}")]
    ConfigQueryFailed { command: String, reason: String },

    /// The helm binary could not be started.
    #[error("failed to run {bin}: {source}")]
    SpawnFailed {
        bin: String,
        #[source]
        source: io::Error,
    },

    /// Helm ran but exited non-zero.
    #[error("exit status {code}")]
    HelmExited { code: i32 },

    /// Writing to the terminal failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl GateError {
    /// True for failures raised by the safety validator.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            GateError::MissingSafetyFlags(_)
                | GateError::ContextNotFound { .. }
                | GateError::ConfigQueryFailed { .. }
        )
    }
}
