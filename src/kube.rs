//! Queries against the kubeconfig, answered by `kubectl config`.

use std::process::Command;

use crate::error::GateError;

/// Source of kube context names.
pub trait ContextStore {
    /// All context names known to the kubeconfig, trimmed, empty lines dropped.
    fn list_contexts(&self) -> Result<Vec<String>, GateError>;

    /// The kubeconfig's current context, trimmed.
    fn current_context(&self) -> Result<String, GateError>;
}

/// `ContextStore` backed by the kubectl binary.
pub struct KubectlContextStore {
    bin: String,
}

impl KubectlContextStore {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// Run `kubectl <args>` and return its stdout. Any spawn failure or
    /// non-zero exit is a query failure.
    fn query(&self, args: &[&str]) -> Result<String, GateError> {
        let command = format!("{} {}", self.bin, args.join(" "));
        log::debug!("running {command}");

        let output = Command::new(&self.bin).args(args).output().map_err(|e| {
            GateError::ConfigQueryFailed {
                command: command.clone(),
                reason: e.to_string(),
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => output.status.to_string(),
                msg => msg.to_string(),
            };
            return Err(GateError::ConfigQueryFailed { command, reason });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ContextStore for KubectlContextStore {
    fn list_contexts(&self) -> Result<Vec<String>, GateError> {
        let stdout = self.query(&["config", "get-contexts", "-o", "name"])?;
        Ok(parse_context_list(&stdout))
    }

    fn current_context(&self) -> Result<String, GateError> {
        let stdout = self.query(&["config", "current-context"])?;
        Ok(stdout.trim().to_string())
    }
}

/// One context name per line; whitespace trimmed, blank lines skipped.
pub fn parse_context_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
