//! Delegation to the real helm binary.

use std::process::Command;

use crate::error::GateError;

/// Runs helm with a given argument vector and reports its exit code.
pub trait Executor {
    fn run(&self, args: &[String]) -> Result<i32, GateError>;
}

/// Spawns helm with inherited stdin, stdout and stderr, and waits for it.
pub struct HelmExecutor {
    bin: String,
}

impl HelmExecutor {
    /// `bin` is a path or a bare name looked up on `PATH`.
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Executor for HelmExecutor {
    fn run(&self, args: &[String]) -> Result<i32, GateError> {
        log::debug!("exec {} with {} args", self.bin, args.len());
        let status = Command::new(&self.bin)
            .args(args)
            .status()
            .map_err(|source| GateError::SpawnFailed {
                bin: self.bin.clone(),
                source,
            })?;

        // Killed by a signal: no exit code, count it as a failure.
        let code = status.code().unwrap_or(1);
        log::debug!("{} exited with {code}", self.bin);
        Ok(code)
    }
}
