//! The per-invocation state machine:
//! classify → (validate → confirm) → execute.

use std::io::{BufRead, Write};

use crate::classify::{Classification, Classifier};
use crate::config::Config;
use crate::error::GateError;
use crate::exec::Executor;
use crate::kube::ContextStore;
use crate::logging::log_decision;
use crate::report::{self, MessageKind};
use crate::safety::{confirm, validate};
use crate::target::{Environment, Invocation};

/// How an invocation ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Helm ran and exited successfully.
    Executed,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// Answered locally (help, version, no command); helm never ran.
    Handled,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Executed => "executed",
            Outcome::Cancelled => "cancelled",
            Outcome::Handled => "handled",
        }
    }
}

/// Flags handled by helm-safe itself, recognized only in first position.
enum GlobalFlag {
    Help,
    Version,
    DumpConfig,
}

impl GlobalFlag {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "--help" | "-h" => Some(GlobalFlag::Help),
            "--version" | "-V" => Some(GlobalFlag::Version),
            "--dump-config" => Some(GlobalFlag::DumpConfig),
            _ => None,
        }
    }
}

/// Everything one invocation needs; all collaborators are injected.
pub struct Gate<'a> {
    config: &'a Config,
    classifier: Classifier,
    env: &'a Environment,
    store: &'a dyn ContextStore,
    executor: &'a dyn Executor,
}

impl<'a> Gate<'a> {
    pub fn new(
        config: &'a Config,
        env: &'a Environment,
        store: &'a dyn ContextStore,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            config,
            classifier: Classifier::from_config(config),
            env,
            store,
            executor,
        }
    }

    /// Run one invocation. `args` excludes the program name and is forwarded
    /// to helm unchanged. Validation failures are explained on `out` before
    /// being returned.
    pub fn run(
        &self,
        args: Vec<String>,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<Outcome, GateError> {
        let invocation = Invocation::new(args);

        let Some(command) = invocation.command() else {
            report::message(
                out,
                MessageKind::Notice,
                "No command specified",
                "Use 'helm safe --help' for usage information",
                "",
            )?;
            return Ok(Outcome::Handled);
        };

        if let Some(flag) = GlobalFlag::parse(command) {
            match flag {
                GlobalFlag::Help => report::help(out, &self.classifier)?,
                GlobalFlag::Version => report::version(out)?,
                GlobalFlag::DumpConfig => match self.config.to_toml() {
                    Ok(text) => write!(out, "{text}")?,
                    Err(e) => writeln!(out, "failed to serialize config: {e}")?,
                },
            }
            return Ok(Outcome::Handled);
        }

        let classification = self.classifier.classify(command, invocation.rest());
        log::debug!("{command}: {}", classification.as_str());

        let result = match classification {
            Classification::Safe | Classification::Unclassified => self.execute(&invocation),
            Classification::Modifying => self.run_gated(&invocation, input, out),
        };

        let outcome = match &result {
            Ok(outcome) => outcome.as_str(),
            Err(e) if e.is_validation_failure() => "rejected",
            Err(GateError::HelmExited { .. }) => "failed",
            Err(_) => "error",
        };
        log_decision(&invocation.display(), classification.as_str(), outcome);
        result
    }

    fn run_gated(
        &self,
        invocation: &Invocation,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<Outcome, GateError> {
        if let Err(e) = validate(invocation, self.env, self.store) {
            report::validation_failure(out, &e)?;
            return Err(e);
        }

        if !confirm(invocation, self.env, self.store, input, out) {
            report::message(out, MessageKind::Notice, "Operation cancelled", "", "")?;
            return Ok(Outcome::Cancelled);
        }

        self.execute(invocation)
    }

    /// A non-zero exit from helm surfaces as `HelmExited`.
    fn execute(&self, invocation: &Invocation) -> Result<Outcome, GateError> {
        match self.executor.run(invocation.args())? {
            0 => Ok(Outcome::Executed),
            code => Err(GateError::HelmExited { code }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Contexts;

    impl ContextStore for Contexts {
        fn list_contexts(&self) -> Result<Vec<String>, GateError> {
            Ok(vec!["dev".into(), "prod".into()])
        }

        fn current_context(&self) -> Result<String, GateError> {
            Ok("dev".into())
        }
    }

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl Executor for Recorder {
        fn run(&self, args: &[String]) -> Result<i32, GateError> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(0)
        }
    }

    fn run(line: &str, answer: &str) -> (Result<Outcome, GateError>, Vec<Vec<String>>, String) {
        let config = Config::default_config();
        let env = Environment::default();
        let recorder = Recorder::default();
        let gate = Gate::new(&config, &env, &Contexts, &recorder);
        let args = line.split_whitespace().map(String::from).collect();
        let mut input = answer.as_bytes();
        let mut out = Vec::new();
        let result = gate.run(args, &mut input, &mut out);
        (result, recorder.calls.into_inner(), String::from_utf8(out).unwrap())
    }

    #[test]
    fn no_command_is_notice() {
        let (result, calls, out) = run("", "");
        assert_eq!(result.unwrap(), Outcome::Handled);
        assert!(calls.is_empty());
        assert!(out.contains("No command specified"));
    }

    #[test]
    fn version_flag() {
        let (result, calls, out) = run("-V", "");
        assert_eq!(result.unwrap(), Outcome::Handled);
        assert!(calls.is_empty());
        assert_eq!(out, format!("helm-safe version {}\n", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn help_only_in_first_position() {
        let (result, calls, _) = run("install --help", "");
        // install --help is a modifying command without flags
        assert!(matches!(result, Err(GateError::MissingSafetyFlags(_))));
        assert!(calls.is_empty());
    }

    #[test]
    fn dump_config_is_toml() {
        let (_, calls, out) = run("--dump-config", "");
        assert!(calls.is_empty());
        assert!(out.contains("[modifying.commands]"));
    }

    #[test]
    fn safe_passes_through() {
        let (result, calls, out) = run("list -A", "");
        assert_eq!(result.unwrap(), Outcome::Executed);
        assert_eq!(calls, vec![vec!["list".to_string(), "-A".into()]]);
        assert!(out.is_empty());
    }

    #[test]
    fn cancelled_is_not_an_error() {
        let (result, calls, out) = run("delete web -n web --kube-context dev", "n\n");
        assert_eq!(result.unwrap(), Outcome::Cancelled);
        assert!(calls.is_empty());
        assert!(out.contains("Operation cancelled"));
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(Outcome::Executed.as_str(), "executed");
        assert_eq!(Outcome::Cancelled.as_str(), "cancelled");
        assert_eq!(Outcome::Handled.as_str(), "handled");
    }
}
