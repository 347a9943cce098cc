//! Who an invocation targets: the argument vector, its target flags, and
//! the effective namespace and context after precedence is applied.

pub mod env;
pub mod flags;
pub mod resolve;

pub use env::Environment;
pub use flags::TargetFlags;
pub use resolve::{Resolved, Source, TargetResolver};

/// The full argument vector as received, minus the program name.
///
/// Never rewritten: the same vector is handed to helm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
}

impl Invocation {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    /// The helm command name (first argument).
    pub fn command(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }

    /// Arguments after the command name.
    pub fn rest(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The command line as shown to the user: `helm <args>`, with arguments
    /// quoted where the shell would need it.
    pub fn display(&self) -> String {
        let joined = shlex::try_join(self.args.iter().map(|s| s.as_str()))
            .unwrap_or_else(|_| self.args.join(" "));
        if joined.is_empty() {
            "helm".into()
        } else {
            format!("helm {joined}")
        }
    }
}
