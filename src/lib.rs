//! helm-safe: a safety gate in front of Helm.
//!
//! Every invocation is classified as safe, modifying, or unclassified using
//! two configurable tables. Safe and unclassified commands go straight to
//! helm. Modifying commands must name a namespace and a kube context (by
//! flag or environment), the context must exist in the kubeconfig, and the
//! user must confirm a summary of what is about to run. Helm then receives
//! the original argument vector unchanged.
//!
//! # Architecture
//!
//! - **[`classify`]**: SAFE/MODIFYING tables and the classifier.
//! - **[`target`]**: argument vector, permissive flag scan, environment snapshot, precedence resolver.
//! - **[`safety`]**: validation verdict and interactive confirmation.
//! - **[`kube`]**: kubeconfig context queries via `kubectl config`.
//! - **[`exec`]**: delegation to the helm binary.
//! - **[`gate`]**: the per-invocation state machine tying the above together.
//! - **[`config`]**: embedded defaults + user overlay merge.
//! - **[`logging`]**: file logging to `~/.local/share/helm-safe/helm-safe.log`.

/// Command classification tables.
pub mod classify;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Error taxonomy.
pub mod error;
/// Helm process delegation.
pub mod exec;
/// Invocation state machine.
pub mod gate;
/// Kubeconfig context queries.
pub mod kube;
/// File-based logging.
pub mod logging;
/// User-facing messages and help text.
pub mod report;
/// Validation and confirmation.
pub mod safety;
/// Namespace and context resolution.
pub mod target;

use classify::{Classification, Classifier};

/// Classify a command against the default tables.
///
/// This is the main entry point for tests and simple usage.
/// For CLI usage with a user config, build the classifier directly.
pub fn classify(command: &str, rest: &[&str]) -> Classification {
    let config = config::Config::default_config();
    let classifier = Classifier::from_config(&config);
    let rest: Vec<String> = rest.iter().map(|s| s.to_string()).collect();
    classifier.classify(command, &rest)
}
