//! The two gates a modifying command passes before helm runs.

/// Interactive confirmation and the production-context heuristic.
pub mod confirm;
/// Namespace/context presence and context-existence checks.
pub mod validate;

pub use confirm::{confirm, is_production_context};
pub use validate::{Verdict, validate};
