use std::io::{BufRead, Write};

use crate::kube::ContextStore;
use crate::report;
use crate::target::{Environment, Invocation, TargetResolver};

/// Substrings that mark a context as production-like.
pub const PRODUCTION_KEYWORDS: &[&str] = &["prod", "production", "live", "prd"];

/// Case-insensitive substring check against [`PRODUCTION_KEYWORDS`].
pub fn is_production_context(context: &str) -> bool {
    let lower = context.to_lowercase();
    PRODUCTION_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Show what is about to run and ask the user to confirm it.
///
/// Blocks until one line is read from `input`. Only `y` or `yes` (any case,
/// surrounding whitespace ignored) confirms; anything else, end of input,
/// or an I/O error declines.
pub fn confirm(
    invocation: &Invocation,
    env: &Environment,
    store: &dyn ContextStore,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> bool {
    let resolver = TargetResolver::new(invocation.args(), env);
    let namespace = resolver.effective_namespace();
    let context = resolver.effective_context(store);
    log::debug!(
        "effective namespace {} (from {}), context {} (from {})",
        namespace.value,
        namespace.source,
        context.value,
        context.source
    );

    let production = is_production_context(&context.value);
    let rendered = report::confirmation(
        out,
        &invocation.display(),
        &context.value,
        &namespace.value,
        production,
    );
    if let Err(e) = rendered {
        log::warn!("failed to render confirmation prompt: {e}");
        return false;
    }

    read_answer(input)
}

/// Read one line and decide whether it confirms.
pub fn read_answer(input: &mut dyn BufRead) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => false,
        Ok(_) => is_affirmative(&line),
        Err(e) => {
            log::warn!("failed to read confirmation: {e}");
            false
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
