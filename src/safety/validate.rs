use crate::error::GateError;
use crate::kube::ContextStore;
use crate::target::flags::{CONTEXT_FLAG, NAMESPACE_FLAG};
use crate::target::{Environment, Invocation, TargetResolver};

/// Result of the safety checks for a modifying command.
pub type Verdict = Result<(), GateError>;

/// Check that a modifying invocation names its namespace and context, and
/// that the named context exists in the kubeconfig.
///
/// The namespace and context may come from their flags or from
/// `HELM_NAMESPACE` / `HELM_KUBECONTEXT`. Missing values fail before the
/// kubeconfig is queried.
pub fn validate(invocation: &Invocation, env: &Environment, store: &dyn ContextStore) -> Verdict {
    let resolver = TargetResolver::new(invocation.args(), env);
    let namespace = resolver.explicit_namespace();
    let context = resolver.explicit_context();

    let mut missing = Vec::new();
    if namespace.is_none() {
        missing.push(NAMESPACE_FLAG.to_string());
    }
    if context.is_none() {
        missing.push(CONTEXT_FLAG.to_string());
    }
    if !missing.is_empty() {
        log::info!("missing safety flags: {}", missing.join(", "));
        return Err(GateError::MissingSafetyFlags(missing));
    }

    if let Some(ctx) = context {
        log::debug!("validating context {} (from {})", ctx.value, ctx.source);
        validate_context(&ctx.value, store)?;
    }
    Ok(())
}

/// Require `name` to match one of the store's contexts exactly.
pub fn validate_context(name: &str, store: &dyn ContextStore) -> Verdict {
    let contexts = store.list_contexts()?;
    if contexts.iter().any(|c| c.trim() == name) {
        return Ok(());
    }

    let mut candidates: Vec<String> = contexts
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    candidates.sort();
    candidates.dedup();

    log::info!("context {name} not found among {} contexts", candidates.len());
    Err(GateError::ContextNotFound {
        name: name.to_string(),
        candidates,
    })
}
