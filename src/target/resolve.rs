//! Ordered resolution of the effective namespace and context.
//!
//! Precedence: flag > environment > current-context query (context only) >
//! literal fallback. The validator and the confirmation prompt share this
//! code so they always agree on what the command will target.

use std::fmt;

use super::env::{CONTEXT_ENV, Environment, NAMESPACE_ENV};
use super::flags::TargetFlags;
use crate::kube::ContextStore;

/// Namespace used when neither flag nor environment names one.
pub const DEFAULT_NAMESPACE: &str = "default";
/// Context shown when it cannot be determined at all.
pub const UNKNOWN_CONTEXT: &str = "unknown";

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env(&'static str),
    CurrentContext,
    Fallback,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Flag => f.write_str("flag"),
            Source::Env(name) => write!(f, "${name}"),
            Source::CurrentContext => f.write_str("kubectl current-context"),
            Source::Fallback => f.write_str("fallback"),
        }
    }
}

/// A value together with the tier that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: Source,
}

/// One tier of the resolution order. Query tiers run only when reached.
pub enum Provider<'a> {
    Flag(Option<&'a str>),
    Env(&'static str, Option<&'a str>),
    CurrentContext(&'a dyn ContextStore),
    Literal(&'static str),
}

impl Provider<'_> {
    fn provide(&self) -> Option<Resolved> {
        let (value, source) = match self {
            Provider::Flag(v) => ((*v)?.to_string(), Source::Flag),
            Provider::Env(name, v) => ((*v)?.to_string(), Source::Env(*name)),
            Provider::CurrentContext(store) => match store.current_context() {
                Ok(ctx) => (ctx.trim().to_string(), Source::CurrentContext),
                Err(e) => {
                    log::debug!("current-context lookup failed: {e}");
                    return None;
                }
            },
            Provider::Literal(v) => (v.to_string(), Source::Fallback),
        };
        // Flag and env values are kept byte-for-byte: helm receives them as-is.
        if value.is_empty() {
            return None;
        }
        Some(Resolved { value, source })
    }
}

/// First non-empty value produced by `providers`, in order.
pub fn resolve_first(providers: &[Provider<'_>]) -> Option<Resolved> {
    providers.iter().find_map(Provider::provide)
}

/// Resolves the namespace and context targeted by one invocation.
pub struct TargetResolver<'a> {
    flags: TargetFlags,
    env: &'a Environment,
}

impl<'a> TargetResolver<'a> {
    pub fn new(args: &[String], env: &'a Environment) -> Self {
        Self {
            flags: TargetFlags::parse(args),
            env,
        }
    }

    /// Namespace given explicitly by flag or environment.
    pub fn explicit_namespace(&self) -> Option<Resolved> {
        resolve_first(&self.namespace_tiers())
    }

    /// Context given explicitly by flag or environment.
    pub fn explicit_context(&self) -> Option<Resolved> {
        resolve_first(&self.context_tiers())
    }

    /// Namespace helm will use, defaulting to `default`.
    pub fn effective_namespace(&self) -> Resolved {
        let mut tiers = self.namespace_tiers();
        tiers.push(Provider::Literal(DEFAULT_NAMESPACE));
        resolve_first(&tiers).unwrap_or_else(|| fallback(DEFAULT_NAMESPACE))
    }

    /// Context helm will use: explicit value, else the kubeconfig's current
    /// context, else `unknown`.
    pub fn effective_context(&self, store: &dyn ContextStore) -> Resolved {
        let mut tiers = self.context_tiers();
        tiers.push(Provider::CurrentContext(store));
        tiers.push(Provider::Literal(UNKNOWN_CONTEXT));
        resolve_first(&tiers).unwrap_or_else(|| fallback(UNKNOWN_CONTEXT))
    }

    fn namespace_tiers(&self) -> Vec<Provider<'_>> {
        vec![
            Provider::Flag(self.flags.namespace()),
            Provider::Env(NAMESPACE_ENV, self.env.get(NAMESPACE_ENV)),
        ]
    }

    fn context_tiers(&self) -> Vec<Provider<'_>> {
        vec![
            Provider::Flag(self.flags.kube_context()),
            Provider::Env(CONTEXT_ENV, self.env.get(CONTEXT_ENV)),
        ]
    }
}

fn fallback(value: &str) -> Resolved {
    Resolved {
        value: value.to_string(),
        source: Source::Fallback,
    }
}
