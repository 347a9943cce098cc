use std::collections::HashMap;

/// Overrides the namespace helm operates in.
pub const NAMESPACE_ENV: &str = "HELM_NAMESPACE";
/// Overrides the kube context helm operates against.
pub const CONTEXT_ENV: &str = "HELM_KUBECONTEXT";
/// Overrides the helm binary that commands are delegated to.
pub const HELM_BIN_ENV: &str = "HELM_BIN";

/// Snapshot of the process environment, captured once per invocation.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment. Variables whose name or
    /// value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build an environment from explicit pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `key`, treating an empty value as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }
}
