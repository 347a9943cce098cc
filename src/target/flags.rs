//! Permissive extraction of the target flags from a helm argument vector.
//!
//! Only `--namespace`/`-n` and `--kube-context` are recognized. Every other
//! token is skipped, since helm accepts many flags this wrapper never needs
//! to understand. Parsing stops at a bare `--`.

/// Flag spellings, used in diagnostics.
pub const NAMESPACE_FLAG: &str = "--namespace/-n";
pub const CONTEXT_FLAG: &str = "--kube-context";

/// Target flags found on the command line. The last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetFlags {
    pub namespace: Option<String>,
    pub kube_context: Option<String>,
}

impl TargetFlags {
    /// Scan `args` for the target flags.
    ///
    /// Accepted forms: `--namespace ns`, `--namespace=ns`, `-n ns`, `-n=ns`,
    /// `-nns`, `--kube-context ctx`, `--kube-context=ctx`. A flag at the end
    /// of the vector with no value is ignored.
    pub fn parse(args: &[String]) -> Self {
        let mut flags = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if arg == "--" {
                break;
            }
            let slot = if let Some(rest) = arg.strip_prefix("--namespace") {
                Some((&mut flags.namespace, rest))
            } else if let Some(rest) = arg.strip_prefix("--kube-context") {
                Some((&mut flags.kube_context, rest))
            } else if let Some(rest) = arg.strip_prefix("-n") {
                Some((&mut flags.namespace, rest))
            } else {
                None
            };
            let Some((target, rest)) = slot else {
                continue;
            };

            if let Some(value) = rest.strip_prefix('=') {
                *target = Some(value.to_string());
            } else if rest.is_empty() {
                if let Some(value) = iter.next() {
                    *target = Some(value.clone());
                }
            } else if arg.starts_with("-n") && !arg.starts_with("--") {
                // -nmy-namespace
                *target = Some(rest.to_string());
            }
            // anything else is a longer unknown flag, e.g. --namespaces
        }

        flags
    }

    /// The namespace flag value, if non-empty.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|v| !v.is_empty())
    }

    /// The kube-context flag value, if non-empty.
    pub fn kube_context(&self) -> Option<&str> {
        self.kube_context.as_deref().filter(|v| !v.is_empty())
    }
}
