//! User-facing output: notices, warnings, the confirmation summary, help.

use std::io::{self, Write};

use crate::classify::Classifier;
use crate::error::GateError;

/// Category of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Notice,
    Warning,
    Alert,
    ProductionAlert,
}

/// Print a message in the uniform style for its kind.
pub fn message(
    out: &mut dyn Write,
    kind: MessageKind,
    title: &str,
    body: &str,
    hint: &str,
) -> io::Result<()> {
    match kind {
        MessageKind::Notice => {
            writeln!(out, "❗ NOTICE: {title}")?;
            if !body.is_empty() {
                writeln!(out, "          {body}")?;
            }
        }
        MessageKind::Warning => {
            writeln!(out, "✋ WARNING: {title}")?;
            if !body.is_empty() {
                writeln!(out, "         -> {body}")?;
            }
        }
        MessageKind::Alert => {
            writeln!(out, "⚠️  {title} ⚠️")?;
            if !body.is_empty() {
                writeln!(out, "   {body}")?;
            }
        }
        MessageKind::ProductionAlert => {
            writeln!(out, "🚨 {title} 🚨")?;
            if !body.is_empty() {
                writeln!(out, "   {body}")?;
            }
        }
    }
    if !hint.is_empty() {
        writeln!(out, "   {hint}")?;
    }
    Ok(())
}

/// Explain why a modifying command was refused.
pub fn validation_failure(out: &mut dyn Write, err: &GateError) -> io::Result<()> {
    match err {
        GateError::MissingSafetyFlags(fields) => {
            message(out, MessageKind::Warning, "Missing required safety flags", "", "")?;
            writeln!(out, "Missing flags: {}", fields.join(", "))?;
            writeln!(out)?;
            message(
                out,
                MessageKind::Notice,
                "Safety requirement",
                "Modifying Helm commands must specify both namespace and context to prevent accidental operations",
                "Add the missing flags and try again",
            )
        }
        GateError::ContextNotFound { name, candidates } => {
            message(
                out,
                MessageKind::Warning,
                "Invalid context specified",
                &format!("Context '{name}' does not exist in your kubeconfig"),
                "",
            )?;
            writeln!(out, "Available contexts:")?;
            writeln!(out, "{}", candidates.join(", "))
        }
        GateError::ConfigQueryFailed { reason, .. } => message(
            out,
            MessageKind::Alert,
            "Could not read kube contexts",
            reason,
            "Check that kubectl is installed and your kubeconfig is readable",
        ),
        _ => Ok(()),
    }
}

/// The summary shown before the confirmation prompt, ending with the prompt.
pub fn confirmation(
    out: &mut dyn Write,
    command_line: &str,
    context: &str,
    namespace: &str,
    production: bool,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "🔍 HELM OPERATION CONFIRMATION")?;
    writeln!(out, "{}", "━".repeat(32))?;
    writeln!(out, "Command:   {command_line}")?;
    writeln!(out, "Context:   {context}")?;
    writeln!(out, "Namespace: {namespace}")?;
    writeln!(out)?;

    if production {
        message(
            out,
            MessageKind::ProductionAlert,
            "PRODUCTION CONTEXT DETECTED",
            "You are about to execute a command in what appears to be a production context",
            "",
        )?;
        writeln!(out)?;
    }

    write!(out, "Do you want to continue? (y/N): ")?;
    out.flush()
}

pub fn version(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "helm-safe version {}", env!("CARGO_PKG_VERSION"))
}

/// Static usage text. Command lists come from the live tables.
pub fn help(out: &mut dyn Write, classifier: &Classifier) -> io::Result<()> {
    version(out)?;
    writeln!(out)?;
    writeln!(out, "DESCRIPTION:")?;
    writeln!(out, "  helm-safe provides an interactive safety net for modifying Helm commands.")?;
    writeln!(out, "  It acts as a wrapper around destructive Helm operations to prevent common")?;
    writeln!(out, "  mistakes by requiring explicit --namespace and --kube-context flags.")?;
    writeln!(out)?;
    writeln!(out, "USAGE:")?;
    writeln!(out, "  helm safe [HELM_COMMAND] [ARGS...]")?;
    writeln!(out)?;
    writeln!(out, "  The helm command must come first. Anything that starts with a flag")?;
    writeln!(out, "  (e.g. 'helm safe -n web install ...') is not recognized as a modifying")?;
    writeln!(out, "  command and is passed to helm without safety checks.")?;
    writeln!(out)?;
    writeln!(out, "FLAGS:")?;
    writeln!(out, "  -h, --help        Show this help")?;
    writeln!(out, "  -V, --version     Show the helm-safe version")?;
    writeln!(out, "      --dump-config Print the merged configuration")?;
    writeln!(out)?;
    writeln!(out, "EXAMPLES:")?;
    writeln!(out, "  helm safe install my-app ./chart --namespace my-ns --kube-context dev")?;
    writeln!(out, "  helm safe upgrade my-app ./chart --namespace my-ns --kube-context dev")?;
    writeln!(out, "  helm safe uninstall my-app --namespace my-ns --kube-context dev")?;
    writeln!(out)?;
    writeln!(out, "MODIFYING COMMANDS (require safety checks):")?;
    columns(out, &classifier.modifying().labels(), 4)?;
    writeln!(out)?;
    writeln!(out, "SAFE COMMANDS (pass through without checks):")?;
    let safe: Vec<&str> = classifier.safe().names().collect();
    for row in safe.chunks(10) {
        writeln!(out, "  {}", row.join(", "))?;
    }
    writeln!(out)?;
    writeln!(out, "ENVIRONMENT:")?;
    writeln!(out, "  HELM_NAMESPACE     Namespace used when --namespace is not given")?;
    writeln!(out, "  HELM_KUBECONTEXT   Context used when --kube-context is not given")?;
    writeln!(out, "  HELM_BIN           Helm binary to run (default: helm)")?;
    writeln!(out, "  HELM_SAFE_LOG      Log level for ~/.local/share/helm-safe/helm-safe.log")
}

fn columns(out: &mut dyn Write, items: &[String], per_row: usize) -> io::Result<()> {
    for row in items.chunks(per_row) {
        write!(out, "  ")?;
        for item in row {
            write!(out, "{item:<18}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn render(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn missing_flags_message() {
        let err = GateError::MissingSafetyFlags(vec!["--namespace/-n".into(), "--kube-context".into()]);
        let text = render(|out| validation_failure(out, &err));
        assert!(text.contains("Missing required safety flags"));
        assert!(text.contains("Missing flags: --namespace/-n, --kube-context"));
        assert!(text.contains("Add the missing flags and try again"));
    }

    #[test]
    fn context_not_found_message() {
        let err = GateError::ContextNotFound {
            name: "prod".into(),
            candidates: vec!["dev".into(), "staging".into()],
        };
        let text = render(|out| validation_failure(out, &err));
        assert!(text.contains("Context 'prod' does not exist in your kubeconfig"));
        assert!(text.contains("Available contexts:\ndev, staging\n"));
    }

    #[test]
    fn query_failure_is_an_alert() {
        let err = GateError::ConfigQueryFailed {
            command: "kubectl config get-contexts -o name".into(),
            reason: "kubectl: not found".into(),
        };
        let text = render(|out| validation_failure(out, &err));
        assert!(text.starts_with("⚠️  Could not read kube contexts ⚠️\n"));
        assert!(text.contains("   kubectl: not found\n"));
    }

    #[test]
    fn confirmation_ends_with_prompt() {
        let text = render(|out| confirmation(out, "helm delete x", "dev", "web", false));
        assert!(text.ends_with("Do you want to continue? (y/N): "));
        assert!(!text.contains("🚨"));
    }

    #[test]
    fn help_lists_gated_commands() {
        let classifier = Classifier::from_config(&Config::default_config());
        let text = render(|out| help(out, &classifier));
        assert!(text.starts_with("helm-safe version "));
        assert!(text.contains("repo add"));
        assert!(text.contains("dependency build"));
        assert!(!text.contains("repo list "));
        assert!(text.contains("SAFE COMMANDS"));
        assert!(text.contains("passed to helm without safety checks"));
    }
}
