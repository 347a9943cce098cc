use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Location of the user overlay, relative to `$HOME`.
const OVERLAY_PATH: &str = ".config/helm-safe/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub safe: TableConfig,
    #[serde(default)]
    pub modifying: TableConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Helm binary used when `HELM_BIN` is not set.
    #[serde(default = "default_helm_bin")]
    pub helm_bin: String,
    /// Binary queried for the kubeconfig context list and current context.
    #[serde(default = "default_kubectl_bin")]
    pub kubectl_bin: String,
    /// Log file path. `~` and `$VAR` are expanded.
    #[serde(default)]
    pub log_file: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            helm_bin: default_helm_bin(),
            kubectl_bin: default_kubectl_bin(),
            log_file: String::new(),
            log_level: default_log_level(),
        }
    }
}

fn default_helm_bin() -> String {
    "helm".into()
}

fn default_kubectl_bin() -> String {
    "kubectl".into()
}

fn default_log_level() -> String {
    "info".into()
}

/// One classification table: command name → gated subcommands.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct TableConfig {
    #[serde(default)]
    pub commands: BTreeMap<String, Vec<String>>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    safe: TableOverlay,
    #[serde(default)]
    modifying: TableOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    helm_bin: Option<String>,
    kubectl_bin: Option<String>,
    log_file: Option<String>,
    log_level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TableOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    commands: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    remove: Vec<String>,
}

// ── Merge logic ──

/// Extend a subcommand list with additions, skipping duplicates.
fn merge_list(base: &mut Vec<String>, add: Vec<String>) {
    for item in add {
        if !base.contains(&item) {
            base.push(item);
        }
    }
}

/// Merge a user table into a default table.
/// In replace mode: user entries replace the defaults entirely.
/// In merge mode: remove commands first, then add new commands or extend
/// the subcommand list of existing ones.
fn merge_table(base: &mut TableConfig, overlay: TableOverlay) {
    if overlay.replace {
        base.commands = overlay.commands;
        return;
    }
    base.commands
        .retain(|name, _| !overlay.remove.contains(name));
    for (name, subcommands) in overlay.commands {
        match base.commands.get_mut(&name) {
            // An existing whole-command entry stays whole-command.
            Some(existing) if existing.is_empty() => {}
            // Adding a whole-command entry widens the match to every subcommand.
            Some(existing) if subcommands.is_empty() => existing.clear(),
            Some(existing) => merge_list(existing, subcommands),
            None => {
                base.commands.insert(name, subcommands);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/helm-safe/config.toml (if exists)
    ///
    /// Scalars override. Table entries extend the defaults unless the
    /// section sets `replace = true`; `remove` drops whole commands.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/helm-safe/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(OVERLAY_PATH);
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("helm-safe: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.helm_bin {
            self.settings.helm_bin = v;
        }
        if let Some(v) = s.kubectl_bin {
            self.settings.kubectl_bin = v;
        }
        if let Some(v) = s.log_file {
            self.settings.log_file = v;
        }
        if let Some(v) = s.log_level {
            self.settings.log_level = v;
        }

        merge_table(&mut self.safe, overlay.safe);
        merge_table(&mut self.modifying, overlay.modifying);
    }

    /// Render the merged configuration as TOML (for `--dump-config`).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

impl Settings {
    /// Expanded log file path, or `None` when logging is disabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        if self.log_file.trim().is_empty() {
            return None;
        }
        let expanded = shellexpand::full(&self.log_file).ok()?;
        Some(PathBuf::from(expanded.as_ref()))
    }

    /// Expanded kubectl binary path.
    pub fn kubectl_path(&self) -> String {
        expand_bin(&self.kubectl_bin)
    }

    /// Helm binary to delegate to: the override value when non-empty,
    /// otherwise the configured default.
    pub fn helm_path(&self, override_value: Option<&str>) -> String {
        match override_value {
            Some(v) if !v.trim().is_empty() => expand_bin(v),
            _ => expand_bin(&self.helm_bin),
        }
    }
}

/// Expand `~` and `$VAR` in a binary path; fall back to the raw value
/// when a referenced variable is undefined.
fn expand_bin(raw: &str) -> String {
    shellexpand::full(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subcommands<'a>(table: &'a TableConfig, name: &str) -> Option<&'a Vec<String>> {
        table.commands.get(name)
    }

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert!(!config.safe.commands.is_empty());
        assert!(!config.modifying.commands.is_empty());
        assert_eq!(config.settings.helm_bin, "helm");
        assert_eq!(config.settings.kubectl_bin, "kubectl");
    }

    #[test]
    fn default_config_has_expected_commands() {
        let config = Config::default_config();
        assert_eq!(subcommands(&config.safe, "list"), Some(&vec![]));
        assert_eq!(subcommands(&config.modifying, "install"), Some(&vec![]));
        assert_eq!(
            subcommands(&config.modifying, "repo"),
            Some(&vec!["add".to_string(), "update".into(), "remove".into()])
        );
        assert_eq!(
            subcommands(&config.safe, "repo"),
            Some(&vec!["list".to_string(), "index".into()])
        );
    }

    #[test]
    fn default_tables_disjoint() {
        let config = Config::default_config();
        for (name, modifying) in &config.modifying.commands {
            let Some(safe) = config.safe.commands.get(name) else {
                continue;
            };
            assert!(!safe.is_empty() && !modifying.is_empty(), "{name}");
            for sub in modifying {
                assert!(!safe.contains(sub), "{name} {sub}");
            }
        }
    }

    // ── Merge semantics ──

    #[test]
    fn overlay_adds_command() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [modifying.commands]
            registry = ["login", "logout"]
        "#,
        );
        assert!(config.modifying.commands.contains_key("install"));
        assert_eq!(
            subcommands(&config.modifying, "registry"),
            Some(&vec!["login".to_string(), "logout".into()])
        );
    }

    #[test]
    fn overlay_extends_subcommands_without_duplicates() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [safe.commands]
            show = ["values", "crds"]
        "#,
        );
        let show = subcommands(&config.safe, "show").unwrap();
        assert_eq!(show.iter().filter(|s| *s == "values").count(), 1);
        assert!(show.contains(&"crds".to_string()));
        assert!(show.contains(&"readme".to_string()));
    }

    #[test]
    fn overlay_whole_command_widens_entry() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [modifying.commands]
            plugin = []
        "#,
        );
        assert_eq!(subcommands(&config.modifying, "plugin"), Some(&vec![]));
    }

    #[test]
    fn overlay_subcommands_do_not_narrow_whole_command() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [modifying.commands]
            install = ["foo"]
        "#,
        );
        assert_eq!(subcommands(&config.modifying, "install"), Some(&vec![]));
    }

    #[test]
    fn overlay_removes_command() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [safe]
            remove = ["env", "pull"]
        "#,
        );
        assert!(!config.safe.commands.contains_key("env"));
        assert!(!config.safe.commands.contains_key("pull"));
        assert!(config.safe.commands.contains_key("list"));
    }

    #[test]
    fn overlay_replace_table() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [modifying]
            replace = true
            [modifying.commands]
            install = []
        "#,
        );
        assert_eq!(config.modifying.commands.len(), 1);
        assert!(config.modifying.commands.contains_key("install"));
        // The other table keeps its defaults
        assert!(config.safe.commands.contains_key("list"));
    }

    #[test]
    fn overlay_settings_override() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            kubectl_bin = "/opt/bin/kubectl"
            log_level = "debug"
        "#,
        );
        assert_eq!(config.settings.kubectl_bin, "/opt/bin/kubectl");
        assert_eq!(config.settings.log_level, "debug");
        // Omitted settings remain at defaults
        assert_eq!(config.settings.helm_bin, "helm");
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let original = Config::default_config();
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert_eq!(config.safe.commands, original.safe.commands);
        assert_eq!(config.modifying.commands, original.modifying.commands);
    }

    #[test]
    fn helm_path_prefers_override() {
        let settings = Settings::default();
        assert_eq!(settings.helm_path(Some("/usr/local/bin/helm3")), "/usr/local/bin/helm3");
        assert_eq!(settings.helm_path(Some("")), "helm");
        assert_eq!(settings.helm_path(None), "helm");
    }

    #[test]
    fn empty_log_file_disables_logging() {
        let settings = Settings::default();
        assert!(settings.log_path().is_none());
    }

    #[test]
    fn dump_config_round_trips() {
        let config = Config::default_config();
        let dumped = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&dumped).unwrap();
        assert_eq!(parsed.modifying.commands, config.modifying.commands);
    }
}
