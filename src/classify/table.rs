use std::collections::BTreeMap;

use crate::config::TableConfig;

/// A classification table: top-level command → gated subcommands.
///
/// An empty subcommand set matches the command regardless of what follows it.
/// A non-empty set matches only when the first trailing argument is a member,
/// so a bare `helm repo` never matches a `repo = ["add"]` entry.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl CommandTable {
    /// Build a table from its configuration section.
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            entries: config.commands.clone(),
        }
    }

    /// Check whether `command` followed by `rest` is listed in this table.
    pub fn matches(&self, command: &str, rest: &[String]) -> bool {
        let Some(subcommands) = self.entries.get(command) else {
            return false;
        };
        if subcommands.is_empty() {
            return true;
        }
        rest.first()
            .is_some_and(|sub| subcommands.iter().any(|s| s == sub))
    }

    /// Flattened `command` / `command subcommand` labels, sorted.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .entries
            .iter()
            .flat_map(|(name, subs)| {
                if subs.is_empty() {
                    vec![name.clone()]
                } else {
                    subs.iter().map(|s| format!("{name} {s}")).collect()
                }
            })
            .collect();
        labels.sort();
        labels
    }

    /// Top-level command names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CommandTable {
        let mut commands = BTreeMap::new();
        commands.insert("install".to_string(), vec![]);
        commands.insert("repo".to_string(), vec!["add".to_string(), "remove".into()]);
        CommandTable::from_config(&TableConfig { commands })
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn whole_command_matches_any_args() {
        let t = table();
        assert!(t.matches("install", &args(&[])));
        assert!(t.matches("install", &args(&["rel", "./chart"])));
    }

    #[test]
    fn subcommand_must_be_listed() {
        let t = table();
        assert!(t.matches("repo", &args(&["add", "stable"])));
        assert!(!t.matches("repo", &args(&["list"])));
    }

    #[test]
    fn subcommand_entry_needs_an_argument() {
        assert!(!table().matches("repo", &args(&[])));
    }

    #[test]
    fn subcommand_is_first_argument_only() {
        // "add" in second position is not the subcommand
        assert!(!table().matches("repo", &args(&["list", "add"])));
    }

    #[test]
    fn unknown_command() {
        assert!(!table().matches("lint", &args(&["./chart"])));
    }

    #[test]
    fn labels_flatten_and_sort() {
        assert_eq!(table().labels(), vec!["install", "repo add", "repo remove"]);
    }
}
