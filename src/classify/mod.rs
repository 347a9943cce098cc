pub mod classification;
pub mod table;

pub use classification::Classification;
pub use table::CommandTable;

use crate::config::Config;

/// The SAFE and MODIFYING tables, built once at startup and read-only after.
pub struct Classifier {
    safe: CommandTable,
    modifying: CommandTable,
}

impl Classifier {
    /// Build the classifier from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            safe: CommandTable::from_config(&config.safe),
            modifying: CommandTable::from_config(&config.modifying),
        }
    }

    /// Classify `command` followed by its trailing arguments.
    ///
    /// SAFE is consulted first, so a pair listed in both tables is Safe.
    /// Anything in neither table is Unclassified and passes through.
    pub fn classify(&self, command: &str, rest: &[String]) -> Classification {
        if self.safe.matches(command, rest) {
            return Classification::Safe;
        }
        if self.modifying.matches(command, rest) {
            return Classification::Modifying;
        }
        Classification::Unclassified
    }

    pub fn safe(&self) -> &CommandTable {
        &self.safe
    }

    pub fn modifying(&self) -> &CommandTable {
        &self.modifying
    }
}
