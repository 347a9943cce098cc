/// Outcome of classifying a helm command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Known read-only command; forwarded without checks.
    Safe,
    /// Known destructive command; requires validation and confirmation.
    Modifying,
    /// Not listed in either table; forwarded without checks.
    Unclassified,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Safe => "safe",
            Classification::Modifying => "modifying",
            Classification::Unclassified => "unclassified",
        }
    }
}
