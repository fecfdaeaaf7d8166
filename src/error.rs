/// Error type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors that can occur while building pools, planning meetings or
/// updating the ledger.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The pool sheet lacks a header, data rows, the anchor column or role columns
    #[error("malformed pool source: {0}")]
    MalformedPoolSource(String),

    #[error("meeting list is empty")]
    EmptyMeetingList,

    #[error("candidate pool is empty")]
    EmptyPool,

    /// No "a <day> de <month>" date could be resolved from a meeting label
    #[error("cannot resolve a calendar date from meeting label '{0}'")]
    UnresolvableMeetingDate(String),

    #[error("role column '{0}' not found in pool source")]
    RoleColumnNotFound(String),

    #[error("candidate '{0}' not found in pool source")]
    CandidateNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// A config value that parsed but cannot be used, such as a bad date format
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
