use std::fmt;

/// Failure to turn one webhook event into a notification.
///
/// These never outlive the event that produced them: the HTTP layer logs them
/// and answers the sender, the process keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A field the current operation cannot do without is absent.
    /// Holds the dotted path into the payload, e.g. `pull_request.number`.
    MissingField(String),
    /// No formatter is registered for this event kind and action.
    UnknownAction { kind: String, action: String },
    /// The payload is present but has the wrong shape (e.g. a string number).
    InvalidPayload(String),
}

impl FormatError {
    pub fn missing(path: &str) -> Self {
        FormatError::MissingField(path.to_string())
    }

    /// Short machine-readable name, used in HTTP error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FormatError::MissingField(_) => "missing_field",
            FormatError::UnknownAction { .. } => "unknown_action",
            FormatError::InvalidPayload(_) => "invalid_payload",
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MissingField(path) => write!(f, "Missing required field: {}", path),
            FormatError::UnknownAction { kind, action } => {
                write!(f, "Unknown action '{}' for event '{}'", action, kind)
            }
            FormatError::InvalidPayload(e) => write!(f, "Invalid payload: {}", e),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(error: serde_json::Error) -> Self {
        FormatError::InvalidPayload(error.to_string())
    }
}
