use crate::domain::{reason, LookupResult};
use crate::error::CoreError;

pub const RESULT_PLACEHOLDER: &str = "-";

const MSG_IDLE: &str = "Enter a student number and name.";
const MSG_SEARCHING: &str = "Searching...";
const MSG_FOUND: &str = "Account found.";
const MSG_NOT_FOUND: &str = "No matching account. Check the student number and name.";
const MSG_RESET_REQUESTED: &str =
    "Password reset request noted. An administrator will contact you; passwords are never shown here.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    Searching,
    Success,
    Error,
}

/// The single currently-displayed feedback state of the form. Exactly one is
/// active at a time; a fresh session always starts Idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl UiStatus {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Explicit display state: status region plus the resolved identifier shown
/// in the result region (`None` renders the placeholder). All transitions
/// are pure and produce a new state, so the machine is testable without a
/// terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub status: UiStatus,
    pub result: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::idle()
    }
}

impl DisplayState {
    pub fn idle() -> Self {
        Self {
            status: UiStatus::new(StatusKind::Idle, MSG_IDLE),
            result: None,
        }
    }

    /// Submit with valid input: enter Searching and hide any previous result.
    pub fn searching(&self) -> Self {
        Self {
            status: UiStatus::new(StatusKind::Searching, MSG_SEARCHING),
            result: None,
        }
    }

    /// Submit with invalid input: short-circuit straight to Error without
    /// entering Searching.
    pub fn rejected(&self, err: &CoreError) -> Self {
        Self {
            status: UiStatus::new(StatusKind::Error, err.to_string()),
            result: None,
        }
    }

    /// A lookup finished; leave Searching for Success or Error.
    pub fn resolved(&self, result: &LookupResult) -> Self {
        match result {
            LookupResult::Found(record) => Self {
                status: UiStatus::new(StatusKind::Success, MSG_FOUND),
                result: Some(record.id.clone()),
            },
            LookupResult::NotFound => Self {
                status: UiStatus::new(StatusKind::Error, MSG_NOT_FOUND),
                result: None,
            },
            LookupResult::Invalid(code) if code == reason::ENDPOINT_NOT_SET => Self {
                status: UiStatus::new(
                    StatusKind::Error,
                    format!("Lookup endpoint is not configured ({code})."),
                ),
                result: None,
            },
            LookupResult::Invalid(code) => Self {
                status: UiStatus::new(StatusKind::Error, format!("Invalid request: {code}")),
                result: None,
            },
            LookupResult::TransportError(code) => Self {
                status: UiStatus::new(StatusKind::Error, format!("Lookup failed: {code}")),
                result: None,
            },
        }
    }

    /// Explicit clear action: back to Idle, result region reverts to its
    /// placeholder.
    pub fn cleared(&self) -> Self {
        Self::idle()
    }

    /// Clipboard copy succeeded; keep the displayed result.
    pub fn copied(&self) -> Self {
        Self {
            status: UiStatus::new(StatusKind::Success, "Account ID copied to clipboard."),
            result: self.result.clone(),
        }
    }

    /// Clipboard copy failed; the result stays visible so it can be copied
    /// by hand.
    pub fn copy_failed(&self, detail: &str) -> Self {
        Self {
            status: UiStatus::new(StatusKind::Error, format!("Copy failed: {detail}")),
            result: self.result.clone(),
        }
    }

    /// The reset-request action only changes the status message. It never
    /// contacts any password system and never reveals a password.
    pub fn reset_requested(&self) -> Self {
        Self {
            status: UiStatus::new(StatusKind::Success, MSG_RESET_REQUESTED),
            result: self.result.clone(),
        }
    }

    pub fn result_text(&self) -> &str {
        self.result.as_deref().unwrap_or(RESULT_PLACEHOLDER)
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayState, StatusKind, RESULT_PLACEHOLDER};
    use crate::domain::{reason, AccountRecord, LookupResult};
    use crate::error::CoreError;

    #[test]
    fn starts_idle_with_placeholder() {
        let state = DisplayState::idle();
        assert_eq!(state.status.kind, StatusKind::Idle);
        assert_eq!(state.result_text(), RESULT_PLACEHOLDER);
    }

    #[test]
    fn submit_then_found_then_clear() {
        let state = DisplayState::idle().searching();
        assert_eq!(state.status.kind, StatusKind::Searching);
        assert!(state.result.is_none());

        let state = state.resolved(&LookupResult::Found(AccountRecord::new("s20301@school.edu")));
        assert_eq!(state.status.kind, StatusKind::Success);
        assert_eq!(state.result_text(), "s20301@school.edu");

        let state = state.cleared();
        assert_eq!(state.status.kind, StatusKind::Idle);
        assert_eq!(state.result_text(), RESULT_PLACEHOLDER);
    }

    #[test]
    fn invalid_input_short_circuits_to_error() {
        let state = DisplayState::idle().rejected(&CoreError::InvalidStudentNumber);
        assert_eq!(state.status.kind, StatusKind::Error);
        assert!(state.result.is_none());
    }

    #[test]
    fn not_found_is_an_error_without_result() {
        let state = DisplayState::idle()
            .searching()
            .resolved(&LookupResult::NotFound);
        assert_eq!(state.status.kind, StatusKind::Error);
        assert_eq!(state.result_text(), RESULT_PLACEHOLDER);
    }

    #[test]
    fn transport_error_surfaces_reason_code() {
        let state = DisplayState::idle()
            .searching()
            .resolved(&LookupResult::transport(reason::NETWORK_ERROR));
        assert_eq!(state.status.kind, StatusKind::Error);
        assert!(state.status.message.contains("NETWORK_ERROR"));
    }

    #[test]
    fn endpoint_not_set_is_reported_as_configuration_problem() {
        let state = DisplayState::idle().resolved(&LookupResult::invalid(reason::ENDPOINT_NOT_SET));
        assert_eq!(state.status.kind, StatusKind::Error);
        assert!(state.status.message.contains("ENDPOINT_NOT_SET"));
    }

    #[test]
    fn copy_and_reset_keep_the_result_visible() {
        let found = DisplayState::idle()
            .searching()
            .resolved(&LookupResult::Found(AccountRecord::new("s1@school.edu")));

        let copied = found.copied();
        assert_eq!(copied.result_text(), "s1@school.edu");
        assert_eq!(copied.status.kind, StatusKind::Success);

        let failed = found.copy_failed("no clipboard helper");
        assert_eq!(failed.result_text(), "s1@school.edu");
        assert_eq!(failed.status.kind, StatusKind::Error);

        let reset = found.reset_requested();
        assert_eq!(reset.result_text(), "s1@school.edu");
        assert_eq!(reset.status.kind, StatusKind::Success);
        assert!(!reset.status.message.to_lowercase().contains("password:"));
    }
}
