use crate::domain::AccountRecord;

/// Reason codes carried by `Invalid` and `TransportError` results. Server
/// error strings outside this set are passed through verbatim.
pub mod reason {
    pub const ENDPOINT_NOT_SET: &str = "ENDPOINT_NOT_SET";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const BAD_FORMAT: &str = "BAD_FORMAT";
    pub const EMPTY_ID: &str = "EMPTY_ID";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Outcome of a single lookup attempt. Every variant is terminal for the
/// attempt; there is no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Found(AccountRecord),
    NotFound,
    Invalid(String),
    TransportError(String),
}

impl LookupResult {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::TransportError(reason.into())
    }
}
