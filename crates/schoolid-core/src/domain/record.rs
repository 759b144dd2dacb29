use serde::{Deserialize, Serialize};

/// The resolved school account. Only the identifier ever exists client-side;
/// there is no password field anywhere in this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: String,
}

impl AccountRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
