use serde::{Deserialize, Serialize};

/// Identity returned by `GET /session` for a valid set of credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub email: String,
    #[serde(default)]
    pub role: String,
}
