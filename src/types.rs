use serde::{Deserialize, Serialize};

/// Status fields present on every directory API response.
#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

#[derive(Debug, Deserialize)]
pub struct AccessTokenResponse {
    #[serde(default)]
    pub access_token: String,
    /// Seconds, as reported by the server. Informational only.
    pub expires_in: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct BatchDeleteRequest<'a> {
    pub useridlist: Vec<&'a str>,
}

/// Body for `batch/invite`: members, departments and tags to invite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InviteRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub party: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<u64>,
}
