//! The addUser request form model.

/// Fixed `action` field value for a claim request.
pub const ACTION_ADD_USER: &str = "addUser";

/// Fixed `tokenType` field value; the credential payload carries an OAuth
/// access token rather than stored credentials.
pub const TOKEN_TYPE_ACCESS_TOKEN: &str = "accesstoken";

/// A fully composed claim request, ready for form encoding.
///
/// `blob` and `client_key` are already base64; `device_id` is the
/// client-chosen identifier for this claim attempt, not the receiver's id.
#[derive(Debug, Clone)]
pub struct ClaimRequest {
    pub user_name: String,
    pub blob: String,
    pub client_key: String,
    pub device_id: String,
    pub device_name: String,
}

impl ClaimRequest {
    /// Produce the exact wire field set for the form-urlencoded POST body.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("action", ACTION_ADD_USER.to_string()),
            ("userName", self.user_name.clone()),
            ("blob", self.blob.clone()),
            ("clientKey", self.client_key.clone()),
            ("deviceId", self.device_id.clone()),
            ("deviceName", self.device_name.clone()),
            ("tokenType", TOKEN_TYPE_ACCESS_TOKEN.to_string()),
        ]
    }
}
