//! The device's reply, passed through verbatim.

use crate::error::ProtocolError;
use serde_json::Value;

/// The device's JSON reply to a claim request.
///
/// No schema is assumed beyond "is valid JSON" — firmware across vendors
/// disagrees on the exact shape. The raw value is preserved; `status()` and
/// `status_string()` read the two fields most firmwares do send.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimResponse(Value);

impl ClaimResponse {
    /// Parse a response body.
    ///
    /// An empty body and a non-JSON body are distinct failures: the former
    /// usually means the device dropped the request, the latter that it
    /// answered with something other than its JSON status object.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProtocolError> {
        if body.is_empty() {
            return Err(ProtocolError::EmptyResponse);
        }
        let value =
            serde_json::from_slice(body).map_err(|e| ProtocolError::InvalidJson(e.to_string()))?;
        Ok(Self(value))
    }

    /// Numeric `status` field, if present.
    pub fn status(&self) -> Option<i64> {
        self.0.get("status").and_then(Value::as_i64)
    }

    /// `statusString` field, if present.
    pub fn status_string(&self) -> Option<&str> {
        self.0.get("statusString").and_then(Value::as_str)
    }

    /// Borrow the raw JSON value.
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Consume into the raw JSON value.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_object() {
        let response =
            ClaimResponse::from_slice(br#"{"status":101,"statusString":"OK"}"#).unwrap();
        assert_eq!(response.status(), Some(101));
        assert_eq!(response.status_string(), Some("OK"));
    }

    #[test]
    fn preserves_unknown_fields_verbatim() {
        let response =
            ClaimResponse::from_slice(br#"{"status":0,"firmware":"1.2.3","extra":[1,2]}"#)
                .unwrap();
        assert_eq!(response.as_json()["firmware"], "1.2.3");
        assert_eq!(response.into_inner()["extra"][1], 2);
    }

    #[test]
    fn accessors_are_none_for_missing_fields() {
        let response = ClaimResponse::from_slice(br#"{"ok":true}"#).unwrap();
        assert_eq!(response.status(), None);
        assert_eq!(response.status_string(), None);
    }

    #[test]
    fn non_object_json_is_accepted() {
        // "Valid JSON" is the only requirement; a bare array still passes through
        let response = ClaimResponse::from_slice(b"[1,2,3]").unwrap();
        assert_eq!(response.status(), None);
        assert_eq!(response.as_json()[0], 1);
    }

    #[test]
    fn empty_body_is_rejected() {
        let result = ClaimResponse::from_slice(b"");
        assert!(matches!(result, Err(ProtocolError::EmptyResponse)));
    }

    #[test]
    fn non_json_body_is_rejected() {
        let result = ClaimResponse::from_slice(b"<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(ProtocolError::InvalidJson(_))));
    }
}
