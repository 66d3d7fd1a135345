//! Device coordinates as supplied by an external discovery/probe step.

/// A claimable receiver on the local network.
///
/// All fields come from the device's own advertisement: `device_id` and
/// `public_key` from its info endpoint, `host`/`port`/`path` from service
/// discovery. This crate never discovers devices itself.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// The device's self-reported identifier.
    pub device_id: String,
    /// The device's DH public value, base64 of a 96-byte big-endian integer.
    pub public_key: String,
    pub host: String,
    pub port: u16,
    /// Endpoint path, e.g. "/device-info".
    pub path: String,
}

impl DeviceInfo {
    /// Compose the claim endpoint URL.
    ///
    /// The handshake runs over plain HTTP on the LAN; a missing leading
    /// slash in `path` is normalized.
    pub fn endpoint_url(&self) -> String {
        if self.path.starts_with('/') {
            format!("http://{}:{}{}", self.host, self.port, self.path)
        } else {
            format!("http://{}:{}/{}", self.host, self.port, self.path)
        }
    }
}
