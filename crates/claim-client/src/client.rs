//! The claim protocol driver.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use claim_core::device::DeviceInfo;
use claim_core::error::Result;
use claim_core::request::ClaimRequest;
use claim_core::response::ClaimResponse;
use claim_crypto::{blob, outer, DhKeyPair};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::transport::{HttpTransport, Transport};

/// Device name advertised in claim requests unless overridden.
pub const DEFAULT_DEVICE_NAME: &str = "connect-claim";

/// Client for claiming a local receiver for a cloud account.
///
/// Every call to [`claim`](DeviceClaimClient::claim) runs the whole
/// handshake from scratch: fresh DH keypair, fresh IV, one POST. Nothing is
/// cached or persisted between attempts.
pub struct DeviceClaimClient<T: Transport = HttpTransport> {
    transport: T,
    device_name: String,
    client_device_id: Option<String>,
}

impl DeviceClaimClient<HttpTransport> {
    /// Create a client over HTTP with the default timeout.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }
}

impl<T: Transport> DeviceClaimClient<T> {
    /// Create a client over an explicit transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            client_device_id: None,
        }
    }

    /// Set the device name advertised in claim requests.
    pub fn device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    /// Pin the client-chosen device identifier.
    ///
    /// Without this, every attempt draws a fresh random identifier. No
    /// collision detection is performed either way; the protocol gives no
    /// idempotency guarantee for reused identifiers.
    pub fn client_device_id(mut self, id: impl Into<String>) -> Self {
        self.client_device_id = Some(id.into());
        self
    }

    /// Claim `device` for the account identified by `username`, proving it
    /// with `access_token`.
    ///
    /// Returns the device's JSON reply verbatim. All encoding and crypto
    /// happen before any network I/O, so an oversized username or token
    /// fails without a packet being sent.
    pub async fn claim(
        &self,
        device: &DeviceInfo,
        username: &str,
        access_token: &str,
    ) -> Result<ClaimResponse> {
        let request = self.build_request(device, username, access_token)?;
        let url = device.endpoint_url();

        tracing::debug!(
            device_id = %device.device_id,
            url = %url,
            "sending addUser claim request"
        );

        let body = self.transport.post_form(&url, &request.form_fields()).await?;
        let response = ClaimResponse::from_slice(&body)?;

        tracing::debug!(
            status = ?response.status(),
            status_string = ?response.status_string(),
            "device answered claim request"
        );

        Ok(response)
    }

    /// Run the cryptographic handshake and compose the request form.
    fn build_request(
        &self,
        device: &DeviceInfo,
        username: &str,
        access_token: &str,
    ) -> Result<ClaimRequest> {
        let keypair = DhKeyPair::generate();

        let inner_blob = blob::build_credentials(username, access_token)?;
        let inner_key = blob::derive_inner_key(&device.device_id, username);
        let inner_ciphertext = blob::encrypt_credentials(&inner_key, &inner_blob)?;

        let shared_secret = keypair.shared_secret(&device.public_key)?;
        let outer_blob = outer::wrap(&inner_ciphertext, &shared_secret)?;

        Ok(ClaimRequest {
            user_name: username.to_string(),
            blob: BASE64.encode(outer_blob),
            client_key: BASE64.encode(keypair.public_key()),
            device_id: self
                .client_device_id
                .clone()
                .unwrap_or_else(random_device_id),
            device_name: self.device_name.clone(),
        })
    }
}

/// A claim attempt's client identifier: 20 random bytes rendered as hex.
fn random_device_id() -> String {
    let mut bytes = [0u8; 20];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
