use serde::Deserialize;

/// Response body of the auth token exchange.
///
/// The server supplies no expiry field; the token lifetime is asserted by
/// the client.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokenResponse {
    pub access_token: String,
}
