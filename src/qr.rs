//! Animated QR code payloads.
//!
//! The payload changes every second: `bankid.{qrStartToken}.{seconds}.{qrAuthCode}`, where
//! `qrAuthCode` is the hex HMAC-SHA256 of the decimal seconds since the order was
//! started, keyed with `qrStartSecret`. Rendering the payload as an image is left to the
//! caller.

use std::time::Instant;

use hmac::{Hmac, Mac as _};
use secrecy::{ExposeSecret as _, SecretString};
use sha2::Sha256;

use crate::types::{AuthResponse, SignResponse};

const PREFIX: &str = "bankid";

#[derive(Debug)]
pub struct QrStartData {
    token: String,
    secret: SecretString,
}

impl QrStartData {
    #[must_use]
    pub fn new<S: Into<String>>(token: S, secret: SecretString) -> Self {
        Self {
            token: token.into(),
            secret,
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Payload for `seconds` whole seconds after the order was started.
    #[must_use]
    pub fn code_at(&self, seconds: u64) -> String {
        let seconds = seconds.to_string();

        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(seconds.as_bytes());
        let auth_code = hex::encode(mac.finalize().into_bytes());

        format!("{PREFIX}.{}.{seconds}.{auth_code}", self.token)
    }

    /// Payload for the time elapsed since `started`, usually when the auth or sign
    /// response was received.
    #[must_use]
    pub fn code_since(&self, started: Instant) -> String {
        self.code_at(started.elapsed().as_secs())
    }
}

impl From<&AuthResponse> for QrStartData {
    fn from(response: &AuthResponse) -> Self {
        Self::new(
            response.qr_start_token.clone(),
            SecretString::from(response.qr_start_secret.clone()),
        )
    }
}

impl From<&SignResponse> for QrStartData {
    fn from(response: &SignResponse) -> Self {
        Self::new(
            response.qr_start_token.clone(),
            SecretString::from(response.qr_start_secret.clone()),
        )
    }
}
