use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{TimestampMilliSeconds, serde_as};

/// Response of `POST /auth`.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Correlates subsequent collect and cancel calls.
    pub order_ref: String,
    pub auto_start_token: String,
    pub qr_start_token: String,
    pub qr_start_secret: String,
}

/// Response of `POST /sign`.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub order_ref: String,
    pub auto_start_token: String,
    pub qr_start_token: String,
    pub qr_start_secret: String,
}

/// Response of `POST /collect`.
///
/// `status` and `hint_code` are passed through as sent by the service, which may add
/// values at any time.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectResponse {
    pub order_ref: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_code: Option<String>,
    /// Present once `status` is `complete`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_data: Option<CompletionData>,
}

impl CollectResponse {
    pub const PENDING: &'static str = "pending";
    pub const FAILED: &'static str = "failed";
    pub const COMPLETE: &'static str = "complete";

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == Self::PENDING
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == Self::FAILED
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == Self::COMPLETE
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionData {
    pub user: User,
    pub device: Device,
    pub cert: Cert,
    /// Base64 encoded XML signature.
    pub signature: String,
    /// Base64 encoded OCSP response for the user's certificate.
    pub ocsp_response: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub personal_number: String,
    pub name: String,
    pub given_name: String,
    pub surname: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub ip_address: String,
}

/// Validity window of the user's certificate. The service sends milliseconds since
/// the Unix epoch as strings.
#[serde_as]
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cert {
    #[serde_as(as = "TimestampMilliSeconds<String>")]
    pub not_before: DateTime<Utc>,
    #[serde_as(as = "TimestampMilliSeconds<String>")]
    pub not_after: DateTime<Utc>,
}

/// Response of `POST /cancel`. Success carries no data.
#[expect(
    clippy::empty_structs_with_brackets,
    reason = "the service answers `{}`, which a unit struct does not accept"
)]
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CancelResponse {}
