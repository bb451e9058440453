use bon::Builder;
use serde::Serialize;

/// Body of `POST /auth`.
///
/// ```
/// use bankid_rp_client::types::AuthRequest;
///
/// let request = AuthRequest::builder()
///     .end_user_ip("192.168.0.1")
///     .personal_number("190000000000")
///     .build();
/// ```
#[non_exhaustive]
#[derive(Builder, Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    /// IPv4 or IPv6 address of the end user's device as seen by the relying party.
    #[builder(into)]
    pub end_user_ip: String,
    /// Twelve digits including century. Without it the user's app must be started with
    /// the returned auto start token or QR code.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_number: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
}

/// Body of `POST /sign`.
#[non_exhaustive]
#[derive(Builder, Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    #[builder(into)]
    pub end_user_ip: String,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_number: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
    /// Text shown to and signed by the user, UTF-8 then base64 encoded, 1-40 000
    /// characters after encoding. See [`crate::types::encode_data`].
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_visible_data: Option<String>,
    /// Base64 data signed but not shown, 1-200 000 characters after encoding.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_non_visible_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_visible_data_format: Option<VisibleDataFormat>,
}

/// Formatting of [`SignRequest::user_visible_data`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum VisibleDataFormat {
    #[serde(rename = "simpleMarkdownV1")]
    SimpleMarkdownV1,
}

/// Body of `POST /collect`.
#[non_exhaustive]
#[derive(Builder, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectRequest {
    #[builder(into)]
    pub order_ref: String,
}

impl CollectRequest {
    #[must_use]
    pub fn new<S: Into<String>>(order_ref: S) -> Self {
        Self {
            order_ref: order_ref.into(),
        }
    }
}

/// Body of `POST /cancel`.
#[non_exhaustive]
#[derive(Builder, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    #[builder(into)]
    pub order_ref: String,
}

impl CancelRequest {
    #[must_use]
    pub fn new<S: Into<String>>(order_ref: S) -> Self {
        Self {
            order_ref: order_ref.into(),
        }
    }
}
