//! Request and response bodies of the relying party API.

pub mod request;
pub mod response;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub use request::{AuthRequest, CancelRequest, CollectRequest, SignRequest, VisibleDataFormat};
pub use response::{
    AuthResponse, CancelResponse, Cert, CollectResponse, CompletionData, Device, SignResponse,
    User,
};

/// Base64-encodes data for [`SignRequest::user_visible_data`] and
/// [`SignRequest::user_non_visible_data`].
#[must_use]
pub fn encode_data<D: AsRef<[u8]>>(data: D) -> String {
    STANDARD.encode(data)
}
