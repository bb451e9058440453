//! Client for the BankID relying party API.
//!
//! Four operations are exposed on [`Client`], each a single `POST` round trip:
//! - [`Client::auth`] and [`Client::sign`] start an order and return its `orderRef`
//! - [`Client::collect`] reports the state of an order
//! - [`Client::cancel`] cancels a pending order
//!
//! Polling `collect` until an order completes is left to the caller, as are retries.
//!
//! ```no_run
//! use bankid_rp_client::{CertificateFiles, Client, Config};
//! use bankid_rp_client::types::{AuthRequest, CollectRequest};
//!
//! # async fn run() -> bankid_rp_client::Result<()> {
//! let files = CertificateFiles::new("ca.pem", "client.pem", "client.key");
//! let client = Client::from_certificates(Config::test(), &files)?;
//!
//! let order = client
//!     .auth(&AuthRequest::builder().end_user_ip("192.168.0.1").build())
//!     .await?;
//! let status = client.collect(&CollectRequest::new(order.order_ref)).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod qr;
pub mod transport;
pub mod types;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client as ReqwestClient, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

pub use client::Client;
pub use config::Config;
pub use error::{Error, ErrorResponse, Kind};
pub use transport::CertificateFiles;

pub type Result<T> = std::result::Result<T, Error>;

const MEDIA_TYPE: &str = "application/json";

/// Sends `body` as JSON and decodes the JSON answer.
///
/// Statuses outside 200-299 become [`Kind::Service`] errors carrying the decoded
/// [`ErrorResponse`].
async fn request<Body, Response>(
    client: &ReqwestClient,
    method: Method,
    url: Url,
    user_agent: &str,
    body: &Body,
) -> Result<Response>
where
    Body: Serialize + ?Sized,
    Response: DeserializeOwned,
{
    let body = serde_json::to_vec(body).map_err(|e| Error::with_source(Kind::Serialization, e))?;
    let path = url.path().to_owned();

    #[cfg(feature = "tracing")]
    tracing::debug!(%method, %path, "sending request");

    let response = client
        .request(method.clone(), url)
        .header(CONTENT_TYPE, MEDIA_TYPE)
        .header(ACCEPT, MEDIA_TYPE)
        .header(USER_AGENT, user_agent)
        .body(body)
        .send()
        .await?;

    let status_code = response.status();
    let bytes = response.bytes().await?;

    if !status_code.is_success() {
        let error = ErrorResponse::from_body(status_code, method, path, &bytes);

        #[cfg(feature = "tracing")]
        tracing::warn!(
            status = %error.status_code,
            error_code = %error.error_code,
            details = %error.details,
            path = %error.path,
            "service returned an error"
        );

        return Err(error.into());
    }

    decode(&bytes)
}

#[cfg(not(feature = "tracing"))]
fn decode<Response: DeserializeOwned>(bytes: &[u8]) -> Result<Response> {
    serde_json::from_slice(bytes).map_err(|e| Error::with_source(Kind::Decode, e))
}

#[cfg(feature = "tracing")]
fn decode<Response: DeserializeOwned>(bytes: &[u8]) -> Result<Response> {
    let mut json = serde_json::Deserializer::from_slice(bytes);
    let mut on_ignored = |path: serde_ignored::Path<'_>| {
        tracing::debug!(%path, "ignored response field");
    };
    let ignored = serde_ignored::Deserializer::new(&mut json, &mut on_ignored);

    let response = serde_path_to_error::deserialize(ignored)
        .map_err(|e| Error::with_source(Kind::Decode, e))?;
    json.end()
        .map_err(|e| Error::with_source(Kind::Decode, e))?;

    Ok(response)
}
