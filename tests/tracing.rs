#![cfg(feature = "tracing")]

use bankid_rp_client::types::{CollectRequest, CollectResponse};
use bankid_rp_client::{Client, Config, Kind};
use httpmock::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("bankid_rp_client=debug"))
        .with_test_writer()
        .try_init()
        .ok();
}

#[tokio::test]
async fn unknown_fields_should_be_ignored() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    let client = Client::new(Config::from_raw(&server.base_url())?)?;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/collect");
            then.status(200).json_body(json!({
                "orderRef": "a",
                "status": "failed",
                "hintCode": "userCancel",
                "addedLater": true
            }));
        })
        .await;

    let response = client.collect(&CollectRequest::new("a")).await?;

    assert_eq!(response.status, CollectResponse::FAILED);
    assert_eq!(response.hint_code.as_deref(), Some("userCancel"));
    Ok(())
}

#[tokio::test]
async fn decode_error_should_name_the_field() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    let client = Client::new(Config::from_raw(&server.base_url())?)?;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/collect");
            then.status(200).json_body(json!({
                "orderRef": "a",
                "status": "complete",
                "completionData": { "user": { "personalNumber": 190_000_000_000_u64 } }
            }));
        })
        .await;

    let err = client
        .collect(&CollectRequest::new("a"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Decode);
    assert!(
        err.to_string().contains("completionData.user.personalNumber"),
        "path of the failing field is reported: {err}"
    );
    Ok(())
}
