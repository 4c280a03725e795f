// src/s3_client.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! Builds the S3 client from a [`ClientConfig`] and checks that the endpoint
//! answers before anything else runs.
//!
//! There is no global client: the caller owns the returned store and hands it
//! (as `Arc<dyn LockedObjectStore>`) to whoever needs it.

use std::time::Duration;

use anyhow::{Result, anyhow};
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::constants::DEFAULT_CONNECT_TIMEOUT_SECS;
use crate::object_store::S3LockedStore;

const CREDENTIALS_PROVIDER_NAME: &str = "s3lockgen-env";

/// Build a client with static credentials and path-style addressing.
///
/// Path-style (endpoint/bucket) is what S3-compatible appliances expect;
/// virtual-hosted style does not work with a custom endpoint.
pub async fn build_client(cfg: &ClientConfig) -> Client {
    let credentials = Credentials::new(
        &cfg.access_key_id,
        &cfg.secret_access_key,
        None,
        None,
        CREDENTIALS_PROVIDER_NAME,
    );

    let timeout_config = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .build();

    let sdk_cfg = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(cfg.region.clone()))
        .endpoint_url(&cfg.endpoint_url)
        .credentials_provider(credentials)
        .timeout_config(timeout_config)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_cfg)
        .force_path_style(true)
        .build();
    debug!("built S3 client for {} (region {})", cfg.endpoint_url, cfg.region);
    Client::from_conf(s3_config)
}

/// Build the client and probe it with one `ListBuckets` call.
pub async fn connect(cfg: &ClientConfig) -> Result<S3LockedStore> {
    let client = build_client(cfg).await;

    match client.list_buckets().send().await {
        Ok(_) => {
            info!("connected to {}", cfg.endpoint_url);
            Ok(S3LockedStore::new(client))
        }
        Err(e @ (SdkError::DispatchFailure(_) | SdkError::TimeoutError(_))) => Err(anyhow!(
            "Unable to connect to the specified endpoint URL {}: {}",
            cfg.endpoint_url,
            describe(&e)
        )),
        Err(e @ SdkError::ServiceError(_)) => Err(anyhow!(
            "{} rejected the request ({}); check {} and the secret key",
            cfg.endpoint_url,
            e.code().unwrap_or("unknown error"),
            cfg.access_key_id
        )),
        Err(e) => Err(anyhow!(
            "Unexpected error probing {}: {}",
            cfg.endpoint_url,
            describe(&e)
        )),
    }
}

// SdkError's Display is terse; walk the source chain for the useful part.
fn describe(e: &(dyn std::error::Error + 'static)) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        source = inner.source();
    }
    msg
}
