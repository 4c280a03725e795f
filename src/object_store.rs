// src/object_store.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! The three S3 operations this tool needs, behind a trait so the workflow can
//! run against any backend (the SDK client in production, an in-memory store
//! in tests).

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectLockMode;
use bytes::Bytes;
use tracing::debug;

use crate::constants::OBJECT_LOCK_NOT_FOUND_CODE;
use crate::retention::RetentionDate;

/// Object store operations used by discovery and the upload dispatcher.
///
/// Implementations must be safe to share between concurrently running upload
/// tasks.
#[async_trait]
pub trait LockedObjectStore: Send + Sync {
    /// Every bucket visible to the caller, in listing order.
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// `Ok(false)` when the bucket simply has no object-lock configuration;
    /// any other failure is an error.
    async fn object_lock_enabled(&self, bucket: &str) -> Result<bool>;

    /// PUT `body` under `key` with a GOVERNANCE lock until `retain_until`.
    async fn put_locked_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        retain_until: RetentionDate,
    ) -> Result<()>;
}

/// [`LockedObjectStore`] over the AWS SDK client.
#[derive(Clone, Debug)]
pub struct S3LockedStore {
    client: Client,
}

impl S3LockedStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LockedObjectStore for S3LockedStore {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut cont: Option<String> = None;
        loop {
            let mut req = self.client.list_buckets();
            if let Some(token) = &cont {
                req = req.continuation_token(token);
            }
            let resp = req.send().await.context("list_buckets failed")?;
            names.extend(resp.buckets().iter().filter_map(|b| b.name().map(str::to_owned)));

            match resp.continuation_token() {
                Some(token) if !token.is_empty() => cont = Some(token.to_string()),
                _ => break,
            }
        }
        debug!("list_buckets returned {} bucket(s)", names.len());
        Ok(names)
    }

    async fn object_lock_enabled(&self, bucket: &str) -> Result<bool> {
        match self
            .client
            .get_object_lock_configuration()
            .bucket(bucket)
            .send()
            .await
        {
            Ok(resp) => Ok(resp.object_lock_configuration().is_some()),
            Err(e) if e.code() == Some(OBJECT_LOCK_NOT_FOUND_CODE) => {
                debug!("bucket {bucket}: no object lock configuration");
                Ok(false)
            }
            Err(e) => Err(e).with_context(|| {
                format!("get_object_lock_configuration failed for bucket {bucket}")
            }),
        }
    }

    async fn put_locked_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        retain_until: RetentionDate,
    ) -> Result<()> {
        let len = body.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("text/plain")
            .object_lock_mode(ObjectLockMode::Governance)
            .object_lock_retain_until_date(retain_until.to_s3_datetime())
            .body(ByteStream::from(body))
            .send()
            .await
            .with_context(|| format!("put_object failed for s3://{bucket}/{key}"))?;
        debug!("put s3://{bucket}/{key} ({len} bytes, retain until {retain_until})");
        Ok(())
    }
}
