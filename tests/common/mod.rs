// tests/common/mod.rs
//
// In-memory LockedObjectStore and helpers shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use bytes::Bytes;

use s3lockgen::{LockedObjectStore, Prompter, RetentionDate};

/// How a mock bucket answers GetObjectLockConfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Enabled,
    NotConfigured,
    /// Any error other than "not configured" (e.g. AccessDenied).
    QueryFails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRecord {
    pub bucket: String,
    pub key: String,
    pub len: usize,
    pub retain_until: RetentionDate,
}

#[derive(Default)]
pub struct MockStore {
    buckets: Vec<(String, LockState)>,
    fail_keys: HashSet<String>,
    put_delay: Option<Duration>,
    puts: Mutex<Vec<PutRecord>>,
    lock_queries: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, name: &str, state: LockState) -> Self {
        self.buckets.push((name.to_string(), state));
        self
    }

    pub fn failing_on(mut self, key: &str) -> Self {
        self.fail_keys.insert(key.to_string());
        self
    }

    pub fn with_put_delay(mut self, delay: Duration) -> Self {
        self.put_delay = Some(delay);
        self
    }

    /// Successful PUTs, in completion order.
    pub fn puts(&self) -> Vec<PutRecord> {
        self.puts.lock().unwrap().clone()
    }

    pub fn put_keys_sorted(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.puts().into_iter().map(|p| p.key).collect();
        keys.sort();
        keys
    }

    pub fn lock_queries(&self) -> Vec<String> {
        self.lock_queries.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LockedObjectStore for MockStore {
    async fn list_buckets(&self) -> Result<Vec<String>> {
        Ok(self.buckets.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn object_lock_enabled(&self, bucket: &str) -> Result<bool> {
        self.lock_queries.lock().unwrap().push(bucket.to_string());
        match self.buckets.iter().find(|(name, _)| name == bucket) {
            Some((_, LockState::Enabled)) => Ok(true),
            Some((_, LockState::NotConfigured)) => Ok(false),
            Some((_, LockState::QueryFails)) => Err(anyhow!("AccessDenied: {bucket}")),
            None => Err(anyhow!("NoSuchBucket: {bucket}")),
        }
    }

    async fn put_locked_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        retain_until: RetentionDate,
    ) -> Result<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.put_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_keys.contains(key) {
            bail!("InvalidRequest: simulated failure for {key}");
        }
        self.puts.lock().unwrap().push(PutRecord {
            bucket: bucket.to_string(),
            key: key.to_string(),
            len: body.len(),
            retain_until,
        });
        Ok(())
    }
}

pub type TestPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

/// Prompter fed with `answers` (one per line).
pub fn scripted_prompter(answers: &[&str]) -> TestPrompter {
    let mut input = answers.join("\n");
    input.push('\n');
    Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
}

pub fn console_output(prompter: TestPrompter) -> String {
    String::from_utf8(prompter.into_output()).unwrap()
}

/// Print test header with formatting
pub fn print_test_header(test_name: &str) {
    println!("\n{}", "=".repeat(60));
    println!("TEST: {}", test_name);
    println!("{}", "=".repeat(60));
}
