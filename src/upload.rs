// src/upload.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! Parallel creation of object-locked objects.
//!
//! One task per key: generate a fresh random-size payload and PUT it with a
//! GOVERNANCE lock. At most `jobs` tasks run at once. Every task runs to
//! completion and its outcome lands in the [`UploadReport`]; a failed (or
//! panicked) upload does not stop the others.

use std::fmt;
use std::sync::Arc;

use anyhow::{Result, bail};
use futures::{StreamExt, stream::FuturesUnordered};
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::constants::OBJECT_KEY_SUFFIX;
use crate::data_gen::generate_object;
use crate::object_store::LockedObjectStore;
use crate::progress::UploadProgress;
use crate::retention::RetentionDate;

/// Key of the object with sequence number `index`: `<prefix><index>.txt`.
pub fn object_key(prefix: &str, index: u64) -> String {
    format!("{prefix}{index}{OBJECT_KEY_SUFFIX}")
}

/// Number of concurrent uploads: one per host CPU.
pub fn default_jobs() -> usize {
    num_cpus::get().max(1)
}

/// Everything collected from the user for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    bucket: String,
    retention: RetentionDate,
    prefix: String,
    start_index: u64,
    count: u64,
}

impl UploadPlan {
    /// Fails only if the index range would overflow a u64.
    pub fn new(
        bucket: impl Into<String>,
        retention: RetentionDate,
        prefix: impl Into<String>,
        start_index: u64,
        count: u64,
    ) -> Result<Self> {
        if start_index.checked_add(count).is_none() {
            bail!("start index {start_index} + count {count} overflows the index range");
        }
        Ok(Self {
            bucket: bucket.into(),
            retention,
            prefix: prefix.into(),
            start_index,
            count,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn retention(&self) -> RetentionDate {
        self.retention
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Keys for `[start_index, start_index + count)`, in index order.
    pub fn object_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.tasks().map(|t| t.key)
    }

    pub fn tasks(&self) -> impl Iterator<Item = UploadTask> + '_ {
        (self.start_index..self.start_index + self.count).map(move |index| UploadTask {
            bucket: self.bucket.clone(),
            key: object_key(&self.prefix, index),
            index,
            retain_until: self.retention,
        })
    }
}

/// A single object to create. Lives for the duration of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub bucket: String,
    pub key: String,
    pub index: u64,
    pub retain_until: RetentionDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub index: u64,
    pub key: String,
    pub error: String,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub bucket: String,
    pub prefix: String,
    pub requested: u64,
    pub succeeded: u64,
    pub bytes_uploaded: u64,
    /// Sorted by index.
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn failed(&self) -> u64 {
        self.failures.len() as u64
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.succeeded == self.requested
    }

    pub fn failed_keys(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.key.as_str())
    }
}

impl fmt::Display for UploadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(
                f,
                "{} locked objects successfully created with prefix '{}' in bucket '{}'.",
                self.requested, self.prefix, self.bucket
            );
        }
        write!(
            f,
            "{} of {} locked objects created with prefix '{}' in bucket '{}'; {} failed:",
            self.succeeded,
            self.requested,
            self.prefix,
            self.bucket,
            self.failed()
        )?;
        for failure in &self.failures {
            write!(f, "\n\t- {}: {}", failure.key, failure.error)?;
        }
        Ok(())
    }
}

/// Per-task results, tallied as tasks finish.
#[derive(Debug, Default)]
struct Outcomes {
    succeeded: u64,
    bytes_uploaded: u64,
    failures: Vec<UploadFailure>,
}

impl Outcomes {
    fn record(&mut self, index: u64, key: String, joined: Result<Result<u64>, JoinError>) {
        match joined {
            Ok(Ok(len)) => {
                self.succeeded += 1;
                self.bytes_uploaded += len;
            }
            Ok(Err(e)) => {
                warn!("upload of {key} failed: {e:#}");
                self.failures.push(UploadFailure {
                    index,
                    key,
                    error: format!("{e:#}"),
                });
            }
            Err(e) => {
                warn!("upload task for {key} did not finish: {e}");
                self.failures.push(UploadFailure {
                    index,
                    key,
                    error: format!("upload task did not finish: {e}"),
                });
            }
        }
    }
}

/// Upload every object in `plan`, at most `jobs` at a time, and wait for all
/// of them. Completions are observed in whatever order they finish, and are
/// collected while later tasks are still waiting for a slot.
pub async fn upload_locked_objects(
    store: Arc<dyn LockedObjectStore>,
    plan: &UploadPlan,
    jobs: usize,
    progress: Arc<UploadProgress>,
) -> UploadReport {
    let jobs = jobs.max(1);
    info!(
        "uploading {} object(s) to bucket {} with {} concurrent job(s), retain until {}",
        plan.count, plan.bucket, jobs, plan.retention
    );

    let sem = Arc::new(Semaphore::new(jobs));
    let mut futs = FuturesUnordered::new();
    let mut outcomes = Outcomes::default();

    for task in plan.tasks() {
        let permit = loop {
            tokio::select! {
                acquired = sem.clone().acquire_owned() => {
                    // the semaphore is never closed
                    let Ok(permit) = acquired else {
                        unreachable!("upload semaphore closed");
                    };
                    break permit;
                }
                Some((index, key, joined)) = futs.next(), if !futs.is_empty() => {
                    outcomes.record(index, key, joined);
                }
            }
        };
        let store = store.clone();
        let progress = progress.clone();
        let key = task.key.clone();
        let index = task.index;

        let handle = tokio::spawn(async move {
            let _permit = permit;
            // up to 1 MiB of text; keep it off the async workers
            let body = tokio::task::spawn_blocking(|| generate_object(&mut rand::rng())).await?;
            let len = body.len() as u64;
            store
                .put_locked_object(&task.bucket, &task.key, body, task.retain_until)
                .await?;
            progress.object_completed(len);
            Ok::<u64, anyhow::Error>(len)
        });
        futs.push(async move { (index, key, handle.await) });
    }

    while let Some((index, key, joined)) = futs.next().await {
        outcomes.record(index, key, joined);
    }
    let Outcomes {
        succeeded,
        bytes_uploaded,
        mut failures,
    } = outcomes;
    failures.sort_by_key(|f| f.index);

    debug!("{succeeded} uploaded, {} failed, {bytes_uploaded} bytes", failures.len());
    UploadReport {
        bucket: plan.bucket.clone(),
        prefix: plan.prefix.clone(),
        requested: plan.count,
        succeeded,
        bytes_uploaded,
        failures,
    }
}
