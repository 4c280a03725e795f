// src/session.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! One interactive run: discover buckets, print them, collect parameters,
//! upload, print the summary.
//!
//! The store, the console input and the console output are all passed in, so
//! the whole sequence can be driven from tests.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::discovery::{BucketInventory, discover_buckets};
use crate::object_store::LockedObjectStore;
use crate::progress::{ProgressStyle, UploadProgress};
use crate::prompt::Prompter;
use crate::upload::{UploadPlan, UploadReport, default_jobs, upload_locked_objects};

pub const NO_BUCKETS_MSG: &str = "Exiting because no bucket available on the system...";

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Concurrent uploads.
    pub jobs: usize,
    pub progress: ProgressStyle,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            progress: ProgressStyle::Dots,
        }
    }
}

#[derive(Debug)]
pub enum SessionOutcome {
    /// The account has no buckets at all; nothing was asked.
    NoBuckets,
    Completed(UploadReport),
}

pub async fn run_session<R, W>(
    store: Arc<dyn LockedObjectStore>,
    prompter: &mut Prompter<R, W>,
    options: &SessionOptions,
) -> Result<SessionOutcome>
where
    R: BufRead,
    W: Write,
{
    let inventory = discover_buckets(store.as_ref()).await?;

    if !print_inventory(prompter.output(), &inventory)? {
        return Ok(SessionOutcome::NoBuckets);
    }

    let bucket = prompter
        .select_bucket(&inventory.object_lock_enabled)?
        .to_string();
    let retention = prompter.retention_date()?;
    let count = prompter.object_count()?;
    let prefix = prompter.prefix()?;
    let start_index = prompter.start_index()?;

    let plan = UploadPlan::new(bucket, retention, prefix, start_index, count)?;
    info!(
        "plan: bucket={} prefix={:?} start={} count={} retain_until={}",
        plan.bucket(),
        plan.prefix(),
        plan.start_index(),
        plan.count(),
        plan.retention()
    );

    let progress = Arc::new(UploadProgress::new(plan.count(), options.progress));
    let report = upload_locked_objects(store, &plan, options.jobs, progress).await;

    let out = prompter.output();
    writeln!(out, "\n{report}")?;
    out.flush()?;
    Ok(SessionOutcome::Completed(report))
}

/// Print every bucket, then the numbered object-lock list. Returns `false`
/// (after printing the exit message) when there are no buckets at all.
fn print_inventory<W: Write>(out: &mut W, inventory: &BucketInventory) -> Result<bool> {
    writeln!(out, "All Existing buckets list:")?;
    if inventory.is_empty() {
        writeln!(out, "\t- None")?;
        writeln!(out, "{NO_BUCKETS_MSG}")?;
        out.flush()?;
        return Ok(false);
    }
    for bucket in &inventory.all {
        writeln!(out, "\t- {bucket}")?;
    }

    writeln!(out, "\nList of buckets to create locked objects:")?;
    if inventory.object_lock_enabled.is_empty() {
        writeln!(out, "\tNone")?;
    }
    for (i, bucket) in inventory.object_lock_enabled.iter().enumerate() {
        writeln!(out, "\t {}. {bucket}", i + 1)?;
    }
    Ok(true)
}
