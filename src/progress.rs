// src/progress.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
// Per-object progress for the upload dispatcher: one `.` on stdout per
// successful upload, plus counters the summary is built from.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

/// How completions are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStyle {
    /// Print a flushed `.` to stdout for every uploaded object.
    Dots,
    /// Count only.
    Silent,
}

/// Shared between upload tasks; all updates are atomic.
#[derive(Debug)]
pub struct UploadProgress {
    style: ProgressStyle,
    objects_completed: AtomicU64,
    bytes_transferred: AtomicU64,
    total_objects: u64,
}

impl UploadProgress {
    pub fn new(total_objects: u64, style: ProgressStyle) -> Self {
        Self {
            style,
            objects_completed: AtomicU64::new(0),
            bytes_transferred: AtomicU64::new(0),
            total_objects,
        }
    }

    /// Call this when an object upload completes
    pub fn object_completed(&self, bytes: u64) {
        self.objects_completed.fetch_add(1, Ordering::Relaxed);
        self.bytes_transferred.fetch_add(bytes, Ordering::Relaxed);

        if self.style == ProgressStyle::Dots {
            let mut out = io::stdout().lock();
            // a closed stdout must not fail the upload itself
            let _ = out.write_all(b".").and_then(|_| out.flush());
        }
    }

    pub fn objects_completed(&self) -> u64 {
        self.objects_completed.load(Ordering::Relaxed)
    }

    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred.load(Ordering::Relaxed)
    }

    pub fn total_objects(&self) -> u64 {
        self.total_objects
    }
}
