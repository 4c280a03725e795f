// src/lib.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
// Crate root — public re-exports for the CLI and the integration tests.

pub mod constants;
pub mod config;
pub mod s3_client;
pub mod object_store;
pub mod discovery;
pub mod retention;
pub mod prompt;
pub mod data_gen;
pub mod progress;
pub mod upload;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use discovery::{BucketInventory, discover_buckets};
pub use object_store::{LockedObjectStore, S3LockedStore};
pub use progress::{ProgressStyle, UploadProgress};
pub use prompt::{PromptError, Prompter};
pub use retention::{RetentionDate, RetentionError};
pub use s3_client::{build_client, connect};
pub use session::{SessionOptions, SessionOutcome, run_session};
pub use upload::{
    UploadFailure, UploadPlan, UploadReport, UploadTask, default_jobs, object_key,
    upload_locked_objects,
};
