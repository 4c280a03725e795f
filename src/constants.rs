// src/constants.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
// Centralized constants for s3lockgen to avoid hardcoded values throughout the codebase

// ============================================================================
// Environment configuration
// ============================================================================

/// Endpoint host[:port] of the S3-compatible service (scheme optional)
pub const ENV_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";

/// Access key id used to sign requests
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";

/// Secret access key used to sign requests
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Preferred region variable
pub const ENV_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

/// Secondary region variable, consulted when `AWS_DEFAULT_REGION` is unset
pub const ENV_REGION: &str = "AWS_REGION";

/// Region used when none is configured. Most appliances ignore it, but SigV4 needs one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Scheme prepended to endpoints given as bare host[:port]
pub const DEFAULT_ENDPOINT_SCHEME: &str = "http://";

/// Connect timeout for the S3 client (seconds)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// Object lock
// ============================================================================

/// Error code returned by GetObjectLockConfiguration on a bucket without lock config
pub const OBJECT_LOCK_NOT_FOUND_CODE: &str = "ObjectLockConfigurationNotFoundError";

/// strftime layout of an accepted retention date, e.g. 2024-12-31T00:00:00Z
pub const RETENTION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Example shown in the retention prompt
pub const RETENTION_DATE_EXAMPLE: &str = "2024-12-31T00:00:00Z";

// ============================================================================
// Content generation
// ============================================================================

/// Smallest generated object, in KiB
pub const MIN_OBJECT_SIZE_KB: usize = 1;

/// Largest generated object, in KiB
pub const MAX_OBJECT_SIZE_KB: usize = 1024;

/// Words drawn per requested KiB (assumes ~5 characters per word)
pub const WORDS_PER_KB: usize = 200;

/// Extension appended to every generated object key
pub const OBJECT_KEY_SUFFIX: &str = ".txt";

/// Vocabulary the readable payloads are drawn from. Duplicates are intentional,
/// they weight the draw towards those words.
pub const WORDS: [&str; 69] = [
    "Lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
    "sed", "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore",
    "magna", "aliqua", "ut", "enim", "ad", "minim", "veniam", "quis", "nostrud",
    "exercitation", "ullamco", "laboris", "nisi", "ut", "aliquip", "ex", "ea",
    "commodo", "consequat", "duis", "aute", "irure", "dolor", "in", "reprehenderit",
    "in", "voluptate", "velit", "esse", "cillum", "dolore", "eu", "fugiat", "nulla",
    "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non", "proident",
    "sunt", "in", "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id", "est",
    "laborum",
];

// ============================================================================
// Interactive input
// ============================================================================

/// Consecutive invalid answers tolerated before a prompt gives up
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;
