// src/discovery.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! Find the buckets that can take object-locked uploads.

use anyhow::Result;
use tracing::debug;

use crate::object_store::LockedObjectStore;

/// Result of one discovery pass. Both lists keep the service's listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketInventory {
    pub all: Vec<String>,
    pub object_lock_enabled: Vec<String>,
}

impl BucketInventory {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// List every bucket and query its object-lock configuration, one bucket at
/// a time. A bucket without a configuration is skipped; any other error aborts
/// discovery.
pub async fn discover_buckets(store: &dyn LockedObjectStore) -> Result<BucketInventory> {
    let all = store.list_buckets().await?;

    let mut object_lock_enabled = Vec::new();
    for bucket in &all {
        if store.object_lock_enabled(bucket).await? {
            object_lock_enabled.push(bucket.clone());
        } else {
            debug!("skipping {bucket}: object lock not enabled");
        }
    }

    debug!(
        "{} bucket(s), {} with object lock enabled",
        all.len(),
        object_lock_enabled.len()
    );
    Ok(BucketInventory {
        all,
        object_lock_enabled,
    })
}
