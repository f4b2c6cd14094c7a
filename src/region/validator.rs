//! Region allow-list gate.
//!
//! Every listing and file request passes through [`RegionValidator::is_allowed`]
//! before the filesystem is touched. A store failure denies access.

use std::sync::Arc;

use tracing::{debug, error};

use super::store::RegionStore;

/// Checks candidate region names against the store on every call.
pub struct RegionValidator<S: RegionStore> {
    store: Arc<S>,
}

impl<S: RegionStore> RegionValidator<S> {
    /// Create a validator over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Return true iff `region` exists in the store.
    ///
    /// Query errors are logged and reported as "not allowed".
    pub async fn is_allowed(&self, region: &str) -> bool {
        match self.store.region_exists(region).await {
            Ok(true) => true,
            Ok(false) => {
                debug!(region = region, "Region not in allow-list");
                false
            }
            Err(e) => {
                error!(region = region, error = %e, "Region lookup failed, denying access");
                false
            }
        }
    }
}

impl<S: RegionStore> Clone for RegionValidator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
