//! Vault context - in-memory credentials plus the store they mirror to.
//!
//! Shared by the credentials manager (the only writer) and the registration
//! orchestrator (reads a snapshot per attempt).

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::domain::Credentials;
use crate::errors::AppError;
use crate::infra::{load_or_default, ConfigStore};

/// Handle to the credentials record and its backing store.
#[derive(Clone)]
pub struct Vault {
    credentials: Arc<RwLock<Credentials>>,
    store: Arc<dyn ConfigStore>,
}

impl Vault {
    /// Wrap already-loaded credentials.
    pub fn new(credentials: Credentials, store: Arc<dyn ConfigStore>) -> Self {
        Self {
            credentials: Arc::new(RwLock::new(credentials)),
            store,
        }
    }

    /// Load from the store. Load failures leave the vault unconfigured and
    /// are returned alongside it.
    pub fn open(store: Arc<dyn ConfigStore>) -> (Self, Option<AppError>) {
        let (credentials, error) = load_or_default(store.as_ref());
        (Self::new(credentials, store), error)
    }

    /// Copy of the current record.
    pub async fn snapshot(&self) -> Credentials {
        self.credentials.read().await.clone()
    }

    pub fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    /// Exclusive access for an update. Holding the guard serializes writers.
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Credentials> {
        self.credentials.write().await
    }
}
