//! Snapshot repositories
//!
//! A repository loads and saves one store's whole state. Stores call it at fixed
//! points: once when they are built and after every committed mutation.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::storage::KeyValueStorage;
use super::StoreError;

/// Envelope version written with every snapshot
pub const SNAPSHOT_VERSION: u32 = 0;

pub trait StateRepository<S>: Send + Sync {
    /// The saved snapshot, if any
    fn load(&self) -> Result<Option<S>, StoreError>;

    fn save(&self, state: &S) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a, S> {
    state: &'a S,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<S> {
    state: S,
    #[serde(default)]
    version: u32,
}

/// JSON snapshots under a fixed key: `{"state": .., "version": 0}`
pub struct JsonRepository<S> {
    storage: Arc<dyn KeyValueStorage>,
    key: &'static str,
    _state: PhantomData<fn() -> S>,
}

impl<S> JsonRepository<S> {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: &'static str) -> Self {
        Self {
            storage,
            key,
            _state: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl<S> StateRepository<S> for JsonRepository<S>
where
    S: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<S>, StoreError> {
        let Some(raw) = self.storage.get(self.key)? else {
            return Ok(None);
        };
        let envelope: Envelope<S> = serde_json::from_str(&raw)?;
        if envelope.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                key: self.key.to_string(),
                found: envelope.version,
            });
        }
        Ok(Some(envelope.state))
    }

    fn save(&self, state: &S) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&EnvelopeRef {
            state,
            version: SNAPSHOT_VERSION,
        })?;
        self.storage.set(self.key, &raw)?;
        tracing::debug!(key = self.key, bytes = raw.len(), "snapshot saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(self.key)?;
        Ok(())
    }
}
