//! Client state stores
//!
//! One [`Store`] per domain (auth, family, workout, nutrition, progress, settings).
//! A store owns its state, notifies observers synchronously after each committed
//! mutation and, when it has a repository, saves the whole snapshot afterwards.
//!
//! Mutations take `&mut self`; a store is never shared between concurrent writers
//! without an outer lock.

pub mod auth;
pub mod family;
pub mod nutrition;
pub mod progress;
pub mod repository;
pub mod settings;
pub mod storage;
pub mod workout;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationErrors;

pub use auth::AuthState;
pub use family::FamilyState;
pub use nutrition::NutritionState;
pub use progress::ProgressState;
pub use repository::{JsonRepository, StateRepository, SNAPSHOT_VERSION};
pub use settings::SettingsState;
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError};
pub use workout::WorkoutState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot '{key}' has unsupported version {found}")]
    UnsupportedVersion { key: String, found: u32 },

    #[error("{store} store has no field '{field}'")]
    UnknownField { store: &'static str, field: String },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// State held by a store
pub trait StoreState:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Short name used in logs and errors
    const NAME: &'static str;

    /// Key of the persisted snapshot; `None` keeps the state in memory only
    const STORAGE_KEY: Option<&'static str>;
}

pub type SubscriptionId = u64;

type Observer<S> = Box<dyn Fn(&S) + Send + Sync>;

pub struct Store<S: StoreState> {
    state: S,
    repository: Option<Box<dyn StateRepository<S>>>,
    observers: Vec<(SubscriptionId, Observer<S>)>,
    next_subscription: SubscriptionId,
    dirty: bool,
}

impl<S: StoreState> Default for Store<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StoreState> Store<S> {
    /// Memory-only store starting from the default state
    pub fn new() -> Self {
        Self {
            state: S::default(),
            repository: None,
            observers: Vec::new(),
            next_subscription: 1,
            dirty: false,
        }
    }

    /// Store backed by a repository, hydrated from it.
    ///
    /// A snapshot that cannot be read is logged and replaced by the default state.
    pub fn with_repository(repository: Box<dyn StateRepository<S>>) -> Self {
        let state = match repository.load() {
            Ok(Some(state)) => {
                tracing::debug!(store = S::NAME, "store hydrated");
                state
            }
            Ok(None) => S::default(),
            Err(e) => {
                tracing::warn!(store = S::NAME, error = %e, "could not load snapshot, using defaults");
                S::default()
            }
        };
        Self {
            state,
            repository: Some(repository),
            ..Self::new()
        }
    }

    /// Store persisted under `S::STORAGE_KEY`, or memory-only when the state has none
    pub fn persistent(storage: Arc<dyn KeyValueStorage>) -> Self {
        match S::STORAGE_KEY {
            Some(key) => Self::with_repository(Box::new(JsonRepository::<S>::new(storage, key))),
            None => Self::new(),
        }
    }

    pub fn get(&self) -> &S {
        &self.state
    }

    pub fn snapshot(&self) -> S {
        self.state.clone()
    }

    /// Whether the last committed state has not reached storage
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply an infallible mutation and commit it
    pub fn update<F>(&mut self, f: F) -> StoreResult<&S>
    where
        F: FnOnce(&mut S),
    {
        f(&mut self.state);
        self.commit()
    }

    /// Apply a fallible mutation; on error the state is left untouched
    pub fn try_update<F>(&mut self, f: F) -> StoreResult<&S>
    where
        F: FnOnce(&mut S) -> StoreResult<()>,
    {
        let mut next = self.state.clone();
        f(&mut next)?;
        self.state = next;
        self.commit()
    }

    /// Replace one field, addressed by its serialized (camelCase) name
    pub fn set_field(&mut self, field: &str, value: serde_json::Value) -> StoreResult<&S> {
        let mut fields = match serde_json::to_value(&self.state)? {
            serde_json::Value::Object(map) => map,
            _ => {
                return Err(StoreError::UnknownField {
                    store: S::NAME,
                    field: field.to_string(),
                })
            }
        };
        match fields.get_mut(field) {
            Some(slot) => *slot = value,
            None => {
                return Err(StoreError::UnknownField {
                    store: S::NAME,
                    field: field.to_string(),
                })
            }
        }
        let next: S = serde_json::from_value(serde_json::Value::Object(fields))?;
        self.state = next;
        self.commit()
    }

    /// Back to the default state; the persisted snapshot is removed
    pub fn reset(&mut self) -> StoreResult<&S> {
        self.state = S::default();
        self.notify();
        if let Some(repository) = &self.repository {
            if let Err(e) = repository.clear() {
                self.dirty = true;
                return Err(e);
            }
        }
        self.dirty = false;
        Ok(&self.state)
    }

    /// Retry a save that failed earlier
    pub fn flush(&mut self) -> StoreResult<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(repository) = &self.repository {
            repository.save(&self.state)?;
        }
        self.dirty = false;
        Ok(())
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false when the subscription was not found
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn notify(&self) {
        for (_, observer) in &self.observers {
            observer(&self.state);
        }
    }

    fn commit(&mut self) -> StoreResult<&S> {
        self.notify();
        if let Some(repository) = &self.repository {
            if let Err(e) = repository.save(&self.state) {
                tracing::warn!(store = S::NAME, error = %e, "snapshot save failed, keeping in-memory state");
                self.dirty = true;
                return Err(e);
            }
        }
        self.dirty = false;
        Ok(&self.state)
    }
}

/// Every client store of the app
pub struct AppStores {
    pub auth: Store<AuthState>,
    pub family: Store<FamilyState>,
    pub workout: Store<WorkoutState>,
    pub nutrition: Store<NutritionState>,
    pub progress: Store<ProgressState>,
    pub settings: Store<SettingsState>,
}

impl AppStores {
    pub fn in_memory() -> Self {
        Self {
            auth: Store::new(),
            family: Store::new(),
            workout: Store::new(),
            nutrition: Store::new(),
            progress: Store::new(),
            settings: Store::new(),
        }
    }

    /// Stores hydrated from (and saving to) the given storage
    pub fn persistent(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            auth: Store::persistent(storage.clone()),
            family: Store::persistent(storage.clone()),
            workout: Store::persistent(storage.clone()),
            nutrition: Store::persistent(storage.clone()),
            progress: Store::persistent(storage.clone()),
            settings: Store::persistent(storage),
        }
    }

    /// Retry pending saves on every store, returning the first failure
    pub fn flush_all(&mut self) -> StoreResult<()> {
        let results = [
            self.auth.flush(),
            self.family.flush(),
            self.workout.flush(),
            self.nutrition.flush(),
            self.progress.flush(),
            self.settings.flush(),
        ];
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::storage::FlakyStorage;
    use crate::models::{AppSettings, Theme};

    #[test]
    fn test_add_water_twice() {
        let mut store: Store<NutritionState> = Store::new();
        store.add_water(250.0).unwrap();
        let _ = store.get().water_intake;
        let _ = store.snapshot();
        store.add_water(250.0).unwrap();
        assert_eq!(store.get().water_intake, 500.0);
    }

    #[test]
    fn test_observers_are_notified_synchronously() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut store: Store<NutritionState> = Store::new();
        let id = store.subscribe(move |state: &NutritionState| {
            assert!(state.water_intake > 0.0);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.add_water(100.0).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add_water(100.0).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_set_field_by_wire_name() {
        let mut store: Store<NutritionState> = Store::new();
        store
            .set_field("waterIntake", serde_json::json!(750.0))
            .unwrap();
        assert_eq!(store.get().water_intake, 750.0);

        let err = store.set_field("water", serde_json::json!(1)).unwrap_err();
        assert!(matches!(err, StoreError::UnknownField { .. }));

        let err = store
            .set_field("waterIntake", serde_json::json!("lots"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
        assert_eq!(store.get().water_intake, 750.0);
    }

    #[test]
    fn test_persistent_store_rehydrates() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        {
            let mut stores = AppStores::persistent(storage.clone());
            stores.nutrition.add_water(300.0).unwrap();
            stores
                .settings
                .set_settings(AppSettings::defaults_for("u1"))
                .unwrap();
        }

        let stores = AppStores::persistent(storage.clone());
        assert_eq!(stores.nutrition.get().water_intake, 300.0);
        assert_eq!(stores.settings.get().settings.as_ref().unwrap().user_id, "u1");
        assert!(storage.get("nutrition-storage").unwrap().is_some());
    }

    #[test]
    fn test_family_store_is_not_persisted() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let mut stores = AppStores::persistent(storage.clone());
        stores.family.set_family_members(Vec::new()).unwrap();
        assert!(storage.get("family-storage").unwrap().is_none());
    }

    #[test]
    fn test_failed_save_keeps_state_and_flush_retries() {
        let storage = Arc::new(FlakyStorage::default());
        let mut store: Store<NutritionState> = Store::persistent(storage.clone());

        storage.fail(true);
        let err = store.add_water(200.0).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(store.get().water_intake, 200.0);
        assert!(store.is_dirty());
        assert!(store.flush().is_err());

        storage.fail(false);
        store.flush().unwrap();
        assert!(!store.is_dirty());

        let reloaded: Store<NutritionState> = Store::persistent(storage);
        assert_eq!(reloaded.get().water_intake, 200.0);
    }

    #[test]
    fn test_unreadable_snapshot_falls_back_to_default() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("settings-storage", "{broken").unwrap();
        let store: Store<SettingsState> = Store::persistent(storage);
        assert!(store.get().settings.is_none());
    }

    #[test]
    fn test_reset_clears_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store: Store<SettingsState> = Store::persistent(storage.clone());
        store.set_settings(AppSettings::defaults_for("u1")).unwrap();
        store
            .update_settings(crate::models::AppSettingsUpdate {
                theme: Some(Theme::Dark),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.get().settings.as_ref().unwrap().theme, Theme::Dark);

        store.reset().unwrap();
        assert!(store.get().settings.is_none());
        assert!(storage.get("settings-storage").unwrap().is_none());
    }
}
