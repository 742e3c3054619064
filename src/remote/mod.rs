//! Remote persistence
//!
//! The document store collaborator, the typed boundary in front of it and the
//! services used by the tools. Every call goes through a [`Gateway`], which bounds
//! it with a timeout.

pub mod document_store;
pub mod family;
pub mod tracking;
pub mod users;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::db::DbError;
use crate::models::{
    DailyNutrition, FamilyActivity, FamilyGroup, ProgressEntry, User, WorkoutSession,
};
use crate::validation::ValidationErrors;

pub use document_store::{DocumentStore, SqliteDocumentStore, StoredDocument};
pub use family::FamilyService;
pub use tracking::TrackingService;
pub use users::UserService;

/// Document fields, without the id
pub type Fields = serde_json::Map<String, Value>;

/// Default bound on a single document store call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("document store database error: {0}")]
    Database(#[from] DbError),

    #[error("document store task failed: {0}")]
    Task(String),

    #[error("no document '{id}' in {collection}")]
    NotFound { collection: String, id: String },

    #[error("invalid document in {collection}: {reason}")]
    InvalidDocument { collection: String, reason: String },

    #[error("Invalid invite code")]
    InvalidInviteCode,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl From<rusqlite::Error> for RemoteError {
    fn from(e: rusqlite::Error) -> Self {
        RemoteError::Database(DbError::Sqlite(e))
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// A typed record stored in a fixed collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
}

impl Document for User {
    const COLLECTION: &'static str = "users";
}

impl Document for FamilyGroup {
    const COLLECTION: &'static str = "familyGroups";
}

impl Document for FamilyActivity {
    const COLLECTION: &'static str = "familyActivities";
}

impl Document for WorkoutSession {
    const COLLECTION: &'static str = "workoutSessions";
}

impl Document for DailyNutrition {
    const COLLECTION: &'static str = "dailyNutrition";
}

impl Document for ProgressEntry {
    const COLLECTION: &'static str = "progressEntries";
}

fn invalid<D: Document, E: std::fmt::Display>(reason: E) -> RemoteError {
    RemoteError::InvalidDocument {
        collection: D::COLLECTION.to_string(),
        reason: reason.to_string(),
    }
}

/// Serialize any value into document fields, dropping `id`
pub fn to_fields<D: Document, T: Serialize>(value: &T) -> RemoteResult<Fields> {
    match serde_json::to_value(value).map_err(invalid::<D, _>)? {
        Value::Object(mut fields) => {
            fields.remove("id");
            Ok(fields)
        }
        _ => Err(invalid::<D, _>("not an object")),
    }
}

/// Rebuild a typed document from its id and stored fields
pub fn from_fields<D: Document>(id: String, mut fields: Fields) -> RemoteResult<D> {
    fields.insert("id".to_string(), Value::String(id));
    serde_json::from_value(Value::Object(fields)).map_err(invalid::<D, _>)
}

/// Typed, time-bounded access to a document store
#[derive(Clone)]
pub struct Gateway {
    store: Arc<dyn DocumentStore>,
    timeout: Duration,
}

impl Gateway {
    pub fn new(store: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> RemoteResult<T>
    where
        F: Future<Output = RemoteResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.timeout, "document store call timed out");
                Err(RemoteError::Timeout {
                    operation,
                    after: self.timeout,
                })
            }
        }
    }

    pub async fn create<D: Document>(&self, document: &D) -> RemoteResult<String> {
        let fields = to_fields::<D, _>(document)?;
        self.bounded("create", self.store.create_document(D::COLLECTION, fields))
            .await
    }

    pub async fn get<D: Document>(&self, id: &str) -> RemoteResult<Option<D>> {
        let fields = self
            .bounded("get", self.store.get_document(D::COLLECTION, id))
            .await?;
        fields
            .map(|fields| from_fields(id.to_string(), fields))
            .transpose()
    }

    /// Documents whose `field` equals `value`
    pub async fn find<D: Document>(&self, field: &str, value: Value) -> RemoteResult<Vec<D>> {
        let documents = self
            .bounded("query", self.store.query(D::COLLECTION, field, &value))
            .await?;
        documents
            .into_iter()
            .map(|doc| from_fields(doc.id, doc.fields))
            .collect()
    }

    pub async fn update<D: Document>(&self, id: &str, fields: Fields) -> RemoteResult<()> {
        self.bounded("update", self.store.update_document(D::COLLECTION, id, fields))
            .await
    }

    pub async fn delete<D: Document>(&self, id: &str) -> RemoteResult<()> {
        self.bounded("delete", self.store.delete_document(D::COLLECTION, id))
            .await
    }
}

/// Sort newest first and keep at most `limit` items
pub(crate) fn newest_first<T, K: Ord>(
    mut items: Vec<T>,
    key: impl Fn(&T) -> K,
    limit: Option<usize>,
) -> Vec<T> {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
