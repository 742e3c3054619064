//! Document store seam and its SQLite implementation

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::{Fields, RemoteError, RemoteResult};
use crate::db::Database;

/// A stored document: its id and its fields (without the id)
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Fields,
}

/// Schemaless documents grouped into collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return its generated id
    async fn create_document(&self, collection: &str, fields: Fields) -> RemoteResult<String>;

    async fn get_document(&self, collection: &str, id: &str) -> RemoteResult<Option<Fields>>;

    /// Documents whose `field` equals `value`, in insertion order
    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> RemoteResult<Vec<StoredDocument>>;

    /// Merge `fields` into an existing document
    async fn update_document(&self, collection: &str, id: &str, fields: Fields)
        -> RemoteResult<()>;

    /// Remove a document; removing a missing document is not an error
    async fn delete_document(&self, collection: &str, id: &str) -> RemoteResult<()>;
}

/// Documents in the local `documents` table
#[derive(Clone)]
pub struct SqliteDocumentStore {
    db: Database,
}

impl SqliteDocumentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Run blocking SQLite work off the async executor
    async fn run<T, F>(&self, f: F) -> RemoteResult<T>
    where
        F: FnOnce(&Connection) -> RemoteResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_conn()?;
            f(&conn)
        })
        .await
        .map_err(|e| RemoteError::Task(e.to_string()))?
    }
}

fn parse_fields(collection: &str, raw: &str) -> RemoteResult<Fields> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(RemoteError::InvalidDocument {
            collection: collection.to_string(),
            reason: "stored fields are not an object".to_string(),
        }),
        Err(e) => Err(RemoteError::InvalidDocument {
            collection: collection.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// JSON path selecting a top-level field
fn field_path(field: &str) -> String {
    format!("$.\"{}\"", field)
}

fn load_fields(conn: &Connection, collection: &str, id: &str) -> RemoteResult<Option<Fields>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT fields FROM documents WHERE collection = ? AND id = ?",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()?;
    raw.map(|raw| parse_fields(collection, &raw)).transpose()
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create_document(&self, collection: &str, mut fields: Fields) -> RemoteResult<String> {
        let collection = collection.to_string();
        fields.remove("id");
        self.run(move |conn| {
            let id = uuid::Uuid::new_v4().to_string();
            conn.execute(
                "INSERT INTO documents (collection, id, fields) VALUES (?, ?, ?)",
                params![collection, id, Value::Object(fields).to_string()],
            )?;
            tracing::debug!(collection = %collection, id = %id, "document created");
            Ok(id)
        })
        .await
    }

    async fn get_document(&self, collection: &str, id: &str) -> RemoteResult<Option<Fields>> {
        let collection = collection.to_string();
        let id = id.to_string();
        self.run(move |conn| load_fields(conn, &collection, &id)).await
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> RemoteResult<Vec<StoredDocument>> {
        let collection = collection.to_string();
        let field = field.to_string();
        let value = value.clone();
        self.run(move |conn| {
            // SQLite narrows by the extracted SQL value; the JSON comparison below
            // keeps types exact (true vs 1, missing vs null)
            let mut stmt = conn.prepare(
                "SELECT id, fields FROM documents
                 WHERE collection = ?1 AND json_extract(fields, ?2) IS json_extract(?3, '$')
                 ORDER BY rowid",
            )?;
            let rows = stmt
                .query_map(
                    params![collection, field_path(&field), value.to_string()],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
                )?
                .collect::<Result<Vec<_>, _>>()?;

            let mut matches = Vec::new();
            for (id, raw) in rows {
                let fields = parse_fields(&collection, &raw)?;
                if fields.get(&field) == Some(&value) {
                    matches.push(StoredDocument { id, fields });
                }
            }
            Ok(matches)
        })
        .await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> RemoteResult<()> {
        let collection = collection.to_string();
        let id = id.to_string();
        self.run(move |conn| {
            let mut current =
                load_fields(conn, &collection, &id)?.ok_or_else(|| RemoteError::NotFound {
                    collection: collection.clone(),
                    id: id.clone(),
                })?;
            for (key, value) in fields {
                if key != "id" {
                    current.insert(key, value);
                }
            }
            conn.execute(
                "UPDATE documents SET fields = ?, updated_at = datetime('now')
                 WHERE collection = ? AND id = ?",
                params![Value::Object(current).to_string(), collection, id],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> RemoteResult<()> {
        let collection = collection.to_string();
        let id = id.to_string();
        self.run(move |conn| {
            conn.execute(
                "DELETE FROM documents WHERE collection = ? AND id = ?",
                params![collection, id],
            )?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::db;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn store() -> SqliteDocumentStore {
        SqliteDocumentStore::new(db::in_memory_migrated().unwrap())
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let store = store();
        let id = store
            .create_document("users", fields(json!({"id": "ignored", "name": "Sam", "age": 30})))
            .await
            .unwrap();
        assert_ne!(id, "ignored");

        let doc = store.get_document("users", &id).await.unwrap().unwrap();
        assert_eq!(doc.get("name"), Some(&json!("Sam")));
        assert!(doc.get("id").is_none());

        store
            .update_document("users", &id, fields(json!({"age": 31, "goal": "bulking"})))
            .await
            .unwrap();
        let doc = store.get_document("users", &id).await.unwrap().unwrap();
        assert_eq!(doc.get("age"), Some(&json!(31)));
        assert_eq!(doc.get("name"), Some(&json!("Sam")));

        store.delete_document("users", &id).await.unwrap();
        assert!(store.get_document("users", &id).await.unwrap().is_none());
        store.delete_document("users", &id).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let err = store()
            .update_document("users", "nope", Fields::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_query_by_field_in_insertion_order() {
        let store = store();
        let a = store
            .create_document("workoutSessions", fields(json!({"userId": "u1", "n": 1})))
            .await
            .unwrap();
        store
            .create_document("workoutSessions", fields(json!({"userId": "u2", "n": 2})))
            .await
            .unwrap();
        let c = store
            .create_document("workoutSessions", fields(json!({"userId": "u1", "n": 3})))
            .await
            .unwrap();
        store
            .create_document("progressEntries", fields(json!({"userId": "u1"})))
            .await
            .unwrap();

        let found = store
            .query("workoutSessions", "userId", &json!("u1"))
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![a.as_str(), c.as_str()]);
        assert!(store
            .query("workoutSessions", "userId", &json!("u9"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_query_matches_exact_json_values() {
        let store = store();
        let flag = store
            .create_document("users", fields(json!({"active": true, "age": 30})))
            .await
            .unwrap();
        let numeric = store
            .create_document("users", fields(json!({"active": 1, "age": 30, "note": null})))
            .await
            .unwrap();
        store
            .create_document("users", fields(json!({"age": 31})))
            .await
            .unwrap();

        let ids = |docs: Vec<StoredDocument>| docs.into_iter().map(|d| d.id).collect::<Vec<_>>();
        assert_eq!(ids(store.query("users", "active", &json!(true)).await.unwrap()), vec![flag]);
        assert_eq!(ids(store.query("users", "active", &json!(1)).await.unwrap()), vec![numeric.clone()]);
        assert_eq!(ids(store.query("users", "note", &Value::Null).await.unwrap()), vec![numeric]);
        assert_eq!(ids(store.query("users", "age", &json!(30)).await.unwrap()).len(), 2);
    }
}
