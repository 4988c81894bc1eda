//! In-process store.
//!
//! Used when the server starts without `DATABASE_URL` and by the test suite.
//! All state sits behind one lock, so the email uniqueness check and the
//! insert that follows it cannot interleave with another signup.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::DocumentStore;
use crate::{
    error::AppError,
    models::{
        document::{Collection, Document, Fields, merge_fields},
        user::{NewUser, User, UserChanges},
    },
};

#[derive(Debug, Default)]
struct Inner {
    /// Documents per collection, in insertion order
    documents: HashMap<Collection, Vec<Document>>,
    users: Vec<User>,
}

/// Store keeping every collection in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_documents(&self, collection: Collection) -> Result<Vec<Document>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.documents.get(&collection).cloned().unwrap_or_default())
    }

    async fn insert_document(
        &self,
        collection: Collection,
        body: Fields,
    ) -> Result<Document, AppError> {
        let document = Document {
            id: Uuid::new_v4(),
            body,
            created_at: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        inner
            .documents
            .entry(collection)
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn merge_document(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Fields,
    ) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let document = inner
            .documents
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id));

        match document {
            Some(document) => {
                merge_fields(&mut document.body, patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_document(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let Some(docs) = inner.documents.get_mut(&collection) else {
            return Ok(false);
        };

        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() != before)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;

        if let Some(ref email) = changes.email
            && inner.users.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(AppError::EmailTaken);
        }

        let Some(user) = inner.users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }

        Ok(true)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        Ok(inner.users.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn documents_keep_insertion_order() {
        let store = MemoryStore::new();
        let first = store
            .insert_document(Collection::Bookings, fields(json!({"n": 1})))
            .await
            .unwrap();
        let second = store
            .insert_document(Collection::Bookings, fields(json!({"n": 2})))
            .await
            .unwrap();

        let listed = store.list_documents(Collection::Bookings).await.unwrap();
        assert_eq!(listed, vec![first, second]);
        assert!(store.list_documents(Collection::Dresses).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn merge_and_delete_report_missing_ids() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();

        assert!(!store
            .merge_document(Collection::Dresses, missing, Fields::new())
            .await
            .unwrap());
        assert!(!store.delete_document(Collection::Dresses, missing).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store.insert_user(new_user("a@example.com")).await.unwrap();

        let err = store.insert_user(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::EmailTaken));
    }

    #[tokio::test]
    async fn update_rejects_email_of_another_user() {
        let store = MemoryStore::new();
        store.insert_user(new_user("a@example.com")).await.unwrap();
        let b = store.insert_user(new_user("b@example.com")).await.unwrap();

        let changes = UserChanges {
            email: Some("a@example.com".to_string()),
            ..UserChanges::default()
        };
        let err = store.update_user(b.id, changes).await.unwrap_err();
        assert!(matches!(err, AppError::EmailTaken));

        // Keeping one's own email is not a conflict
        let changes = UserChanges {
            email: Some("b@example.com".to_string()),
            name: Some("Bea".to_string()),
            ..UserChanges::default()
        };
        assert!(store.update_user(b.id, changes).await.unwrap());
        let stored = store.find_user_by_email("b@example.com").await.unwrap().unwrap();
        assert_eq!(stored.name, "Bea");
    }
}
