//! Storage layer.
//!
//! Handlers never talk to a database directly: they go through the
//! [`DocumentStore`] trait held in the application state. Two backends exist:
//!
//! - [`PgStore`]: PostgreSQL through a `sqlx` pool (production)
//! - [`MemoryStore`]: process-local maps (no `DATABASE_URL`, and tests)

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        document::{Collection, Document, Fields},
        user::{NewUser, User, UserChanges},
    },
};

/// Operations the HTTP layer needs from a backing store.
///
/// Every method is a single round trip. Methods returning `bool` report
/// whether a record with the given identifier existed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// All documents of a collection in insertion order.
    async fn list_documents(&self, collection: Collection) -> Result<Vec<Document>, AppError>;

    /// Store `body` as a new document and return it with its identifier.
    async fn insert_document(
        &self,
        collection: Collection,
        body: Fields,
    ) -> Result<Document, AppError>;

    /// Overwrite the top-level fields present in `patch`.
    async fn merge_document(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Fields,
    ) -> Result<bool, AppError>;

    async fn delete_document(&self, collection: Collection, id: Uuid) -> Result<bool, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Create a user.
    ///
    /// # Errors
    ///
    /// `AppError::EmailTaken` if another user already has this email. The
    /// check is atomic with the insert.
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Apply the fields set in `changes`.
    ///
    /// # Errors
    ///
    /// `AppError::EmailTaken` if the new email belongs to another user.
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<bool, AppError>;

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError>;
}
