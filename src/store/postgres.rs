//! PostgreSQL-backed store.
//!
//! Each document collection is a table of `(id, body JSONB, created_at)`;
//! partial merges use the `jsonb || jsonb` operator so the merge happens in a
//! single statement.

use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use super::DocumentStore;
use crate::{
    db::DbPool,
    error::AppError,
    models::{
        document::{Collection, Document, Fields},
        user::{NewUser, User, UserChanges},
    },
};

/// Store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-index violation on `users.email` to a conflict.
fn email_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return AppError::EmailTaken;
    }
    AppError::Database(e)
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_documents(&self, collection: Collection) -> Result<Vec<Document>, AppError> {
        // Table names come from the Collection enum, never from the request
        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT id, body, created_at FROM {} ORDER BY created_at, id",
            collection.table()
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    async fn insert_document(
        &self,
        collection: Collection,
        body: Fields,
    ) -> Result<Document, AppError> {
        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            INSERT INTO {} (id, body)
            VALUES ($1, $2)
            RETURNING id, body, created_at
            "#,
            collection.table()
        ))
        .bind(Uuid::new_v4())
        .bind(Json(body))
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    async fn merge_document(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Fields,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET body = body || $2 WHERE id = $1",
            collection.table()
        ))
        .bind(id)
        .bind(Json(patch))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_document(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", collection.table()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(email_conflict)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .execute(&self.pool)
        .await
        .map_err(email_conflict)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::error::{DatabaseError, ErrorKind};

    /// Database error with a chosen kind, standing in for a driver error.
    #[derive(Debug)]
    struct ConstraintError(ErrorKind);

    impl std::fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "constraint violated: {:?}", self.0)
        }
    }

    impl std::error::Error for ConstraintError {}

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stored".to_string(),
        }
    }

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn unique_violations_become_email_conflicts() {
        let unique = sqlx::Error::Database(Box::new(ConstraintError(ErrorKind::UniqueViolation)));
        assert!(matches!(email_conflict(unique), AppError::EmailTaken));

        let other = sqlx::Error::Database(Box::new(ConstraintError(ErrorKind::Other)));
        assert!(matches!(email_conflict(other), AppError::Database(_)));

        assert!(matches!(
            email_conflict(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
    async fn merge_overwrites_top_level_fields(pool: DbPool) {
        let store = PgStore::new(pool);
        let document = store
            .insert_document(
                Collection::Dresses,
                fields(json!({"name": "Aurora", "price": 1200, "details": {"fabric": "silk"}})),
            )
            .await
            .unwrap();

        let merged = store
            .merge_document(
                Collection::Dresses,
                document.id,
                fields(json!({"price": 999, "details": {"train": true}})),
            )
            .await
            .unwrap();
        assert!(merged);

        let listed = store.list_documents(Collection::Dresses).await.unwrap();
        assert_eq!(
            serde_json::Value::Object(listed[0].body.clone()),
            json!({"name": "Aurora", "price": 999, "details": {"train": true}})
        );

        let missing = store
            .merge_document(Collection::Dresses, Uuid::new_v4(), fields(json!({"price": 1})))
            .await
            .unwrap();
        assert!(!missing);
        assert!(store.list_documents(Collection::Accessories).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
    async fn duplicate_emails_conflict(pool: DbPool) {
        let store = PgStore::new(pool);
        store.insert_user(new_user("ada@example.com")).await.unwrap();
        let bea = store.insert_user(new_user("bea@example.com")).await.unwrap();

        let err = store.insert_user(new_user("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::EmailTaken));

        let changes = UserChanges {
            email: Some("ada@example.com".to_string()),
            ..UserChanges::default()
        };
        let err = store.update_user(bea.id, changes).await.unwrap_err();
        assert!(matches!(err, AppError::EmailTaken));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
    async fn partial_user_updates_keep_other_columns(pool: DbPool) {
        let store = PgStore::new(pool);
        let ada = store.insert_user(new_user("ada@example.com")).await.unwrap();

        let changes = UserChanges {
            name: Some("Ada L.".to_string()),
            ..UserChanges::default()
        };
        assert!(store.update_user(ada.id, changes).await.unwrap());

        let stored = store.find_user_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(stored.name, "Ada L.");
        assert_eq!(stored.password_hash, ada.password_hash);

        assert!(store.delete_user(ada.id).await.unwrap());
        assert!(!store.delete_user(ada.id).await.unwrap());
    }
}
