//! # Contact Repository
//!
//! Stores contact form submissions. Rows are only ever inserted; there is no
//! update path.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;
use storefront_core::{Contact, ContactSubmission};

#[derive(Debug, Clone, FromRow)]
struct ContactRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// Repository for contact submissions.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    /// Creates a new ContactRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ContactRepository { pool }
    }

    /// Stores a validated submission and returns the new row id.
    pub async fn insert(&self, submission: &ContactSubmission) -> DbResult<i64> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO contact_information (first_name, last_name, email, message, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&submission.first_name)
        .bind(&submission.last_name)
        .bind(&submission.email)
        .bind(&submission.message)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(id = id, "Contact submission stored");
        Ok(id)
    }

    /// Gets a submission by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Contact>> {
        debug!(id = id, "Fetching contact submission");

        let row: Option<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, message, created_at
            FROM contact_information
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Contact::from))
    }

    /// Counts stored submissions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_information")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use storefront_core::ContactSubmission;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            message: "Do you ship abroad?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.contacts();

        let id = repo.insert(&submission()).await.unwrap();
        let stored = repo.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.first_name, "Ada");
        assert_eq!(stored.message, "Do you ship abroad?");
        assert!(stored.created_at <= chrono::Utc::now());
    }

    #[tokio::test]
    async fn test_ids_increase_and_count() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.contacts();

        let first = repo.insert(&submission()).await.unwrap();
        let second = repo.insert(&submission()).await.unwrap();

        assert!(second > first);
        assert_eq!(repo.count().await.unwrap(), 2);
        assert!(repo.get_by_id(second + 1).await.unwrap().is_none());
    }
}
