//! Postgres-backed job description store.
//!
//! Rows live in the `job_descriptions` table; ids come from a `BIGSERIAL`
//! sequence, so they are never reused. Each operation is a single statement
//! and relies on Postgres per-statement atomicity (last write wins).

use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::instrument;

use jobdesk_job_descriptions::{
    JobDescription, JobDescriptionDetails, JobDescriptionId, JobDescriptionRecord,
};

use super::{JobDescriptionStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS job_descriptions (
    id BIGSERIAL PRIMARY KEY,
    job_title VARCHAR(255) NOT NULL,
    company VARCHAR(255) NOT NULL,
    job_description TEXT NOT NULL
)
"#;

/// Postgres-backed job description store.
#[derive(Debug, Clone)]
pub struct PostgresJobDescriptionStore {
    pool: PgPool,
}

impl PostgresJobDescriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| db_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `job_descriptions` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("ensure_schema", e))?;
        Ok(())
    }
}

fn db_error(operation: &'static str, source: sqlx::Error) -> StoreError {
    StoreError::Database { operation, source }
}

struct JobDescriptionRow {
    id: i64,
    job_title: String,
    company: String,
    job_description: String,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for JobDescriptionRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(JobDescriptionRow {
            id: row.try_get("id")?,
            job_title: row.try_get("job_title")?,
            company: row.try_get("company")?,
            job_description: row.try_get("job_description")?,
        })
    }
}

impl From<JobDescriptionRow> for JobDescription {
    fn from(row: JobDescriptionRow) -> Self {
        JobDescription::new(
            JobDescriptionId::new(row.id),
            JobDescriptionDetails::from_stored(row.job_title, row.company, row.job_description),
        )
    }
}

#[async_trait::async_trait]
impl JobDescriptionStore for PostgresJobDescriptionStore {
    #[instrument(skip(self, record), fields(id = ?record.id), err)]
    async fn save(&self, record: JobDescriptionRecord) -> Result<JobDescription, StoreError> {
        let details = &record.details;

        let row = match record.id {
            None => sqlx::query_as::<_, JobDescriptionRow>(
                r#"
                INSERT INTO job_descriptions (job_title, company, job_description)
                VALUES ($1, $2, $3)
                RETURNING id, job_title, company, job_description
                "#,
            )
            .bind(details.job_title())
            .bind(details.company())
            .bind(details.job_description())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("insert", e))?,
            Some(id) => sqlx::query_as::<_, JobDescriptionRow>(
                r#"
                UPDATE job_descriptions
                SET job_title = $2, company = $3, job_description = $4
                WHERE id = $1
                RETURNING id, job_title, company, job_description
                "#,
            )
            .bind(id.get())
            .bind(details.job_title())
            .bind(details.company())
            .bind(details.job_description())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("update", e))?
            .ok_or(StoreError::Missing(id))?,
        };

        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: JobDescriptionId) -> Result<Option<JobDescription>, StoreError> {
        let row = sqlx::query_as::<_, JobDescriptionRow>(
            "SELECT id, job_title, company, job_description FROM job_descriptions WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find_by_id", e))?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<JobDescription>, StoreError> {
        let rows = sqlx::query_as::<_, JobDescriptionRow>(
            "SELECT id, job_title, company, job_description FROM job_descriptions ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("find_all", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), err)]
    async fn exists_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM job_descriptions WHERE id = $1) AS present")
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("exists_by_id", e))?;

        row.try_get::<bool, _>("present")
            .map_err(|e| db_error("exists_by_id", e))
    }

    #[instrument(skip(self), err)]
    async fn delete_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM job_descriptions WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete_by_id", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(title: &str) -> JobDescriptionDetails {
        JobDescriptionDetails::parse(
            Some(title.to_string()),
            Some("Acme".to_string()),
            Some("Build things".to_string()),
        )
        .unwrap()
    }

    // Needs a reachable Postgres: DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn lifecycle_against_postgres() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let store = PostgresJobDescriptionStore::connect(&url, 2).await.unwrap();
        store.ensure_schema().await.unwrap();

        let created = store.save(JobDescriptionRecord::new(details("Engineer"))).await.unwrap();
        assert_eq!(store.find_by_id(created.id()).await.unwrap(), Some(created.clone()));

        let updated = store
            .save(created.clone().with_details(details("Staff Engineer")).into())
            .await
            .unwrap();
        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.details().job_title(), "Staff Engineer");
        assert!(store.find_all().await.unwrap().iter().any(|j| j.id() == created.id()));

        assert!(store.delete_by_id(created.id()).await.unwrap());
        assert!(!store.exists_by_id(created.id()).await.unwrap());
        assert!(matches!(
            store.save(updated.into()).await,
            Err(StoreError::Missing(_))
        ));
    }
}
