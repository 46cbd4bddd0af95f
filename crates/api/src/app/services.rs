use std::sync::Arc;

use anyhow::Context;

use jobdesk_infra::config::DatabaseSettings;
use jobdesk_infra::{
    InMemoryJobDescriptionStore, JobDescriptionStore, PostgresJobDescriptionStore, StoreError,
};
use jobdesk_job_descriptions::{JobDescriptionDetails, JobDescriptionId, JobDescriptionRecord};

use crate::app::dto::JobDescriptionResponse;

/// Services shared by all handlers.
#[derive(Clone)]
pub struct AppServices {
    pub job_descriptions: JobDescriptionService,
}

impl AppServices {
    pub fn new(store: Arc<dyn JobDescriptionStore>) -> Self {
        Self {
            job_descriptions: JobDescriptionService::new(store),
        }
    }

    /// Services backed by a fresh in-memory store (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryJobDescriptionStore::new()))
    }
}

/// Pick the store from configuration: Postgres when a URL is set, in-memory otherwise.
pub async fn build_services(database: &DatabaseSettings) -> anyhow::Result<AppServices> {
    let Some(url) = database.url.as_deref() else {
        tracing::warn!("database.url not set; using in-memory store (data is lost on exit)");
        return Ok(AppServices::in_memory());
    };

    let store = PostgresJobDescriptionStore::connect(url, database.max_connections)
        .await
        .context("failed to connect to Postgres")?;
    store
        .ensure_schema()
        .await
        .context("failed to prepare job_descriptions table")?;

    tracing::info!("using Postgres job description store");
    Ok(AppServices::new(Arc::new(store)))
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Job description not found with id {0}")]
    NotFound(JobDescriptionId),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            // An overwrite raced with a delete: the record is gone.
            StoreError::Missing(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Job description use cases: translation between DTOs and stored records,
/// plus the "must exist" checks for reads, updates and deletes.
#[derive(Clone)]
pub struct JobDescriptionService {
    store: Arc<dyn JobDescriptionStore>,
}

impl JobDescriptionService {
    pub fn new(store: Arc<dyn JobDescriptionStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        details: JobDescriptionDetails,
    ) -> Result<JobDescriptionResponse, ServiceError> {
        let saved = self.store.save(JobDescriptionRecord::new(details)).await?;
        tracing::info!(id = %saved.id(), "job description created");
        Ok(saved.into())
    }

    pub async fn get_by_id(
        &self,
        id: JobDescriptionId,
    ) -> Result<JobDescriptionResponse, ServiceError> {
        match self.store.find_by_id(id).await? {
            Some(found) => Ok(found.into()),
            None => Err(not_found(id)),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<JobDescriptionResponse>, ServiceError> {
        let all = self.store.find_all().await?;
        Ok(all.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: JobDescriptionId,
        details: JobDescriptionDetails,
    ) -> Result<JobDescriptionResponse, ServiceError> {
        let existing = self.store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        let saved = self.store.save(existing.with_details(details).into()).await?;
        tracing::info!(id = %saved.id(), "job description updated");
        Ok(saved.into())
    }

    pub async fn delete(&self, id: JobDescriptionId) -> Result<(), ServiceError> {
        if !self.store.exists_by_id(id).await? {
            return Err(not_found(id));
        }

        // Removed by a concurrent request between the two calls.
        if !self.store.delete_by_id(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(id = %id, "job description deleted");
        Ok(())
    }
}

fn not_found(id: JobDescriptionId) -> ServiceError {
    tracing::debug!(id = %id, "job description not found");
    ServiceError::NotFound(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobdesk_job_descriptions::JobDescription;

    fn details(title: &str, company: &str, text: &str) -> JobDescriptionDetails {
        JobDescriptionDetails::parse(
            Some(title.to_string()),
            Some(company.to_string()),
            Some(text.to_string()),
        )
        .unwrap()
    }

    fn service() -> JobDescriptionService {
        AppServices::in_memory().job_descriptions
    }

    #[tokio::test]
    async fn create_then_get_returns_input_fields() {
        let svc = service();

        let created = svc
            .create(details("Engineer", "Acme", "Build things"))
            .await
            .unwrap();
        let fetched = svc.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.job_title, "Engineer");
        assert_eq!(fetched.company, "Acme");
        assert_eq!(fetched.job_description, "Build things");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_everywhere() {
        let svc = service();
        let id = JobDescriptionId::new(404);

        assert!(matches!(svc.get_by_id(id).await, Err(ServiceError::NotFound(i)) if i == id));
        assert!(matches!(
            svc.update(id, details("a", "b", "c")).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(svc.delete(id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_preserves_id_and_replaces_fields() {
        let svc = service();
        let created = svc.create(details("Old", "OldCo", "old text")).await.unwrap();

        let updated = svc
            .update(created.id, details("New", "NewCo", "new text"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(svc.get_by_id(created.id).await.unwrap(), updated);
        assert_eq!(updated.job_title, "New");
        assert_eq!(updated.company, "NewCo");
        assert_eq!(updated.job_description, "new text");
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = Arc::new(InMemoryJobDescriptionStore::new());
        let svc = JobDescriptionService::new(store.clone());
        let created = svc.create(details("a", "b", "c")).await.unwrap();

        svc.delete(created.id).await.unwrap();

        assert!(matches!(svc.get_by_id(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(!store.exists_by_id(created.id).await.unwrap());
        assert!(matches!(svc.delete(created.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_all_lists_every_record() {
        let svc = service();
        assert!(svc.get_all().await.unwrap().is_empty());

        for i in 0..3 {
            svc.create(details(&format!("title {i}"), "Acme", "text"))
                .await
                .unwrap();
        }

        let all = svc.get_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|j| j.job_title == "title 2"));
    }

    /// Store whose rows vanish between the existence check and the write,
    /// as if another request deleted them concurrently.
    struct VanishingStore {
        inner: InMemoryJobDescriptionStore,
    }

    #[async_trait::async_trait]
    impl JobDescriptionStore for VanishingStore {
        async fn save(&self, record: JobDescriptionRecord) -> Result<JobDescription, StoreError> {
            if let Some(id) = record.id {
                self.inner.delete_by_id(id).await?;
            }
            self.inner.save(record).await
        }

        async fn find_by_id(&self, id: JobDescriptionId) -> Result<Option<JobDescription>, StoreError> {
            self.inner.find_by_id(id).await
        }

        async fn find_all(&self) -> Result<Vec<JobDescription>, StoreError> {
            self.inner.find_all().await
        }

        async fn exists_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError> {
            self.inner.exists_by_id(id).await
        }

        async fn delete_by_id(&self, id: JobDescriptionId) -> Result<bool, StoreError> {
            self.inner.delete_by_id(id).await?;
            self.inner.delete_by_id(id).await
        }
    }

    #[tokio::test]
    async fn concurrent_removal_surfaces_as_not_found() {
        let svc = JobDescriptionService::new(Arc::new(VanishingStore {
            inner: InMemoryJobDescriptionStore::new(),
        }));
        let created = svc.create(details("a", "b", "c")).await.unwrap();

        assert!(matches!(
            svc.update(created.id, details("x", "y", "z")).await,
            Err(ServiceError::NotFound(_))
        ));

        let again = svc.create(details("a", "b", "c")).await.unwrap();
        assert!(matches!(svc.delete(again.id).await, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn not_found_message_names_the_id() {
        assert_eq!(
            ServiceError::NotFound(JobDescriptionId::new(5)).to_string(),
            "Job description not found with id 5"
        );
    }
}
