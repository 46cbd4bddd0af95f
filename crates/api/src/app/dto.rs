use serde::{Deserialize, Serialize};

use jobdesk_core::DomainResult;
use jobdesk_job_descriptions::{JobDescription, JobDescriptionDetails, JobDescriptionId};

// -------------------------
// Request DTOs
// -------------------------

/// Body of create and update requests.
///
/// Fields are optional at the JSON level so that missing or `null` values are
/// reported as field errors instead of a body rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptionRequest {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub job_description: Option<String>,
}

impl JobDescriptionRequest {
    pub fn validate(self) -> DomainResult<JobDescriptionDetails> {
        Ok(JobDescriptionDetails::parse(
            self.job_title,
            self.company,
            self.job_description,
        )?)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptionResponse {
    pub id: JobDescriptionId,
    pub job_title: String,
    pub company: String,
    pub job_description: String,
}

impl From<JobDescription> for JobDescriptionResponse {
    fn from(value: JobDescription) -> Self {
        let details = value.details();
        Self {
            id: value.id(),
            job_title: details.job_title().to_string(),
            company: details.company().to_string(),
            job_description: details.job_description().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobdesk_core::DomainError;

    #[test]
    fn request_reads_camel_case_and_tolerates_missing_fields() {
        let req: JobDescriptionRequest =
            serde_json::from_str(r#"{"jobTitle":"Engineer","company":null}"#).unwrap();
        assert_eq!(req.job_title.as_deref(), Some("Engineer"));
        assert!(req.company.is_none());
        assert!(req.job_description.is_none());

        match req.validate() {
            Err(DomainError::Validation(errors)) => {
                assert!(errors.has("company"));
                assert!(errors.has("jobDescription"));
                assert!(!errors.has("jobTitle"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn response_uses_external_field_names() {
        let record = JobDescription::new(
            JobDescriptionId::new(1),
            JobDescriptionDetails::parse(
                Some("Engineer".into()),
                Some("Acme".into()),
                Some("Build things".into()),
            )
            .unwrap(),
        );

        let json = serde_json::to_value(JobDescriptionResponse::from(record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "jobTitle": "Engineer",
                "company": "Acme",
                "jobDescription": "Build things",
            })
        );
    }
}
