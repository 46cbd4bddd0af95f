use core::str::FromStr;

use serde::{Deserialize, Serialize};

use jobdesk_core::{validation, DomainError, ValidationErrors};

/// Maximum length of `jobTitle`, in characters.
pub const JOB_TITLE_MAX_CHARS: usize = 255;

/// Maximum length of `company`, in characters.
pub const COMPANY_MAX_CHARS: usize = 255;

/// Store-assigned identifier of a job description.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobDescriptionId(i64);

impl JobDescriptionId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for JobDescriptionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for JobDescriptionId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for JobDescriptionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("JobDescriptionId: {e}")))
    }
}

/// The three text fields of a job description, known to satisfy the input rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptionDetails {
    job_title: String,
    company: String,
    job_description: String,
}

impl JobDescriptionDetails {
    /// Validate raw input and build the details.
    ///
    /// Missing values are treated as blank. All failing fields are reported,
    /// in field order. Values are kept exactly as given (no trimming).
    pub fn parse(
        job_title: Option<String>,
        company: Option<String>,
        job_description: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if validation::is_blank(job_title.as_deref()) {
            errors.push("jobTitle", "Job title is required");
        } else if job_title
            .as_deref()
            .is_some_and(|v| validation::exceeds_max_chars(v, JOB_TITLE_MAX_CHARS))
        {
            errors.push(
                "jobTitle",
                format!("Job title must be at most {JOB_TITLE_MAX_CHARS} characters"),
            );
        }

        if validation::is_blank(company.as_deref()) {
            errors.push("company", "Company is required");
        } else if company
            .as_deref()
            .is_some_and(|v| validation::exceeds_max_chars(v, COMPANY_MAX_CHARS))
        {
            errors.push(
                "company",
                format!("Company must be at most {COMPANY_MAX_CHARS} characters"),
            );
        }

        if validation::is_blank(job_description.as_deref()) {
            errors.push("jobDescription", "Job description text is required");
        }

        errors.into_result(Self {
            job_title: job_title.unwrap_or_default(),
            company: company.unwrap_or_default(),
            job_description: job_description.unwrap_or_default(),
        })
    }

    /// Rebuild details from a stored row. Rows were validated when written.
    pub fn from_stored(job_title: String, company: String, job_description: String) -> Self {
        Self {
            job_title,
            company,
            job_description,
        }
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}

/// A record handed to the store: without id it is inserted, with id it overwrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptionRecord {
    pub id: Option<JobDescriptionId>,
    pub details: JobDescriptionDetails,
}

impl JobDescriptionRecord {
    /// A record that has never been persisted.
    pub fn new(details: JobDescriptionDetails) -> Self {
        Self { id: None, details }
    }
}

/// A persisted job description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescription {
    id: JobDescriptionId,
    details: JobDescriptionDetails,
}

impl JobDescription {
    pub fn new(id: JobDescriptionId, details: JobDescriptionDetails) -> Self {
        Self { id, details }
    }

    pub fn id(&self) -> JobDescriptionId {
        self.id
    }

    pub fn details(&self) -> &JobDescriptionDetails {
        &self.details
    }

    /// Same identity, all three text fields replaced.
    pub fn with_details(self, details: JobDescriptionDetails) -> Self {
        Self { id: self.id, details }
    }
}

impl From<JobDescription> for JobDescriptionRecord {
    fn from(value: JobDescription) -> Self {
        Self {
            id: Some(value.id),
            details: value.details,
        }
    }
}
