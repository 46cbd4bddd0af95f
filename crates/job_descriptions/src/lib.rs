//! Job descriptions domain module.
//!
//! This crate contains the job description record and its input rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod job_description;

pub use job_description::{
    JobDescription, JobDescriptionDetails, JobDescriptionId, JobDescriptionRecord,
    COMPANY_MAX_CHARS, JOB_TITLE_MAX_CHARS,
};
