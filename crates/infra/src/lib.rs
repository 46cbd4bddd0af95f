//! Infrastructure layer: storage adapters and configuration.

pub mod config;
pub mod store;

pub use config::Settings;
pub use store::{
    InMemoryJobDescriptionStore, JobDescriptionStore, PostgresJobDescriptionStore, StoreError,
};
