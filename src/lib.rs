pub mod commands;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod family;
pub mod loader;
pub mod migration;
pub mod version;

pub use document::Document;
pub use error::{MigrationError, RegistryError};
pub use family::{DocumentFamily, FamilyFields, FamilyKind};
pub use migration::{MigrationEngine, MigrationOutcome, MigrationPlan};
pub use version::SatisfiedVersions;
