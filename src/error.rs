use thiserror::Error;

/// Failure of a single migration run.
///
/// Every variant aborts the run; the caller never sees a partially migrated document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    #[error("could not determine the schema version of the {family} document")]
    UnresolvedVersion { family: String },

    #[error("malformed version field `{field}` ({value}): {reason}")]
    MalformedVersionField {
        field: String,
        value: String,
        reason: String,
    },

    #[error("migration V{version} failed: {reason}")]
    StepApplication { version: u32, reason: String },
}

impl MigrationError {
    pub fn malformed(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::MalformedVersionField {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn step(version: u32, reason: impl Into<String>) -> Self {
        Self::StepApplication {
            version,
            reason: reason.into(),
        }
    }
}

/// Invalid registration of migration steps for a family
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("migration V{version} is registered more than once")]
    DuplicateVersion { version: u32 },

    #[error("migration versions must be positive")]
    ZeroVersion,
}
