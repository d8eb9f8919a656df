use crate::constants::{
    CHAIN_LEGACY_VERSION_FIELD, CONTENT_FIELD, ID_FIELD, MIGRATIONS_FIELD, NAME_FIELD,
    SERVICE_LEGACY_VERSION_FIELD,
};
use crate::error::RegistryError;
use crate::migration::{
    MigrationEngine, MigrationStep, PromoteToContent, StepRegistry, SynthesizeNames,
};
use crate::version::{ExplicitList, LegacyScalar, NestedContent, VersionResolver, VersionStrategy};
use anyhow::anyhow;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Artifact types with their own migration history
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    Chain,
    Service,
}

impl FamilyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyKind::Chain => "chain",
            FamilyKind::Service => "service",
        }
    }
}

impl fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FamilyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chain" => Ok(FamilyKind::Chain),
            "service" => Ok(FamilyKind::Service),
            other => Err(anyhow!(
                "Unknown document family '{}'. Expected 'chain' or 'service'",
                other
            )),
        }
    }
}

/// Names of the version-bearing fields a family recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyFields {
    /// Optional nesting container
    pub content: &'static str,
    /// Explicit list of applied versions
    pub migrations: &'static str,
    /// Legacy scalar version
    pub legacy_version: &'static str,
}

/// Strategies, steps and field names for one artifact type
#[derive(Debug)]
pub struct DocumentFamily {
    kind: FamilyKind,
    fields: FamilyFields,
    resolver: VersionResolver,
    steps: StepRegistry,
}

impl DocumentFamily {
    /// Build a family with the standard detection order: nested content list, top-level
    /// list, legacy scalar.
    pub fn new(
        kind: FamilyKind,
        fields: FamilyFields,
        steps: Vec<Box<dyn MigrationStep>>,
    ) -> Result<Self, RegistryError> {
        let resolver = VersionResolver::new(Self::default_strategies(&fields));
        Self::with_resolver(kind, fields, resolver, steps)
    }

    pub fn with_resolver(
        kind: FamilyKind,
        fields: FamilyFields,
        resolver: VersionResolver,
        steps: Vec<Box<dyn MigrationStep>>,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            kind,
            fields,
            resolver,
            steps: StepRegistry::new(steps)?,
        })
    }

    pub fn default_strategies(fields: &FamilyFields) -> Vec<Box<dyn VersionStrategy>> {
        vec![
            Box::new(NestedContent::new(
                fields.content,
                ExplicitList::new(fields.migrations),
            )),
            Box::new(ExplicitList::new(fields.migrations)),
            Box::new(LegacyScalar::new(fields.legacy_version)),
        ]
    }

    /// Built-in family for `kind`, shared process-wide
    pub fn builtin(kind: FamilyKind) -> &'static DocumentFamily {
        match kind {
            FamilyKind::Chain => &CHAIN_FAMILY,
            FamilyKind::Service => &SERVICE_FAMILY,
        }
    }

    pub fn kind(&self) -> FamilyKind {
        self.kind
    }

    pub fn fields(&self) -> &FamilyFields {
        &self.fields
    }

    pub fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    pub fn steps(&self) -> &StepRegistry {
        &self.steps
    }

    pub fn engine(&self) -> MigrationEngine<'_> {
        MigrationEngine::new(self)
    }
}

pub const CHAIN_FIELDS: FamilyFields = FamilyFields {
    content: CONTENT_FIELD,
    migrations: MIGRATIONS_FIELD,
    legacy_version: CHAIN_LEGACY_VERSION_FIELD,
};

pub const SERVICE_FIELDS: FamilyFields = FamilyFields {
    content: CONTENT_FIELD,
    migrations: MIGRATIONS_FIELD,
    legacy_version: SERVICE_LEGACY_VERSION_FIELD,
};

const IDENTITY_FIELDS: &[&str] = &[ID_FIELD, NAME_FIELD];

static CHAIN_FAMILY: Lazy<DocumentFamily> = Lazy::new(|| {
    DocumentFamily::new(FamilyKind::Chain, CHAIN_FIELDS, chain_steps())
        .expect("built-in chain migrations have unique versions")
});

static SERVICE_FAMILY: Lazy<DocumentFamily> = Lazy::new(|| {
    DocumentFamily::new(FamilyKind::Service, SERVICE_FIELDS, service_steps())
        .expect("built-in service migrations have unique versions")
});

fn chain_steps() -> Vec<Box<dyn MigrationStep>> {
    vec![
        Box::new(PromoteToContent {
            version: 101,
            keep: IDENTITY_FIELDS,
            content_field: CONTENT_FIELD,
        }),
        Box::new(SynthesizeNames {
            version: 102,
            description: "Name unnamed chain elements after their type and id",
            content_field: CONTENT_FIELD,
            collection_field: "elements",
            target: NAME_FIELD,
            sources: &["type", ID_FIELD],
            children: Some("children"),
        }),
    ]
}

fn service_steps() -> Vec<Box<dyn MigrationStep>> {
    vec![
        Box::new(PromoteToContent {
            version: 101,
            keep: IDENTITY_FIELDS,
            content_field: CONTENT_FIELD,
        }),
        Box::new(SynthesizeNames {
            version: 102,
            description: "Name unnamed operations after their id, method and path",
            content_field: CONTENT_FIELD,
            collection_field: "operations",
            target: NAME_FIELD,
            sources: &[ID_FIELD, "method", "path"],
            children: None,
        }),
    ]
}
