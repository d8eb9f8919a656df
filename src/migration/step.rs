use crate::document::Document;
use crate::error::{MigrationError, RegistryError};
use crate::version::SatisfiedVersions;
use std::collections::BTreeMap;

/// A single version-tagged document transformation.
///
/// Implementations are pure: the output depends only on the input document, and a step
/// never assumes fields introduced by later versions exist.
pub trait MigrationStep: Send + Sync {
    fn version(&self) -> u32;

    fn description(&self) -> &str;

    fn apply(&self, document: Document) -> Result<Document, MigrationError>;
}

/// Steps of one document family, ordered by version
pub struct StepRegistry {
    steps: BTreeMap<u32, Box<dyn MigrationStep>>,
}

impl StepRegistry {
    pub fn new(steps: Vec<Box<dyn MigrationStep>>) -> Result<Self, RegistryError> {
        let mut registry = BTreeMap::new();

        for step in steps {
            let version = step.version();
            if version == 0 {
                return Err(RegistryError::ZeroVersion);
            }
            if registry.insert(version, step).is_some() {
                return Err(RegistryError::DuplicateVersion { version });
            }
        }

        Ok(Self { steps: registry })
    }

    pub fn versions(&self) -> Vec<u32> {
        self.steps.keys().copied().collect()
    }

    pub fn latest(&self) -> Option<u32> {
        self.steps.keys().next_back().copied()
    }

    pub fn get(&self, version: u32) -> Option<&dyn MigrationStep> {
        self.steps.get(&version).map(|s| s.as_ref())
    }

    /// All steps in ascending version order
    pub fn iter(&self) -> impl Iterator<Item = &dyn MigrationStep> {
        self.steps.values().map(|s| s.as_ref())
    }

    /// Steps not covered by `satisfied`, in the order they must run
    pub fn outstanding(&self, satisfied: &SatisfiedVersions) -> Vec<&dyn MigrationStep> {
        self.iter()
            .filter(|step| !satisfied.contains(step.version()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl std::fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepRegistry")
            .field("versions", &self.versions())
            .finish()
    }
}
