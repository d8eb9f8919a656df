use crate::document::Document;
use crate::error::MigrationError;
use crate::version::satisfied::SatisfiedVersions;
use crate::version::strategy::VersionStrategy;
use tracing::debug;

/// Satisfied versions plus the strategy that found them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub strategy: &'static str,
    pub satisfied: SatisfiedVersions,
}

/// Ordered chain of detection strategies; the first one that does not abstain wins
#[derive(Debug)]
pub struct VersionResolver {
    strategies: Vec<Box<dyn VersionStrategy>>,
}

impl VersionResolver {
    pub fn new(strategies: Vec<Box<dyn VersionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> impl Iterator<Item = &dyn VersionStrategy> {
        self.strategies.iter().map(|s| s.as_ref())
    }

    /// Resolve the satisfied version set of `document`.
    ///
    /// A strategy error stops the chain immediately; lower-priority strategies are never
    /// consulted once a marker turned out to be broken.
    pub fn resolve(&self, family: &str, document: &Document) -> Result<Resolution, MigrationError> {
        for strategy in &self.strategies {
            if let Some(satisfied) = strategy.attempt(document.as_map())? {
                debug!(
                    "{} document resolved by {} strategy: {}",
                    family,
                    strategy.name(),
                    satisfied
                );
                return Ok(Resolution {
                    strategy: strategy.name(),
                    satisfied,
                });
            }
            debug!("{} strategy abstained", strategy.name());
        }

        Err(MigrationError::UnresolvedVersion {
            family: family.to_string(),
        })
    }
}
