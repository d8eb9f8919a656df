pub mod engine;
pub mod step;
pub mod steps;

pub use engine::{MigrationEngine, MigrationOutcome, MigrationPlan};
pub use step::{MigrationStep, StepRegistry};
pub use steps::{PromoteToContent, SynthesizeNames};
