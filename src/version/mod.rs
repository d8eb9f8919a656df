pub mod resolver;
pub mod satisfied;
pub mod strategy;

pub use resolver::{Resolution, VersionResolver};
pub use satisfied::{SatisfiedVersions, format_version_list, parse_version_list};
pub use strategy::{ExplicitList, LegacyScalar, NestedContent, VersionStrategy};
