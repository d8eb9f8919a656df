use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            migration: match (self.migration, other.migration) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            output: match (self.output, other.output) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
        }
    }
}

// Custom merge implementations for complex types
impl MigrationInput {
    pub fn merge_with(self, other: MigrationInput) -> MigrationInput {
        MigrationInput {
            family: self.family.merge(other.family),
            reject_unknown_versions: self
                .reject_unknown_versions
                .merge(other.reject_unknown_versions),
        }
    }
}

impl OutputInput {
    pub fn merge_with(self, other: OutputInput) -> OutputInput {
        OutputInput {
            format: self.format.merge(other.format),
            dir: self.dir.merge(other.dir),
            in_place: self.in_place.merge(other.in_place),
        }
    }
}
