use crate::error::MigrationError;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;

/// Migration versions a document already reflects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatisfiedVersions {
    /// Exactly these versions, gaps allowed
    Explicit(BTreeSet<u32>),
    /// Legacy scalar marker `N`, meaning every version in `1..=N`
    UpTo(u32),
}

impl SatisfiedVersions {
    pub fn none() -> Self {
        Self::Explicit(BTreeSet::new())
    }

    pub fn contains(&self, version: u32) -> bool {
        match self {
            Self::Explicit(versions) => versions.contains(&version),
            Self::UpTo(max) => version >= 1 && version <= *max,
        }
    }

    /// The set to record after `applied` ran.
    ///
    /// An explicit set is kept whole, including versions this build does not know about.
    /// A legacy range only contributes the registered versions it covers, so a document
    /// stamped `version: 100` does not turn into a hundred-entry list.
    pub fn recorded_with(&self, registered: &[u32], applied: &[u32]) -> BTreeSet<u32> {
        let mut recorded: BTreeSet<u32> = match self {
            Self::Explicit(versions) => versions.clone(),
            Self::UpTo(_) => registered
                .iter()
                .copied()
                .filter(|v| self.contains(*v))
                .collect(),
        };
        recorded.extend(applied.iter().copied());
        recorded
    }
}

impl fmt::Display for SatisfiedVersions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(versions) => write!(f, "{}", format_version_list(versions.iter())),
            Self::UpTo(0) => write!(f, "none (legacy version 0)"),
            Self::UpTo(max) => write!(f, "1..={} (legacy version {})", max, max),
        }
    }
}

/// Parse a bracketed, comma-separated version list such as `"[1, 2, 5]"`.
///
/// Empty entries are skipped; anything else that is not a non-negative integer fails the
/// whole field rather than being dropped.
pub fn parse_version_list(field: &str, raw: &str) -> Result<BTreeSet<u32>, MigrationError> {
    let trimmed = raw.trim();
    let inner = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u32>().map_err(|_| {
                MigrationError::malformed(
                    field,
                    format!("{:?}", raw),
                    format!("`{}` is not a non-negative integer", token),
                )
            })
        })
        .collect()
}

/// Render versions in the same bracketed form `parse_version_list` reads
pub fn format_version_list<'a>(versions: impl IntoIterator<Item = &'a u32>) -> String {
    format!("[{}]", versions.into_iter().join(", "))
}
