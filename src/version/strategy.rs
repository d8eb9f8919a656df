use crate::document::kind_of;
use crate::error::MigrationError;
use crate::version::satisfied::{SatisfiedVersions, parse_version_list};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// One way of reading the satisfied version set out of a document.
///
/// `Ok(None)` means the strategy abstains: the document simply does not carry the marker
/// this strategy understands. An `Err` means the marker is there but broken.
pub trait VersionStrategy: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn attempt(
        &self,
        object: &Map<String, Value>,
    ) -> Result<Option<SatisfiedVersions>, MigrationError>;
}

/// Delegates to `inner` on the object stored under `field`
#[derive(Debug)]
pub struct NestedContent {
    pub field: &'static str,
    pub inner: Box<dyn VersionStrategy>,
}

impl NestedContent {
    pub fn new(field: &'static str, inner: impl VersionStrategy + 'static) -> Self {
        Self {
            field,
            inner: Box::new(inner),
        }
    }
}

impl VersionStrategy for NestedContent {
    fn name(&self) -> &'static str {
        "nested-content"
    }

    fn attempt(
        &self,
        object: &Map<String, Value>,
    ) -> Result<Option<SatisfiedVersions>, MigrationError> {
        match object.get(self.field) {
            Some(Value::Object(nested)) => self.inner.attempt(nested),
            _ => Ok(None),
        }
    }
}

/// Reads an explicit list of applied versions
#[derive(Debug)]
pub struct ExplicitList {
    pub field: &'static str,
}

impl ExplicitList {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }

    fn parse_array(&self, items: &[Value]) -> Result<BTreeSet<u32>, MigrationError> {
        items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| {
                        MigrationError::malformed(
                            self.field,
                            Value::Array(items.to_vec()),
                            format!("{} is not a non-negative integer", item),
                        )
                    })
            })
            .collect()
    }
}

impl VersionStrategy for ExplicitList {
    fn name(&self) -> &'static str {
        "explicit-list"
    }

    fn attempt(
        &self,
        object: &Map<String, Value>,
    ) -> Result<Option<SatisfiedVersions>, MigrationError> {
        let versions = match object.get(self.field) {
            None => return Ok(None),
            Some(Value::Null) => BTreeSet::new(),
            Some(Value::String(raw)) => parse_version_list(self.field, raw)?,
            Some(Value::Array(items)) => self.parse_array(items)?,
            Some(other) => {
                return Err(MigrationError::malformed(
                    self.field,
                    other,
                    format!("expected a version list, found {}", kind_of(other)),
                ));
            }
        };

        Ok(Some(SatisfiedVersions::Explicit(versions)))
    }
}

/// Reads a legacy scalar version `N`, meaning versions `1..=N` are applied
#[derive(Debug)]
pub struct LegacyScalar {
    pub field: &'static str,
}

impl LegacyScalar {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl VersionStrategy for LegacyScalar {
    fn name(&self) -> &'static str {
        "legacy-scalar"
    }

    fn attempt(
        &self,
        object: &Map<String, Value>,
    ) -> Result<Option<SatisfiedVersions>, MigrationError> {
        match object.get(self.field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(|max| Some(SatisfiedVersions::UpTo(max)))
                .ok_or_else(|| {
                    MigrationError::malformed(
                        self.field,
                        value,
                        format!("expected a non-negative integer, found {}", kind_of(value)),
                    )
                }),
        }
    }
}
