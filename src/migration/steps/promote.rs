use crate::document::Document;
use crate::error::MigrationError;
use crate::migration::step::MigrationStep;
use serde_json::{Map, Value};

/// Moves every root field except `keep` into a new nested content object.
///
/// The set of moved fields is open-ended, so the root is rebuilt rather than edited:
/// kept fields first in `keep` order, then the content object holding the rest in their
/// original order.
#[derive(Debug, Clone)]
pub struct PromoteToContent {
    pub version: u32,
    pub keep: &'static [&'static str],
    pub content_field: &'static str,
}

impl MigrationStep for PromoteToContent {
    fn version(&self) -> u32 {
        self.version
    }

    fn description(&self) -> &str {
        "Move document body under a nested content object"
    }

    fn apply(&self, document: Document) -> Result<Document, MigrationError> {
        let mut kept = Map::new();
        let mut content = Map::new();

        for (key, value) in document.into_map() {
            if self.keep.contains(&key.as_str()) {
                kept.insert(key, value);
            } else {
                content.insert(key, value);
            }
        }

        let mut root = Map::new();
        for field in self.keep {
            if let Some(value) = kept.shift_remove(*field) {
                root.insert((*field).to_string(), value);
            }
        }
        root.insert(self.content_field.to_string(), Value::Object(content));

        Ok(Document::from(root))
    }
}
