use crate::constants::NAME_JOIN_SEPARATOR;
use crate::document::{Document, is_blank, kind_of, non_blank_text};
use crate::error::MigrationError;
use crate::migration::step::MigrationStep;
use itertools::Itertools;
use serde_json::{Map, Value};

/// Fills in blank `target` fields of every node in a collection.
///
/// The collection is the array at `content_field.collection_field`. Each node missing a
/// usable `target` gets one built from the non-blank `sources`, in order, joined with `-`.
/// Nodes whose sources are all blank are left alone. With `children` set, nested arrays of
/// the same shape are visited too.
#[derive(Debug, Clone)]
pub struct SynthesizeNames {
    pub version: u32,
    pub description: &'static str,
    pub content_field: &'static str,
    pub collection_field: &'static str,
    pub target: &'static str,
    pub sources: &'static [&'static str],
    pub children: Option<&'static str>,
}

impl SynthesizeNames {
    fn visit_collection(&self, path: &str, nodes: &mut [Value]) -> Result<(), MigrationError> {
        for (index, node) in nodes.iter_mut().enumerate() {
            let node_path = format!("{}[{}]", path, index);
            let Value::Object(node) = node else {
                return Err(MigrationError::step(
                    self.version,
                    format!("`{}` is {}, expected an object", node_path, kind_of(node)),
                ));
            };

            self.fill_target(node);

            if let Some(children_field) = self.children {
                match node.get_mut(children_field) {
                    None | Some(Value::Null) => {}
                    Some(Value::Array(children)) => {
                        let children_path = format!("{}.{}", node_path, children_field);
                        self.visit_collection(&children_path, children)?;
                    }
                    Some(other) => {
                        return Err(MigrationError::step(
                            self.version,
                            format!(
                                "`{}.{}` is {}, expected an array",
                                node_path,
                                children_field,
                                kind_of(other)
                            ),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    fn fill_target(&self, node: &mut Map<String, Value>) {
        if !is_blank(node.get(self.target)) {
            return;
        }

        let synthesized = self
            .sources
            .iter()
            .filter_map(|field| non_blank_text(node.get(*field)))
            .join(NAME_JOIN_SEPARATOR);

        if !synthesized.is_empty() {
            node.insert(self.target.to_string(), Value::String(synthesized));
        }
    }
}

impl MigrationStep for SynthesizeNames {
    fn version(&self) -> u32 {
        self.version
    }

    fn description(&self) -> &str {
        self.description
    }

    fn apply(&self, mut document: Document) -> Result<Document, MigrationError> {
        let content = match document.get_mut(self.content_field) {
            None => return Ok(document),
            Some(Value::Object(content)) => content,
            Some(other) => {
                return Err(MigrationError::step(
                    self.version,
                    format!(
                        "`{}` is {}, expected an object",
                        self.content_field,
                        kind_of(other)
                    ),
                ));
            }
        };

        let path = format!("{}.{}", self.content_field, self.collection_field);
        match content.get_mut(self.collection_field) {
            None | Some(Value::Null) => {}
            Some(Value::Array(nodes)) => self.visit_collection(&path, nodes)?,
            Some(other) => {
                return Err(MigrationError::step(
                    self.version,
                    format!("`{}` is {}, expected an array", path, kind_of(other)),
                ));
            }
        }

        Ok(document)
    }
}
