use crate::document::Document;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk serialization of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Guess the format from a file extension; anything that is not `.json` is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Json => "json",
        }
    }
}

pub fn parse_document(contents: &str, format: DocumentFormat) -> Result<Document> {
    match format {
        DocumentFormat::Yaml => {
            serde_yaml::from_str(contents).context("Document is not a YAML mapping")
        }
        DocumentFormat::Json => {
            serde_json::from_str(contents).context("Document is not a JSON object")
        }
    }
}

pub fn render_document(document: &Document, format: DocumentFormat) -> Result<String> {
    match format {
        DocumentFormat::Yaml => Ok(serde_yaml::to_string(document)?),
        DocumentFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(document)?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}

/// Read and parse a document file, returning it with the format it was read as
pub fn read_document(path: &Path) -> Result<(Document, DocumentFormat)> {
    let format = DocumentFormat::from_path(path);
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if contents.trim().is_empty() {
        return Err(anyhow!("{} is empty", path.display()));
    }

    let document = parse_document(&contents, format)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok((document, format))
}

pub fn write_document(path: &Path, document: &Document, format: DocumentFormat) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let rendered = render_document(document, format)?;
    std::fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))
}
