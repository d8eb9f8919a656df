use crate::family::FamilyKind;
use crate::loader::DocumentFormat;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigInput {
    pub migration: Option<MigrationInput>,
    pub output: Option<OutputInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub migration: Migration,
    pub output: Output,
}

// Migration configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationInput {
    pub family: Option<FamilyKind>,
    pub reject_unknown_versions: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Migration {
    pub family: FamilyKind,
    /// Fail instead of warning when a document records versions this build does not know
    pub reject_unknown_versions: bool,
}

// Output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputInput {
    pub format: Option<OutputFormat>,
    pub dir: Option<String>,
    pub in_place: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct Output {
    pub format: OutputFormat,
    pub dir: Option<PathBuf>,
    pub in_place: bool,
}

/// Serialization used when writing migrated documents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Same format the document was read in
    #[default]
    Auto,
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn resolve(&self, input: DocumentFormat) -> DocumentFormat {
        match self {
            OutputFormat::Auto => input,
            OutputFormat::Yaml => DocumentFormat::Yaml,
            OutputFormat::Json => DocumentFormat::Json,
        }
    }
}

// CLI argument groups for command-specific options
#[derive(Debug, Clone, Default, Args)]
pub struct FamilyArgs {
    #[arg(long, value_enum, help = "Document family (chain or service)")]
    pub family: Option<FamilyKind>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    #[arg(long, value_enum, help = "Output format (defaults to the input format)")]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Directory to write migrated documents into")]
    pub output_dir: Option<String>,

    #[arg(long, help = "Overwrite input files with their migrated form")]
    pub in_place: bool,
}

impl From<FamilyArgs> for MigrationInput {
    fn from(args: FamilyArgs) -> Self {
        Self {
            family: args.family,
            reject_unknown_versions: None, // File only
        }
    }
}

impl From<OutputArgs> for OutputInput {
    fn from(args: OutputArgs) -> Self {
        Self {
            format: args.format,
            dir: args.output_dir,
            // Absent flag must not override a config file setting
            in_place: args.in_place.then_some(true),
        }
    }
}
