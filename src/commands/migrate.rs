use crate::commands::diff_output::{print_diff, unified_diff};
use crate::config::Config;
use crate::document::Document;
use crate::family::DocumentFamily;
use crate::loader::{DocumentFormat, read_document, render_document, write_document};
use crate::migration::MigrationOutcome;
use crate::version::format_version_list;
use anyhow::{Context, Result, anyhow, bail};
use console::style;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Expand CLI path arguments, treating each one as a glob pattern.
///
/// A pattern that matches nothing is kept as a literal path if it exists, so file names
/// containing glob metacharacters still work.
pub fn expand_paths(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        let mut matched = false;
        let entries = glob::glob(pattern)
            .with_context(|| format!("Invalid path pattern '{}'", pattern))?;
        for entry in entries {
            let path = entry?;
            if path.is_file() {
                paths.push(path);
                matched = true;
            }
        }

        if !matched {
            let literal = PathBuf::from(pattern);
            if literal.is_file() {
                paths.push(literal);
            } else {
                bail!("No documents match '{}'", pattern);
            }
        }
    }

    Ok(paths.into_iter().unique().collect())
}

/// Where a migrated document goes when it is written to disk.
///
/// The file name is kept, swapping the extension only when the output format differs from
/// the one the document was read in.
pub fn output_path(
    input: &Path,
    output_dir: Option<&Path>,
    input_format: DocumentFormat,
    output_format: DocumentFormat,
) -> PathBuf {
    let renamed = if input_format == output_format {
        input.to_path_buf()
    } else {
        input.with_extension(output_format.extension())
    };

    match output_dir {
        Some(dir) => match renamed.file_name() {
            Some(name) => dir.join(name),
            None => dir.join(renamed),
        },
        None => renamed,
    }
}

/// Migrate every matched document with the configured family
pub fn cmd_migrate(config: &Config, patterns: &[String], dry_run: bool) -> Result<()> {
    let paths = expand_paths(patterns)?;
    let writes_files = config.output.in_place || config.output.dir.is_some();

    if !dry_run && !writes_files && paths.len() > 1 {
        return Err(anyhow!(
            "{} documents matched. Use --output-dir or --in-place to migrate more than one document",
            paths.len()
        ));
    }

    // In-place output must land on the input file itself
    if config.output.in_place
        && let Some(path) = paths.iter().find(|path| {
            let input_format = DocumentFormat::from_path(path);
            config.output.format.resolve(input_format) != input_format
        })
    {
        bail!(
            "Cannot convert {} to {} in place. Drop --format or use --output-dir",
            path.display(),
            config
                .output
                .format
                .resolve(DocumentFormat::from_path(path))
                .extension()
        );
    }

    let family = DocumentFamily::builtin(config.migration.family);
    let mut migrated_count = 0;

    for path in &paths {
        let (document, input_format) = read_document(path)?;
        let output_format = config.output.format.resolve(input_format);

        let outcome = migrate_document(config, family, path, document.clone())?;
        report_outcome(path, &outcome);

        if outcome.changed() {
            migrated_count += 1;
        }

        let rendered = render_document(&outcome.document, output_format)?;

        if dry_run {
            if outcome.changed() {
                let original = render_document(&document, output_format)?;
                print_diff(&unified_diff(
                    &original,
                    &rendered,
                    &path.display().to_string(),
                ));
            }
            continue;
        }

        if writes_files {
            let target = output_path(
                path,
                config.output.dir.as_deref(),
                input_format,
                output_format,
            );
            // Untouched documents are only rewritten when they land somewhere new
            if outcome.changed() || target != *path {
                write_document(&target, &outcome.document, output_format)?;
                debug!("Wrote {}", target.display());
            }
        } else {
            print!("{}", rendered);
        }
    }

    eprintln!(
        "{} {} of {} document(s) {}",
        style("✓").green(),
        migrated_count,
        paths.len(),
        if dry_run { "would be migrated" } else { "migrated" }
    );

    Ok(())
}

fn migrate_document(
    config: &Config,
    family: &DocumentFamily,
    path: &Path,
    document: Document,
) -> Result<MigrationOutcome> {
    let engine = family.engine();

    if config.migration.reject_unknown_versions {
        let plan = engine
            .plan(&document)
            .with_context(|| format!("Failed to migrate {}", path.display()))?;
        if !plan.unknown.is_empty() {
            bail!(
                "{} records migrations {} that this build does not know. Refusing to migrate a document from a newer schema",
                path.display(),
                format_version_list(plan.unknown.iter())
            );
        }
    }

    engine
        .migrate(document)
        .with_context(|| format!("Failed to migrate {}", path.display()))
}

fn report_outcome(path: &Path, outcome: &MigrationOutcome) {
    if outcome.changed() {
        eprintln!(
            "{} {}: applied {}",
            style("→").cyan(),
            path.display(),
            outcome.applied.iter().map(|v| format!("V{}", v)).join(", ")
        );
    } else {
        eprintln!(
            "{} {}: already up to date",
            style("·").dim(),
            path.display()
        );
    }
}
