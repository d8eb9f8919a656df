use crate::config::Config;
use crate::family::DocumentFamily;
use crate::loader::read_document;
use crate::version::format_version_list;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Report the satisfied and outstanding migrations of a document without changing it
pub fn cmd_detect(config: &Config, path: &Path) -> Result<()> {
    let family = DocumentFamily::builtin(config.migration.family);
    let (document, format) = read_document(path)?;

    let plan = family
        .engine()
        .plan(&document)
        .with_context(|| format!("Failed to detect the version of {}", path.display()))?;

    println!("Document:    {} ({})", path.display(), format.extension());
    println!("Family:      {}", family.kind());
    println!("Detected by: {} strategy", plan.resolution.strategy);
    println!("Satisfied:   {}", plan.resolution.satisfied);

    if !plan.unknown.is_empty() {
        println!(
            "{} Unknown:     {} (newer than this build)",
            style("⚠").yellow(),
            format_version_list(plan.unknown.iter())
        );
    }

    if plan.is_current() {
        println!("{} Document is up to date", style("✓").green());
        return Ok(());
    }

    println!("Outstanding:");
    for version in &plan.outstanding {
        let description = family
            .steps()
            .get(*version)
            .map(|step| step.description())
            .unwrap_or_default();
        println!("  {}  {}", style(format!("V{}", version)).cyan(), description);
    }

    Ok(())
}
