use crate::config::Config;
use crate::family::DocumentFamily;
use anyhow::Result;
use console::style;

/// List the migrations registered for the configured family
pub fn cmd_steps(config: &Config) -> Result<()> {
    let family = DocumentFamily::builtin(config.migration.family);
    let fields = family.fields();

    println!(
        "{} {} document migrations",
        style("📋").bold(),
        style(family.kind()).bold()
    );
    println!(
        "   Version markers: {}.{} (list), {} (list), {} (legacy)",
        fields.content, fields.migrations, fields.migrations, fields.legacy_version
    );

    if family.steps().is_empty() {
        println!("No migrations registered");
        return Ok(());
    }

    for step in family.steps().iter() {
        println!(
            "  {}  {}",
            style(format!("V{}", step.version())).cyan(),
            step.description()
        );
    }

    Ok(())
}
