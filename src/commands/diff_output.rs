use console::style;
use similar::TextDiff;

/// Unified diff between the original and migrated renderings of a document
pub fn unified_diff(original: &str, migrated: &str, label: &str) -> String {
    TextDiff::from_lines(original, migrated)
        .unified_diff()
        .context_radius(3)
        .header(
            &format!("{} (original)", label),
            &format!("{} (migrated)", label),
        )
        .to_string()
}

/// Print a unified diff, colouring added and removed lines when the terminal supports it
pub fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", style(line).bold());
        } else if line.starts_with('+') {
            println!("{}", style(line).green());
        } else if line.starts_with('-') {
            println!("{}", style(line).red());
        } else if line.starts_with("@@") {
            println!("{}", style(line).cyan());
        } else {
            println!("{}", line);
        }
    }
}
