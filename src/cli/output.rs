//! Terminal output for orgtree commands
//!
//! Status lines go through `colored`, which honors NO_COLOR and CLICOLOR.
//! Documents and trees are printed uncolored so they can be piped.

use std::fmt::Display;
use std::path::Path;

use colored::Colorize;

use crate::dnd::LevelPreview;
use crate::form::FieldErrors;

/// Red bold `error:` line on stderr.
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Yellow notice on stderr for drops that left the document unchanged.
pub fn unchanged(reason: &str) {
    eprintln!("{}: {}, document unchanged", "note".yellow(), reason);
}

/// Green check for a document without field errors.
pub fn valid(file: &Path) {
    println!("{} {}: valid", "✓".green(), file.display());
}

/// Header naming the document, then one red cross per field error in path order.
pub fn field_errors(file: &Path, errors: &FieldErrors) {
    println!("{}", format!("{}:", file.display()).cyan().bold());
    for (path, error) in errors {
        println!("  {} {}: {}", "✗".red(), path.bold(), error.message);
    }
}

/// Drop indicator projected from the pointer offset.
pub fn preview(preview: &LevelPreview) {
    let parent = preview.parent.as_deref().unwrap_or("<root>");
    println!(
        "  {} level {} under {}",
        "→".cyan(),
        preview.level,
        parent.bold()
    );
}

/// Plain output: JSON documents, rendered trees, config text.
pub fn plain(content: &(impl Display + ?Sized)) {
    println!("{}", content);
}
