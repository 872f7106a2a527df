//! Cargo-style status lines on stderr, e.g. `   Resolving org.example:lib:1.0`.

use std::io::Write;

use console::Style;

/// Width the status label is right-aligned to.
const LABEL_WIDTH: usize = 12;

/// Print a status line with a bold green label.
pub fn status(label: &str, message: &str) {
    emit(Style::new().green().bold(), label, message);
}

/// Print a status line with a bold yellow label.
pub fn status_warn(label: &str, message: &str) {
    emit(Style::new().yellow().bold(), label, message);
}

fn emit(style: Style, label: &str, message: &str) {
    let mut stderr = std::io::stderr().lock();
    // A closed stderr must not abort a dump.
    let _ = writeln!(
        stderr,
        "{:>width$} {message}",
        style.apply_to(label),
        width = LABEL_WIDTH
    );
}
