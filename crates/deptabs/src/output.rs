//! Terminal reporting for the transform command.

use std::path::Path;

use console::{Style, Term};

/// Writes progress and results to stderr.
pub(crate) struct Output {
    term: Term,
    dim: Style,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            dim: Style::new().dim(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Report a page with transformed listings.
    pub(crate) fn page(&self, page: &Path, transformed: usize) {
        let _ = self.term.write_line(&format!(
            "{} {}",
            page.display(),
            self.dim.apply_to(format!("({transformed} dependency block(s))"))
        ));
    }

    /// Final one-line summary (green).
    pub(crate) fn summary(&self, dry_run: bool, transformed: usize, changed: usize, total: usize) {
        let verb = if dry_run { "Would transform" } else { "Transformed" };
        let msg =
            format!("{verb} {transformed} dependency block(s) in {changed} of {total} page(s)");
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
