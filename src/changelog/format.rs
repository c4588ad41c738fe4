//! Markdown formatting for a release section.

use std::fmt::Write;

/// Render the changelog section for one release.
///
/// A `## {tag}` header, a blank line, then one bullet per change in input order.
pub fn render<S: AsRef<str>>(tag: &str, changes: &[S]) -> String {
    let mut section = format!("## {}\n\n", tag);

    for change in changes {
        let _ = writeln!(section, "- {}", change.as_ref());
    }

    section
}
