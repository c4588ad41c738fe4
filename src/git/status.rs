//! Parsing of `git status --porcelain -z` output.

/// Extract the changed paths from NUL-separated porcelain v1 output.
///
/// Each entry is `XY <path>` terminated by NUL, with the path verbatim
/// (no quoting or escaping). Renames and copies are followed by an extra
/// field holding the source path, which is skipped so only the destination
/// is reported.
pub fn parse_porcelain(output: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut fields = output.split('\0');

    while let Some(entry) = fields.next() {
        let Some(path) = entry.get(3..) else {
            continue;
        };

        let status = entry.get(..2).unwrap_or_default();
        if status.contains(['R', 'C']) {
            fields.next();
        }

        if !path.is_empty() {
            paths.push(path.to_string());
        }
    }

    paths
}
