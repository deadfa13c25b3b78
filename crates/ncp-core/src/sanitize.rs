//! Safe path components from remote names (release tags, asset names).

/// Turns `name` into a single path component.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Maps empty, `.` and `..` to `_`
///
/// Everything else is kept as-is so ordinary asset names stay unchanged.
pub fn path_component(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.is_empty() || out == "." || out == ".." {
        "_".to_string()
    } else {
        out
    }
}
