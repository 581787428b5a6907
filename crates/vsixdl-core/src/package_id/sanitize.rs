//! Filesystem-safe stem for the downloaded `.vsix`.

/// Linux NAME_MAX minus room for the `.vsix` suffix.
const MAX_STEM_BYTES: usize = 255 - ".vsix".len();

/// Makes an extension name safe to use as a file stem in the current directory.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Trims leading/trailing whitespace and dots (no `..`, no hidden files)
/// - Truncates on a char boundary to fit NAME_MAX once `.vsix` is appended
///
/// Ordinary marketplace names (`python`, `vscode-eslint`, `cpptools`) pass
/// through untouched.
pub fn sanitize_stem(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');

    let mut take = trimmed.len().min(MAX_STEM_BYTES);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
