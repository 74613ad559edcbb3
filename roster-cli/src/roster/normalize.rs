//! Case and whitespace canonicalization for cell comparisons

/// Canonicalize a free-text cell value for equality checks.
///
/// Lowercases, maps non-breaking spaces and line breaks to ordinary spaces,
/// trims, and collapses every whitespace run to a single space. Used on both
/// sides of every comparison; never for values that get written back out.
pub fn normalize(value: &str) -> String {
    value
        .replace(['\u{a0}', '\n', '\r'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
