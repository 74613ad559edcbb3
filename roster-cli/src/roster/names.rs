//! Splitting a single "driver name" cell into first and last name

/// Split a full name into `(first, last)`.
///
/// Accepts "Last, First" and "First [Middle...] Last". Middle tokens are
/// dropped. Blank or single-token input yields a pair of empty strings. A name
/// with more than one comma falls back to whitespace splitting.
pub fn split_name(full: &str) -> (String, String) {
    let full = full.trim();
    if full.is_empty() {
        return (String::new(), String::new());
    }

    if full.contains(',') {
        let parts: Vec<&str> = full.split(',').collect();
        if let [last, first] = parts.as_slice() {
            return (first.trim().to_string(), last.trim().to_string());
        }
    }

    match full.split_whitespace().collect::<Vec<_>>().as_slice() {
        [first, .., last] => (first.to_string(), last.to_string()),
        _ => (String::new(), String::new()),
    }
}
