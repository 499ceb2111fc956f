use std::collections::HashSet;

/// Trims a header cell, drops a byte-order mark and collapses inner
/// whitespace runs to one space.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a header row and makes every name unique.
///
/// Empty names become `Unnamed: {index}` (0-based). Repeats get `.1`, `.2`, ...
/// in order of appearance.
pub fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(index, cell)| {
            let mut name = normalize_header(cell.as_ref());
            if name.is_empty() {
                name = format!("Unnamed: {index}");
            }
            if seen.contains(&name) {
                let base = name;
                let mut suffix = 1;
                name = format!("{base}.{suffix}");
                while seen.contains(&name) {
                    suffix += 1;
                    name = format!("{base}.{suffix}");
                }
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}
