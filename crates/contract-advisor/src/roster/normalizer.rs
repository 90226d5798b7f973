/// Display form of a name: invisible characters removed and whitespace collapsed.
pub fn clean_display_name(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical form used to match player names across exports and user input.
pub fn normalize_name(value: &str) -> String {
    clean_display_name(value).to_lowercase()
}
