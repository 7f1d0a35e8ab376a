use regex::Regex;
use std::sync::OnceLock;

fn marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"[0-9]+\.").expect("static pattern"))
}

/// Splits advice text into its numbered entries.
///
/// An entry starts at every digit run followed by a period and runs up to
/// the next such marker. Entries are trimmed and empty ones dropped. Text
/// before the first marker is not an entry, so input without any marker
/// yields nothing.
///
/// `"1. Do this. 2. Do that."` gives `["1. Do this.", "2. Do that."]`.
pub fn split_numbered(text: &str) -> Vec<String> {
    let starts: Vec<usize> = marker().find_iter(text).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            text[start..end].trim()
        })
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
