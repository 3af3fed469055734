//! File names derived from deck names.

/// Deck name made safe to use as a single path component.
///
/// Path separators, characters rejected by common filesystems and control
/// characters become `_`. Names that would still not name a file (empty,
/// `.`, `..`) become `deck`.
///
/// ```
/// use tts_deck::core::naming::file_stem;
///
/// assert_eq!(file_stem("Elves"), "Elves");
/// assert_eq!(file_stem("Izzet/Spells: v2"), "Izzet_Spells_ v2");
/// assert_eq!(file_stem(".."), "deck");
/// ```
#[must_use]
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        return "deck".to_string();
    }
    stem.to_string()
}
