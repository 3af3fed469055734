//! Plain-text decklists.
//!
//! One entry per line: `4 Lightning Bolt`, `4x Lightning Bolt`, or a bare
//! name meaning one copy. Blank lines and lines starting with `#` or `//`
//! are skipped.

use tracing::debug;

use super::deck::Deck;
use crate::core::error::{DeckError, Result};
use crate::services::CardCatalog;

/// One parsed decklist line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecklistEntry {
    pub quantity: usize,
    pub name: String,
}

/// Parse decklist text into entries, in order.
pub fn parse_decklist(text: &str) -> Result<Vec<DecklistEntry>> {
    let mut entries = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        entries.push(parse_line(line).ok_or_else(|| DeckError::Decklist {
            line: i + 1,
            text: raw.to_string(),
        })?);
    }
    Ok(entries)
}

fn parse_line(line: &str) -> Option<DecklistEntry> {
    let (first, rest) = match line.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (line, ""),
    };
    let count = first.strip_suffix(|c: char| c == 'x' || c == 'X').unwrap_or(first);

    if !count.is_empty() && count.bytes().all(|b| b.is_ascii_digit()) {
        let quantity = count.parse().ok()?;
        if rest.is_empty() || quantity == 0 {
            return None;
        }
        return Some(DecklistEntry {
            quantity,
            name: rest.to_string(),
        });
    }

    Some(DecklistEntry {
        quantity: 1,
        name: line.to_string(),
    })
}

/// Fetch every entry from the catalog and build a deck.
pub fn resolve_deck<C: CardCatalog>(
    name: impl Into<String>,
    entries: &[DecklistEntry],
    catalog: &mut C,
) -> Result<Deck> {
    let mut deck = Deck::new(name);
    for entry in entries {
        let card = catalog.get_card(&entry.name, None)?;
        debug!(card = %card.name, quantity = entry.quantity, "resolved decklist entry");
        deck.add(card, entry.quantity);
    }
    Ok(deck)
}
