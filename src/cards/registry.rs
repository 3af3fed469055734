//! Unique-card registry for one id space.
//!
//! The `CardRegistry` assigns slot ids densely in first-seen order and keeps
//! the card record for each slot, so sheets can be rendered from it and the
//! scene document can resolve ids back to names.

use rustc_hash::FxHashMap;

use super::card::Card;
use crate::core::ids::SlotId;

/// Registry of unique cards in one id space.
///
/// ## Example
///
/// ```
/// use tts_deck::cards::{Card, CardRegistry};
///
/// let mut registry = CardRegistry::new();
///
/// let bolt = registry.register(&Card::new("b1", "Lightning Bolt"));
/// let again = registry.register(&Card::new("b1", "Lightning Bolt"));
///
/// assert_eq!(bolt.raw(), 100);
/// assert_eq!(bolt, again);
/// assert_eq!(registry.get(bolt).unwrap().name, "Lightning Bolt");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    /// Catalog id -> slot.
    slots: FxHashMap<String, SlotId>,

    /// Cards in allocation order; position n holds `SlotId::from_index(n)`.
    cards: Vec<Card>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the card's slot, allocating the next one on first sight.
    pub fn register(&mut self, card: &Card) -> SlotId {
        if let Some(&slot) = self.slots.get(&card.id) {
            return slot;
        }
        let slot = SlotId::from_index(self.cards.len());
        self.slots.insert(card.id.clone(), slot);
        self.cards.push(card.clone());
        slot
    }

    /// Card registered under a slot.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&Card> {
        if !slot.is_valid() {
            return None;
        }
        self.cards.get(slot.index())
    }

    /// Number of unique cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate `(slot, card)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| (SlotId::from_index(i), card))
    }
}
