//! Named deck lists.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// A named, ordered list of cards. Repetition encodes quantity.
///
/// Backed by a persistent vector so the transformer can take a working copy
/// in O(1) and filter it without touching the caller's deck.
///
/// ```
/// use tts_deck::cards::Card;
/// use tts_deck::deck::Deck;
///
/// let deck = Deck::new("Elves").with_card(Card::new("e", "Llanowar Elves"), 4);
/// assert_eq!(deck.len(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    pub cards: Vector<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vector::new(),
        }
    }

    /// Add `quantity` copies of `card` (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: Card, quantity: usize) -> Self {
        self.add(card, quantity);
        self
    }

    /// Add `quantity` copies of `card`.
    pub fn add(&mut self, card: Card, quantity: usize) {
        for _ in 0..quantity {
            self.cards.push_back(card.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
