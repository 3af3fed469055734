//! Identifier allocation across both id spaces.

use crate::cards::{Card, CardRegistry};
use crate::core::error::{DeckError, Result};
use crate::core::ids::{CardKey, IdSpace, SlotId};

/// State for one conversion run: both id spaces and their registries.
///
/// Construct one per run and pass it to every stage. Ids handed out by a
/// session are stable for its lifetime and never reclaimed; a fresh session
/// starts again at 100 in both spaces.
///
/// ```
/// use tts_deck::cards::{Card, Layout};
/// use tts_deck::core::IdSpace;
/// use tts_deck::session::ConversionSession;
///
/// let mut session = ConversionSession::new();
/// let forest = Card::new("f", "Forest");
/// let delver = Card::new("d", "Delver of Secrets").with_layout(Layout::Transform);
///
/// assert_eq!(session.allocate(IdSpace::Simple, &forest).raw(), 100);
/// assert_eq!(session.allocate(IdSpace::DoubleFaced, &delver).raw(), 100);
/// assert_eq!(session.allocate(IdSpace::Simple, &forest).raw(), 100);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConversionSession {
    simple: CardRegistry,
    double_faced: CardRegistry,
}

impl ConversionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `card` in `space`, allocating the next one if it is new there.
    pub fn allocate(&mut self, space: IdSpace, card: &Card) -> SlotId {
        self.registry_mut(space).register(card)
    }

    /// Allocate and qualify with the space.
    pub fn allocate_key(&mut self, space: IdSpace, card: &Card) -> CardKey {
        CardKey::new(space, self.allocate(space, card))
    }

    #[must_use]
    pub fn registry(&self, space: IdSpace) -> &CardRegistry {
        match space {
            IdSpace::Simple => &self.simple,
            IdSpace::DoubleFaced => &self.double_faced,
        }
    }

    fn registry_mut(&mut self, space: IdSpace) -> &mut CardRegistry {
        match space {
            IdSpace::Simple => &mut self.simple,
            IdSpace::DoubleFaced => &mut self.double_faced,
        }
    }

    #[must_use]
    pub fn simple(&self) -> &CardRegistry {
        &self.simple
    }

    #[must_use]
    pub fn double_faced(&self) -> &CardRegistry {
        &self.double_faced
    }

    /// Resolve a key to its registered card.
    pub fn resolve(&self, key: CardKey) -> Result<&Card> {
        self.registry(key.space)
            .get(key.slot)
            .ok_or(DeckError::DanglingId(key))
    }

    /// Forget every allocation. Equivalent to starting a new run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Layout;

    #[test]
    fn test_spaces_are_independent() {
        let mut session = ConversionSession::new();
        let a = Card::new("a", "A");
        let b = Card::new("b", "B").with_layout(Layout::Transform);

        assert_eq!(session.allocate(IdSpace::Simple, &a), SlotId::new(100));
        assert_eq!(session.allocate(IdSpace::DoubleFaced, &b), SlotId::new(100));
        assert_eq!(session.simple().len(), 1);
        assert_eq!(session.double_faced().len(), 1);
    }

    #[test]
    fn test_twenty_fifth_card_starts_page_one() {
        let mut session = ConversionSession::new();
        let ids: Vec<_> = (0..25)
            .map(|i| session.allocate(IdSpace::Simple, &Card::new(format!("c{i}"), "C")))
            .collect();

        assert_eq!(ids[0].raw(), 100);
        assert_eq!(ids[24].raw(), 200);
    }

    #[test]
    fn test_resolve_and_dangling() {
        let mut session = ConversionSession::new();
        let key = session.allocate_key(IdSpace::Simple, &Card::new("a", "Alpha"));

        assert_eq!(session.resolve(key).unwrap().name, "Alpha");
        assert!(matches!(
            session.resolve(CardKey::double_faced(100)),
            Err(DeckError::DanglingId(_))
        ));
    }

    #[test]
    fn test_reset_restarts_allocation() {
        let mut session = ConversionSession::new();
        session.allocate(IdSpace::Simple, &Card::new("a", "A"));
        session.allocate(IdSpace::Simple, &Card::new("b", "B"));
        session.reset();

        assert!(session.simple().is_empty());
        assert_eq!(
            session.allocate(IdSpace::Simple, &Card::new("b", "B")),
            SlotId::new(100)
        );
    }
}
