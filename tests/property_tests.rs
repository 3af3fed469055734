//! Property tests for id allocation and deck transformation.
//!
//! - Slot ids round-trip through page/offset/index
//! - Allocation is idempotent within a session
//! - Transformation preserves card counts and never leaves dangling ids

use proptest::prelude::*;
use tts_deck::cards::{Card, Layout};
use tts_deck::core::{IdSpace, SlotId, CARDS_PER_PAGE, SHEET_COLUMNS, SHEET_ROWS};
use tts_deck::deck::{transform_decks, Deck};
use tts_deck::services::InMemoryCatalog;
use tts_deck::session::ConversionSession;
use tts_deck::sheet::page_rows;

fn card(i: u8, transform: bool) -> Card {
    let layout = if transform { Layout::Transform } else { Layout::Normal };
    Card::new(format!("c{i}"), format!("Card {i}")).with_layout(layout)
}

/// (card index, quantity)
fn deck_strategy() -> impl Strategy<Value = Vec<(u8, usize)>> {
    prop::collection::vec((0u8..60, 1usize..5), 0..40)
}

/// Every third card index is a transform card.
fn build_deck(name: &str, entries: &[(u8, usize)]) -> Deck {
    let mut deck = Deck::new(name);
    for &(i, quantity) in entries {
        deck.add(card(i, i % 3 == 0), quantity);
    }
    deck
}

proptest! {
    #[test]
    fn prop_slot_id_round_trip(index in 0usize..10_000) {
        let slot = SlotId::from_index(index);
        prop_assert!(slot.is_valid());
        prop_assert_eq!(slot.index(), index);
        prop_assert_eq!(slot.page() as usize, index / CARDS_PER_PAGE);
        prop_assert!(slot.offset() < CARDS_PER_PAGE as u32);

        let (col, row) = slot.cell();
        prop_assert!(col < SHEET_COLUMNS);
        prop_assert!(row < SHEET_ROWS);
    }

    #[test]
    fn prop_allocation_idempotent(names in prop::collection::vec(0u8..50, 1..100)) {
        let mut session = ConversionSession::new();
        let first: Vec<SlotId> = names
            .iter()
            .map(|&i| session.allocate(IdSpace::Simple, &card(i, false)))
            .collect();
        let again: Vec<SlotId> = names
            .iter()
            .map(|&i| session.allocate(IdSpace::Simple, &card(i, false)))
            .collect();

        prop_assert_eq!(&first, &again);

        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(session.simple().len(), unique.len());
    }

    #[test]
    fn prop_transform_preserves_counts(a in deck_strategy(), b in deck_strategy()) {
        let decks = vec![build_deck("A", &a), build_deck("B", &b)];
        let mut session = ConversionSession::new();
        let out = transform_decks(&mut session, &mut InMemoryCatalog::new(), &decks).unwrap();

        for (deck, transformed) in decks.iter().zip(&out) {
            let dfc_count = deck.iter().filter(|c| c.layout == Layout::Transform).count() as u32;
            prop_assert_eq!(transformed.dfcs.total(), dfc_count);
            prop_assert_eq!(transformed.main.total() + transformed.dfcs.total(), deck.len() as u32);
            prop_assert!(transformed.tokens.is_empty());

            for key in transformed.main.instances().chain(transformed.dfcs.instances()) {
                prop_assert!(session.resolve(key).is_ok());
            }
        }
    }

    #[test]
    fn prop_rows_cover_every_card(unique in 1usize..200) {
        let rows = page_rows(IdSpace::Simple, unique);
        prop_assert_eq!(rows.len(), (unique + CARDS_PER_PAGE - 1) / CARDS_PER_PAGE);

        let capacity: u32 = rows.iter().map(|r| r * SHEET_COLUMNS).sum();
        prop_assert!(capacity as usize >= unique);
        prop_assert!(rows.iter().all(|&r| (1..=SHEET_ROWS).contains(&r)));
    }
}

/// Transforming the same decks twice in one session reuses every id.
#[test]
fn test_repeat_transform_reuses_ids() {
    let decks = vec![
        build_deck("A", &[(0, 2), (1, 4), (3, 1)]),
        build_deck("B", &[(1, 2), (5, 3), (6, 1)]),
    ];
    let mut session = ConversionSession::new();
    let mut catalog = InMemoryCatalog::new();

    let first = transform_decks(&mut session, &mut catalog, &decks).unwrap();
    let simple = session.simple().len();
    let double_faced = session.double_faced().len();
    let second = transform_decks(&mut session, &mut catalog, &decks).unwrap();

    assert_eq!(first, second);
    assert_eq!(session.simple().len(), simple);
    assert_eq!(session.double_faced().len(), double_faced);
}
