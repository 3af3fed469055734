//! Deck transformation: raw decks to identifier multisets.
//!
//! Each deck is split into three sub-decks:
//! - main: the deck's own cards, minus transform cards
//! - tokens: tokens, emblems and meld results referenced by the deck's cards
//! - dfcs: the transform cards pulled out of main
//!
//! Allocation runs phase by phase across all decks (every main list, then
//! every token list, then every dfc list). Tokens therefore land on the simple
//! pages after all main cards, which keeps token-only pages separable.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::deck::Deck;
use super::multiset::IdMultiset;
use crate::cards::{Card, Layout};
use crate::core::error::Result;
use crate::core::ids::IdSpace;
use crate::services::CardCatalog;
use crate::session::ConversionSession;

/// A deck reduced to identifier multisets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformedDeck {
    pub name: String,
    pub main: IdMultiset,
    pub tokens: IdMultiset,
    pub dfcs: IdMultiset,
}

/// Working lists for one deck before allocation.
struct SplitDeck {
    name: String,
    main: Vec<Card>,
    tokens: Vec<Card>,
    dfcs: Vec<Card>,
}

/// Split every deck and allocate ids in `session`.
///
/// Returns one `TransformedDeck` per input deck, in input order. The input
/// decks are not modified.
pub fn transform_decks<C: CardCatalog>(
    session: &mut ConversionSession,
    catalog: &mut C,
    decks: &[Deck],
) -> Result<Vec<TransformedDeck>> {
    info!(decks = decks.len(), "gathering unique cards");

    let split = decks
        .iter()
        .map(|deck| split_deck(deck, catalog))
        .collect::<Result<Vec<_>>>()?;

    let mains: Vec<IdMultiset> = split
        .iter()
        .map(|d| collect_ids(session, &d.main, Card::id_space))
        .collect();
    let tokens: Vec<IdMultiset> = split
        .iter()
        .map(|d| collect_ids(session, &d.tokens, |_| IdSpace::Simple))
        .collect();
    let dfcs: Vec<IdMultiset> = split
        .iter()
        .map(|d| collect_ids(session, &d.dfcs, |_| IdSpace::DoubleFaced))
        .collect();

    info!(
        simple = session.simple().len(),
        double_faced = session.double_faced().len(),
        "allocated unique cards"
    );

    Ok(split
        .into_iter()
        .zip(mains)
        .zip(tokens)
        .zip(dfcs)
        .map(|(((deck, main), tokens), dfcs)| TransformedDeck {
            name: deck.name,
            main,
            tokens,
            dfcs,
        })
        .collect())
}

fn split_deck<C: CardCatalog>(deck: &Deck, catalog: &mut C) -> Result<SplitDeck> {
    let mut working = deck.cards.clone();
    let mut tokens: Vec<Card> = Vec::new();
    let mut fetched: FxHashSet<&str> = FxHashSet::default();

    for card in deck.iter() {
        for part in card.all_parts.iter().filter(|p| p.belongs_in_tokens()) {
            if !fetched.insert(part.uri.as_str()) {
                continue;
            }
            let token = catalog.get_card("", Some(part.uri.as_str()))?;
            if !tokens.iter().any(|t| t.id == token.id) {
                debug!(deck = %deck.name, token = %token.name, "found related token");
                tokens.push(token);
            }
        }
    }

    let dfcs: Vec<Card> = working
        .iter()
        .filter(|c| c.layout == Layout::Transform)
        .cloned()
        .collect();
    working.retain(|c| c.layout != Layout::Transform);

    Ok(SplitDeck {
        name: deck.name.clone(),
        main: working.into_iter().collect(),
        tokens,
        dfcs,
    })
}

fn collect_ids(
    session: &mut ConversionSession,
    cards: &[Card],
    space_of: impl Fn(&Card) -> IdSpace,
) -> IdMultiset {
    cards
        .iter()
        .map(|card| session.allocate_key(space_of(card), card))
        .collect()
}
