//! Scene document construction.
//!
//! Each transformed deck becomes up to three objects laid out on the table:
//! decks side by side along X (3 units apart), and for each deck the main
//! container at Z=0, tokens at Z=4 and double-faced cards at Z=8.
//!
//! ## CustomDeck keys
//!
//! A `CardID` addresses sheet `CardID / 100`, cell `CardID % 100`.
//! - Simple page p is key `p + 1`, so simple ids are used unchanged.
//! - In the main container, double-faced front page p is key
//!   `simple_pages + p + 1`; double-faced ids are shifted by that many pages.
//! - The double-faced container uses key `p + 1` with unique backs.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::document::{ContainedObject, CustomDeck, CustomDeckEntry, ObjectState, SceneDocument, Transform};
use crate::core::config::CardBacks;
use crate::core::error::Result;
use crate::core::naming::file_stem;
use crate::core::ids::{CardKey, IdSpace, SHEET_COLUMNS};
use crate::core::rng::SessionRng;
use crate::deck::{IdMultiset, TransformedDeck};
use crate::session::ConversionSession;
use crate::sheet::{page_rows, SheetUrls};

const DECK_SPACING: f64 = 3.0;
const TOKEN_ROW: f64 = 4.0;
const DFC_ROW: f64 = 8.0;
const TABLE_HEIGHT: f64 = 1.0;

/// Odds (out of 1001) of the primary card back.
const PRIMARY_BACK_ODDS: u32 = 1000;

/// Builds a `SceneDocument` from transformed decks and uploaded sheets.
pub struct SceneBuilder<'a> {
    session: &'a ConversionSession,
    urls: &'a SheetUrls,
    backs: &'a CardBacks,
    rng: SessionRng,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(
        session: &'a ConversionSession,
        urls: &'a SheetUrls,
        backs: &'a CardBacks,
        rng: SessionRng,
    ) -> Self {
        Self {
            session,
            urls,
            backs,
            rng,
        }
    }

    /// Number of simple sheet pages, which is also the page shift applied to
    /// double-faced ids inside main containers.
    #[must_use]
    pub fn simple_pages(&self) -> u32 {
        self.urls.simple.len() as u32
    }

    /// Id a key is listed under in a main container.
    #[must_use]
    pub fn main_card_id(&self, key: CardKey) -> u32 {
        match key.space {
            IdSpace::Simple => key.slot.raw(),
            IdSpace::DoubleFaced => key.slot.shifted_pages(self.simple_pages()).raw(),
        }
    }

    /// Build the document. Every id must resolve in the session.
    pub fn build(&self, decks: &[TransformedDeck]) -> Result<SceneDocument> {
        let card_back = self.pick_card_back();

        let main_simple = pages_in(decks.iter().map(|d| &d.main), IdSpace::Simple);
        let token_pages = pages_in(decks.iter().map(|d| &d.tokens), IdSpace::Simple);
        let main_dfc = pages_in(
            decks.iter().flat_map(|d| [&d.main, &d.dfcs]),
            IdSpace::DoubleFaced,
        );

        let main_deck = self.main_custom_deck(&main_simple, &main_dfc, &card_back);
        let token_deck = self.token_custom_deck(&token_pages);
        let dfc_deck = self.dfc_custom_deck();

        let mut states = Vec::new();
        for (i, deck) in decks.iter().enumerate() {
            let x = i as f64 * DECK_SPACING;

            if !deck.main.is_empty() {
                let mut cards = Vec::with_capacity((deck.main.total() + deck.dfcs.total()) as usize);
                for key in deck.main.instances().chain(deck.dfcs.instances()) {
                    let card = self.session.resolve(key)?;
                    cards.push(ContainedObject::card(&card.name, self.main_card_id(key)));
                }
                states.push(ObjectState::deck(
                    deck.name.clone(),
                    Transform::at([x, TABLE_HEIGHT, 0.0], [0.0, 180.0, 180.0]),
                    main_deck.clone(),
                    cards,
                ));
            }

            if !deck.tokens.is_empty() {
                let cards = self.contained(&deck.tokens)?;
                states.push(ObjectState::deck(
                    format!("{} [tokens]", deck.name),
                    Transform::at([x, TABLE_HEIGHT, TOKEN_ROW], [0.0, 180.0, 0.0]),
                    token_deck.clone(),
                    cards,
                ));
            }

            if !deck.dfcs.is_empty() {
                let transform = Transform::at([x, TABLE_HEIGHT, DFC_ROW], [0.0, 180.0, 0.0]);
                // One unique card lies on the table alone, whatever its count
                let lone = deck.dfcs.iter().next().filter(|_| deck.dfcs.unique() == 1);
                if let Some((key, _)) = lone {
                    let card = self.session.resolve(key)?;
                    states.push(ObjectState::single_card(
                        card.name.clone(),
                        transform,
                        dfc_deck.clone(),
                        key.slot.raw(),
                    ));
                } else {
                    let cards = self.contained(&deck.dfcs)?;
                    states.push(ObjectState::deck(
                        format!("{} [dfc]", deck.name),
                        transform,
                        dfc_deck.clone(),
                        cards,
                    ));
                }
            }
        }

        info!(objects = states.len(), "built scene document");
        Ok(SceneDocument {
            object_states: states,
        })
    }

    fn contained(&self, set: &IdMultiset) -> Result<Vec<ContainedObject>> {
        set.instances()
            .map(|key| {
                let card = self.session.resolve(key)?;
                Ok(ContainedObject::card(&card.name, key.slot.raw()))
            })
            .collect()
    }

    fn pick_card_back(&self) -> String {
        let mut stream = self.rng.for_context("card_back");
        if stream.gen_range(0..PRIMARY_BACK_ODDS + 1) < PRIMARY_BACK_ODDS {
            self.backs.primary.clone()
        } else {
            self.backs.alternate.clone()
        }
    }

    fn main_custom_deck(
        &self,
        simple_pages: &BTreeSet<u32>,
        dfc_pages: &BTreeSet<u32>,
        card_back: &str,
    ) -> CustomDeck {
        let simple_rows = page_rows(IdSpace::Simple, self.session.simple().len());
        let dfc_rows = page_rows(IdSpace::DoubleFaced, self.session.double_faced().len());

        let mut deck = CustomDeck::new();
        for (page, (url, &rows)) in self.urls.simple.iter().zip(&simple_rows).enumerate() {
            if simple_pages.contains(&(page as u32)) {
                deck.insert(page as u32 + 1, entry(rows, url, card_back, None));
            }
        }
        for (page, ((front, _), &rows)) in self.urls.double_faced_pairs().zip(&dfc_rows).enumerate() {
            if dfc_pages.contains(&(page as u32)) {
                let key = self.simple_pages() + page as u32 + 1;
                deck.insert(key, entry(rows, front, card_back, None));
            }
        }
        deck
    }

    fn token_custom_deck(&self, token_pages: &BTreeSet<u32>) -> CustomDeck {
        let heights = page_rows(IdSpace::Simple, self.session.simple().len());
        let mut stream = self.rng.for_context("token_back");

        let mut deck = CustomDeck::new();
        for (page, (url, &rows)) in self.urls.simple.iter().zip(&heights).enumerate() {
            if token_pages.contains(&(page as u32)) {
                let back = stream
                    .choose(&self.backs.token_backs)
                    .unwrap_or(&self.backs.primary);
                deck.insert(page as u32 + 1, entry(rows, url, back, None));
            }
        }
        deck
    }

    fn dfc_custom_deck(&self) -> CustomDeck {
        let heights = page_rows(IdSpace::DoubleFaced, self.session.double_faced().len());
        self.urls
            .double_faced_pairs()
            .zip(heights)
            .enumerate()
            .map(|(page, ((front, back), rows))| (page as u32 + 1, entry(rows, front, back, Some(true))))
            .collect()
    }
}

fn entry(rows: u32, face: &str, back: &str, unique_back: Option<bool>) -> CustomDeckEntry {
    CustomDeckEntry {
        num_width: SHEET_COLUMNS,
        num_height: rows,
        unique_back,
        face_url: face.to_string(),
        back_url: back.to_string(),
    }
}

/// Pages of `space` referenced by any of the multisets.
fn pages_in<'m>(sets: impl Iterator<Item = &'m IdMultiset>, space: IdSpace) -> BTreeSet<u32> {
    sets.flat_map(|set| set.iter())
        .filter(|(key, _)| key.space == space)
        .map(|(key, _)| key.slot.page())
        .collect()
}

/// Write `doc` as pretty-printed UTF-8 JSON to `<dir>/<name>.json`.
///
/// `name` is passed through `file_stem`, so it never escapes `dir`.
pub fn write_document(doc: &SceneDocument, dir: impl AsRef<Path>, name: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", file_stem(name)));

    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, doc)?;
    writer.flush()?;

    info!(path = %path.display(), "wrote scene document");
    Ok(path)
}
