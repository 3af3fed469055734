//! Card catalog collaborator.
//!
//! The converter never talks to the network itself. It asks a `CardCatalog`
//! for card records (by name or by a related-part URI) and for raw face image
//! bytes. Two local implementations are provided:
//!
//! - `InMemoryCatalog`: cards and images registered up front
//! - `CachedCatalog`: memoizes card lookups of another catalog and can
//!   persist them between runs

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cards::Card;
use crate::core::error::{DeckError, Result};

/// Source of card records and face images.
pub trait CardCatalog {
    /// Fetch a card by name, or by `uri` when one is given.
    fn get_card(&mut self, name: &str, uri: Option<&str>) -> Result<Card>;

    /// Fetch raw (encoded) image bytes.
    fn get_card_image(&mut self, uri: &str) -> Result<Vec<u8>>;
}

impl<C: CardCatalog + ?Sized> CardCatalog for &mut C {
    fn get_card(&mut self, name: &str, uri: Option<&str>) -> Result<Card> {
        (**self).get_card(name, uri)
    }

    fn get_card_image(&mut self, uri: &str) -> Result<Vec<u8>> {
        (**self).get_card_image(uri)
    }
}

/// Catalog backed by maps filled in advance.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    by_name: FxHashMap<String, Card>,
    by_uri: FxHashMap<String, Card>,
    images: FxHashMap<String, Vec<u8>>,
    card_requests: usize,
    image_requests: usize,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a card findable by its name.
    pub fn add_card(&mut self, card: Card) {
        self.by_name.insert(card.name.clone(), card);
    }

    /// Make a card findable by a relation URI.
    pub fn add_card_at(&mut self, uri: impl Into<String>, card: Card) {
        self.by_uri.insert(uri.into(), card);
    }

    /// Register image bytes for a URI.
    pub fn add_image(&mut self, uri: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(uri.into(), bytes);
    }

    /// Number of `get_card` calls served or failed.
    #[must_use]
    pub fn card_requests(&self) -> usize {
        self.card_requests
    }

    /// Number of `get_card_image` calls served or failed.
    #[must_use]
    pub fn image_requests(&self) -> usize {
        self.image_requests
    }
}

impl CardCatalog for InMemoryCatalog {
    fn get_card(&mut self, name: &str, uri: Option<&str>) -> Result<Card> {
        self.card_requests += 1;
        let found = match uri {
            Some(uri) => self.by_uri.get(uri),
            None => self.by_name.get(name),
        };
        found
            .cloned()
            .ok_or_else(|| DeckError::catalog(uri.unwrap_or(name), "no such card"))
    }

    fn get_card_image(&mut self, uri: &str) -> Result<Vec<u8>> {
        self.image_requests += 1;
        self.images
            .get(uri)
            .cloned()
            .ok_or_else(|| DeckError::catalog(uri, "no such image"))
    }
}

/// Memoizing wrapper around another catalog.
///
/// Card records are cached by name or URI; images pass straight through.
#[derive(Debug)]
pub struct CachedCatalog<C> {
    inner: C,
    cards: FxHashMap<String, Card>,
}

impl<C: CardCatalog> CachedCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cards: FxHashMap::default(),
        }
    }

    /// Wrap `inner`, seeding the cache from a file written by `save`.
    pub fn load(inner: C, path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let cards: FxHashMap<String, Card> = bincode::deserialize_from(reader)?;
        debug!(cached = cards.len(), "loaded catalog cache");
        Ok(Self { inner, cards })
    }

    /// Persist the card cache.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, &self.cards)?;
        Ok(())
    }

    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cards.len()
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn cache_key(name: &str, uri: Option<&str>) -> String {
        match uri {
            Some(uri) => format!("uri:{uri}"),
            None => format!("name:{name}"),
        }
    }
}

impl<C: CardCatalog> CardCatalog for CachedCatalog<C> {
    fn get_card(&mut self, name: &str, uri: Option<&str>) -> Result<Card> {
        let key = Self::cache_key(name, uri);
        if let Some(card) = self.cards.get(&key) {
            return Ok(card.clone());
        }
        let card = self.inner.get_card(name, uri)?;
        self.cards.insert(key, card.clone());
        Ok(card)
    }

    fn get_card_image(&mut self, uri: &str) -> Result<Vec<u8>> {
        self.inner.get_card_image(uri)
    }
}
