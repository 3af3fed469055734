//! Identifier multisets: deck composition as id -> count.

use rustc_hash::FxHashMap;

use crate::core::ids::CardKey;

/// Mapping from card key to a positive count, in first-insertion order.
///
/// Order matters: the scene document lists contained cards in this order.
///
/// ```
/// use tts_deck::core::CardKey;
/// use tts_deck::deck::IdMultiset;
///
/// let mut main = IdMultiset::new();
/// main.add(CardKey::simple(100));
/// main.add(CardKey::simple(101));
/// main.add(CardKey::simple(100));
///
/// assert_eq!(main.count(CardKey::simple(100)), 2);
/// assert_eq!(main.total(), 3);
/// assert_eq!(main.unique(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct IdMultiset {
    entries: Vec<(CardKey, u32)>,
    index: FxHashMap<CardKey, usize>,
}

impl IdMultiset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`.
    pub fn add(&mut self, key: CardKey) {
        self.add_many(key, 1);
    }

    /// Count `n` more occurrences of `key`. Adding zero is a no-op.
    pub fn add_many(&mut self, key: CardKey, n: u32) {
        if n == 0 {
            return;
        }
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    /// Occurrences of `key` (0 if absent).
    #[must_use]
    pub fn count(&self, key: CardKey) -> u32 {
        self.index.get(&key).map_or(0, |&i| self.entries[i].1)
    }

    #[must_use]
    pub fn contains(&self, key: CardKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn unique(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|&(_, n)| n).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, count)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (CardKey, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Every key repeated by its count, in order.
    pub fn instances(&self) -> impl Iterator<Item = CardKey> + '_ {
        self.entries
            .iter()
            .flat_map(|&(key, n)| std::iter::repeat(key).take(n as usize))
    }
}

impl FromIterator<CardKey> for IdMultiset {
    fn from_iter<I: IntoIterator<Item = CardKey>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.add(key);
        }
        set
    }
}

impl PartialEq for IdMultiset {
    /// Equal when counts match, regardless of insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.unique() == other.unique() && self.iter().all(|(key, n)| other.count(key) == n)
    }
}

impl Eq for IdMultiset {}
