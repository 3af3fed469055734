//! Sheet slot identifiers.
//!
//! Every unique card gets a `SlotId` within one of two independent id spaces.
//! Ids double as the simulator's `CardID` addressing: the hundreds digit
//! selects the sheet page, the remainder selects the cell on that page.
//!
//! ## ID Layout
//!
//! The n-th unique card allocated in a space (0-based) receives
//! `(n / 24) * 100 + n % 24 + 100`:
//! - `100..=123`: page 0
//! - `200..=223`: page 1
//! - ...
//!
//! Within a page, cells are filled row by row on a 5-column grid.
//!
//! ```
//! use tts_deck::core::SlotId;
//!
//! let first = SlotId::from_index(0);
//! assert_eq!(first.raw(), 100);
//!
//! let twenty_fifth = SlotId::from_index(24);
//! assert_eq!(twenty_fifth.raw(), 200);
//! assert_eq!(twenty_fifth.page(), 1);
//! assert_eq!(twenty_fifth.cell(), (0, 0));
//! ```

use serde::{Deserialize, Serialize};

/// Number of unique cards that share one sheet page.
pub const CARDS_PER_PAGE: usize = 24;

/// Sheet width in cells.
pub const SHEET_COLUMNS: u32 = 5;

/// Full sheet height in cells.
pub const SHEET_ROWS: u32 = 5;

/// Id distance between two consecutive pages.
pub const PAGE_STRIDE: u32 = 100;

/// A slot identifier inside one id space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u32);

impl SlotId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Id for the n-th unique card of a space (0-based, first-seen order).
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        let page = (index / CARDS_PER_PAGE) as u32;
        let offset = (index % CARDS_PER_PAGE) as u32;
        Self(page * PAGE_STRIDE + offset + PAGE_STRIDE)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Is this an id the allocator could have produced?
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= PAGE_STRIDE && self.0 % PAGE_STRIDE < CARDS_PER_PAGE as u32
    }

    /// Sheet page this id lives on.
    #[must_use]
    pub const fn page(self) -> u32 {
        (self.0 - PAGE_STRIDE) / PAGE_STRIDE
    }

    /// Position on the page, `0..24`.
    #[must_use]
    pub const fn offset(self) -> u32 {
        (self.0 - PAGE_STRIDE * (self.page() + 1)) % CARDS_PER_PAGE as u32
    }

    /// `(column, row)` of the grid cell.
    #[must_use]
    pub const fn cell(self) -> (u32, u32) {
        let offset = self.offset();
        (offset % SHEET_COLUMNS, offset / SHEET_COLUMNS)
    }

    /// Inverse of `from_index`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.page() as usize * CARDS_PER_PAGE + self.offset() as usize
    }

    /// Shift the id by whole pages.
    #[must_use]
    pub const fn shifted_pages(self, pages: u32) -> Self {
        Self(self.0 + pages * PAGE_STRIDE)
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two disjoint id spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdSpace {
    /// Single-faced cards and every token.
    Simple,
    /// Transform and double-faced token cards, rendered as front/back sheet pairs.
    DoubleFaced,
}

impl IdSpace {
    /// Short label used in logs and sheet file names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            IdSpace::Simple => "simple",
            IdSpace::DoubleFaced => "dfc",
        }
    }
}

/// An id qualified by the space it was allocated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub space: IdSpace,
    pub slot: SlotId,
}

impl CardKey {
    #[must_use]
    pub const fn new(space: IdSpace, slot: SlotId) -> Self {
        Self { space, slot }
    }

    #[must_use]
    pub const fn simple(id: u32) -> Self {
        Self::new(IdSpace::Simple, SlotId(id))
    }

    #[must_use]
    pub const fn double_faced(id: u32) -> Self {
        Self::new(IdSpace::DoubleFaced, SlotId(id))
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.space.label(), self.slot)
    }
}
