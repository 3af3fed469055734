//! Sheet grid sizing.
//!
//! Sheets are always 5 cells wide. Full pages hold 24 cards on 5 rows; the
//! trailing partial page is cut down to the rows it needs.

use crate::core::ids::{IdSpace, CARDS_PER_PAGE, SHEET_COLUMNS, SHEET_ROWS};

/// Rows needed by a partial simple page holding `remainder` cards.
#[must_use]
pub fn simple_partial_rows(remainder: usize) -> u32 {
    remainder.div_ceil(SHEET_COLUMNS as usize) as u32
}

/// Rows allotted to a partial double-faced page holding `remainder` cards.
///
/// Over-allocates: the count is `(remainder + 1) / 5 + 1`, which gives an
/// extra empty row whenever `remainder` is a multiple of 5 or one short of it.
#[must_use]
pub fn double_faced_partial_rows(remainder: usize) -> u32 {
    ((remainder + 1) / SHEET_COLUMNS as usize + 1) as u32
}

/// Row count of every page in a space holding `unique` cards.
///
/// A double-faced page renders as a front and a back sheet of this height.
#[must_use]
pub fn page_rows(space: IdSpace, unique: usize) -> Vec<u32> {
    let full = unique / CARDS_PER_PAGE;
    let remainder = unique % CARDS_PER_PAGE;

    let mut rows = vec![SHEET_ROWS; full];
    if remainder > 0 {
        rows.push(match space {
            IdSpace::Simple => simple_partial_rows(remainder),
            IdSpace::DoubleFaced => double_faced_partial_rows(remainder),
        });
    }
    rows
}

/// Pixel size of a sheet with `rows` rows of `card_width x card_height` cells.
#[must_use]
pub fn sheet_pixels(card_width: u32, card_height: u32, rows: u32) -> (u32, u32) {
    (card_width * SHEET_COLUMNS, card_height * rows)
}
