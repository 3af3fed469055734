//! Sprite-sheet layout and rendering.
//!
//! - `geometry`: rows per page for each id space
//! - `compositor`: fetches face images, tiles them into sheets, uploads them

pub mod compositor;
pub mod geometry;

pub use compositor::{
    composite, upload_sheets, RenderedSheets, Sheet, SheetCompositor, SheetNames, SheetSide, SheetUrls,
};
pub use geometry::{double_faced_partial_rows, page_rows, sheet_pixels, simple_partial_rows};
