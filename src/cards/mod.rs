//! Card records and unique-card registries.
//!
//! ## Key Types
//!
//! - `Card`: Catalog record (layout, images, related parts)
//! - `Layout`: Printing shape; decides id space and face selection
//! - `RelatedPart`: Link to a token, emblem or meld result
//! - `CardRegistry`: Slot allocation and lookup for one id space

pub mod card;
pub mod registry;

pub use card::{Card, CardFace, ImageUris, Layout, PartComponent, RelatedPart};
pub use registry::CardRegistry;
