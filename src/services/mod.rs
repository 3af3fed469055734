//! External collaborators: the card catalog and the sheet uploader.
//!
//! These traits are the seams to remote services. The crate ships local
//! implementations for offline runs and tests.

pub mod catalog;
pub mod upload;

pub use catalog::{CachedCatalog, CardCatalog, InMemoryCatalog};
pub use upload::{DirectoryUploader, SheetUploader};
