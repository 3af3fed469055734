//! Scene document model and builder.
//!
//! ## Key Types
//!
//! - `SceneDocument`: Top-level `ObjectStates` list
//! - `ObjectState`: Deck container or single card with placement
//! - `CustomDeckEntry`: Sheet grid size plus face/back URLs
//! - `SceneBuilder`: Turns transformed decks and sheet URLs into a document

pub mod builder;
pub mod document;

pub use builder::{write_document, SceneBuilder};
pub use document::{
    ContainedObject, CustomDeck, CustomDeckEntry, ObjectKind, ObjectState, SceneDocument, Transform,
};
