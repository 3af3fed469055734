//! # tts-deck
//!
//! Packs trading-card decks into sprite sheets and a tabletop simulator
//! scene document.
//!
//! ## Design Principles
//!
//! 1. **Explicit Session**: Id allocation and unique-card registries live in a
//!    `ConversionSession` passed to every stage. No global state.
//!
//! 2. **Two Id Spaces**: Simple cards and double-faced cards are numbered
//!    independently. A `CardKey` always carries its space.
//!
//! 3. **Injected Collaborators**: Card lookup, sheet upload, time and
//!    randomness are traits or seeded values, so a run is reproducible.
//!
//! ## Pipeline
//!
//! - **Transform**: Split each deck into main/tokens/dfcs and allocate ids.
//! - **Composite**: Tile face images into 5x5 sheets (24 cards each), upload.
//! - **Build**: Emit deck containers referencing the sheet URLs.
//!
//! ## Modules
//!
//! - `core`: Slot ids, RNG, clock, throttle, configuration, errors
//! - `cards`: Card records and registries
//! - `session`: Per-run id allocation
//! - `services`: Catalog and uploader traits with local implementations
//! - `deck`: Decks, decklist parsing, the deck transformer
//! - `sheet`: Sheet geometry and compositing
//! - `scene`: Scene document model and builder
//! - `pipeline`: End-to-end conversion

pub mod core;
pub mod cards;
pub mod session;
pub mod services;
pub mod deck;
pub mod sheet;
pub mod scene;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{
    CardKey, IdSpace, SlotId,
    SessionRng,
    Clock, ManualClock, SystemClock, Throttle,
    CardBacks, CardSize, ConversionConfig,
    DeckError, Result,
};

pub use crate::cards::{Card, CardFace, CardRegistry, Layout, PartComponent, RelatedPart};

pub use crate::session::ConversionSession;

pub use crate::services::{CachedCatalog, CardCatalog, DirectoryUploader, InMemoryCatalog, SheetUploader};

pub use crate::deck::{parse_decklist, resolve_deck, transform_decks, Deck, IdMultiset, TransformedDeck};

pub use crate::sheet::{RenderedSheets, SheetCompositor, SheetNames, SheetUrls};

pub use crate::scene::{write_document, SceneBuilder, SceneDocument};

pub use crate::pipeline::{create_decks, ConversionOutcome};
