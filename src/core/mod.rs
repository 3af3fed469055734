//! Core types: slot ids, RNG, clock and throttle, configuration, errors.
//!
//! Everything here is independent of card records and sheet rendering.

pub mod ids;
pub mod rng;
pub mod clock;
pub mod throttle;
pub mod config;
pub mod error;
pub mod naming;

pub use ids::{CardKey, IdSpace, SlotId, CARDS_PER_PAGE, PAGE_STRIDE, SHEET_COLUMNS, SHEET_ROWS};
pub use rng::SessionRng;
pub use clock::{Clock, ManualClock, SystemClock};
pub use throttle::Throttle;
pub use config::{CardBacks, CardSize, ConversionConfig};
pub use error::{DeckError, Result};
pub use naming::file_stem;
