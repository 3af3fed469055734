//! End-to-end conversion: decks in, scene document out.
//!
//! ```text
//! decks ─▶ transform_decks ─▶ composite (render + upload) ─▶ SceneBuilder ─▶ <name>.json
//!              (session)       (catalog, throttle, uploader)        (rng)
//! ```
//!
//! Each call owns a fresh `ConversionSession`, so ids never leak between
//! unrelated documents.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::clock::Clock;
use crate::core::config::ConversionConfig;
use crate::core::error::Result;
use crate::core::rng::SessionRng;
use crate::core::throttle::Throttle;
use crate::deck::{transform_decks, Deck};
use crate::scene::{write_document, SceneBuilder};
use crate::services::{CardCatalog, SheetUploader};
use crate::session::ConversionSession;
use crate::sheet::{composite, SheetCompositor, SheetNames};

/// Result of a conversion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Document written to this path.
    Written(PathBuf),
    /// Nothing written: a sheet upload failed or there were no cards.
    Aborted,
}

impl ConversionOutcome {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConversionOutcome::Written(path) => Some(path),
            ConversionOutcome::Aborted => None,
        }
    }
}

/// Convert `decks` into one scene document named after the first deck.
///
/// An empty deck list, or decks holding no cards at all, is a no-op and
/// reports `Aborted`.
pub fn create_decks<C, U>(
    decks: &[Deck],
    config: &ConversionConfig,
    catalog: &mut C,
    uploader: &mut U,
    clock: &dyn Clock,
) -> Result<ConversionOutcome>
where
    C: CardCatalog,
    U: SheetUploader,
{
    let Some(first) = decks.first() else {
        warn!("no decks given, nothing to convert");
        return Ok(ConversionOutcome::Aborted);
    };

    let mut session = ConversionSession::new();
    let transformed = transform_decks(&mut session, catalog, decks)?;
    info!(
        decks = transformed.len(),
        simple = session.simple().len(),
        double_faced = session.double_faced().len(),
        "allocated card ids"
    );

    let throttle = Throttle::new(config.fetch_interval());
    let mut compositor = SheetCompositor::new(catalog, clock, config.card_size.clone(), throttle);
    let names = SheetNames::new(config.sheet_prefix.clone(), &first.name);
    let Some(urls) = composite(&mut compositor, &session, uploader, &names)? else {
        warn!(deck = %first.name, "sheet upload failed, no document written");
        return Ok(ConversionOutcome::Aborted);
    };
    if urls.simple.is_empty() && urls.double_faced.is_empty() {
        warn!(deck = %first.name, "decks hold no cards, no document written");
        return Ok(ConversionOutcome::Aborted);
    }

    let builder = SceneBuilder::new(&session, &urls, &config.backs, SessionRng::new(config.seed));
    let document = builder.build(&transformed)?;
    let path = write_document(&document, &config.output_dir, &first.name)?;
    Ok(ConversionOutcome::Written(path))
}
