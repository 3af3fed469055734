//! Crate error type.
//!
//! Remote fetch failures, image codec failures and malformed card records
//! surface as `DeckError`. Upload failures are deliberately not errors: the
//! upload collaborator signals them with `None` and the compositor turns that
//! into an aborted run.

use thiserror::Error;

use super::ids::CardKey;

/// Errors produced while converting decks.
#[derive(Error, Debug)]
pub enum DeckError {
    /// The catalog could not resolve a card or image.
    #[error("catalog request failed for '{target}': {message}")]
    Catalog { target: String, message: String },

    /// A fetched face image could not be decoded, or a sheet could not be encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The card has no image URI for the requested face and size.
    #[error("card '{card}' has no '{size}' image for face {face}")]
    MissingImage {
        card: String,
        face: usize,
        size: String,
    },

    /// The configured card size tag is not one of the known presets.
    #[error("unknown card size: '{0}'")]
    UnknownCardSize(String),

    /// An identifier does not resolve to a registered card.
    #[error("no card registered for {0}")]
    DanglingId(CardKey),

    /// A decklist line could not be parsed.
    #[error("decklist line {line}: cannot parse '{text}'")]
    Decklist { line: usize, text: String },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog cache (de)serialization error.
    #[error("cache error: {0}")]
    Cache(#[from] bincode::Error),
}

impl DeckError {
    /// Build a catalog error for a name or URI.
    pub fn catalog(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Catalog {
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DeckError>;
