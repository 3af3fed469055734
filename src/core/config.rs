//! Conversion configuration.
//!
//! - `CardSize`: which catalog image size to fetch and its pixel dimensions
//! - `CardBacks`: the shared back image and the token ("ad") backs
//! - `ConversionConfig`: everything a run needs, with builder-style setters
//!
//! Configs are plain serde structs, so callers can keep them in JSON.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{DeckError, Result};

/// Catalog image size tag plus the pixel size of one face at that tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSize {
    /// Key into a card's image URI set (e.g. "normal").
    pub tag: String,
    pub width: u32,
    pub height: u32,
}

impl CardSize {
    /// Create a size with an explicit tag and dimensions.
    pub fn new(tag: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            tag: tag.into(),
            width,
            height,
        }
    }

    pub fn small() -> Self {
        Self::new("small", 146, 204)
    }

    pub fn normal() -> Self {
        Self::new("normal", 488, 680)
    }

    pub fn large() -> Self {
        Self::new("large", 672, 936)
    }

    pub fn png() -> Self {
        Self::new("png", 745, 1040)
    }

    pub fn border_crop() -> Self {
        Self::new("border_crop", 480, 680)
    }

    /// Look up a preset by its tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "small" => Ok(Self::small()),
            "normal" => Ok(Self::normal()),
            "large" => Ok(Self::large()),
            "png" => Ok(Self::png()),
            "border_crop" => Ok(Self::border_crop()),
            other => Err(DeckError::UnknownCardSize(other.to_string())),
        }
    }
}

impl Default for CardSize {
    fn default() -> Self {
        Self::normal()
    }
}

/// Back images used by the scene document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBacks {
    /// Back used almost always.
    pub primary: String,
    /// Rare alternate back.
    pub alternate: String,
    /// Backs for token decks, one picked per sheet.
    pub token_backs: Vec<String>,
}

const PRIMARY_BACK: &str = "https://www.dropbox.com/s/9aecuelfwga8bv4/back_1.jpg?dl=1";
const ALTERNATE_BACK: &str = "https://www.dropbox.com/s/ral1ldk9odsycqd/back_2.jpg?dl=1";

const TOKEN_BACKS: [&str; 12] = [
    "https://www.dropbox.com/s/jbnpcn4xs14myot/token_1.jpg?dl=1",
    "https://www.dropbox.com/s/7lvnf1z6paj6ds9/token_2.jpg?dl=1",
    "https://www.dropbox.com/s/pb4um3zm56i2nuj/token_3.jpg?dl=1",
    "https://www.dropbox.com/s/xx14lh7qty4x9a2/token_4.jpg?dl=1",
    "https://www.dropbox.com/s/p512mi23b3ptb4h/token_5.jpg?dl=1",
    "https://www.dropbox.com/s/w0ro7596gp5kk05/token_6.jpg?dl=1",
    "https://www.dropbox.com/s/dobryp84n34tjha/token_7.jpg?dl=1",
    "https://www.dropbox.com/s/a5sahr1jmuk51h8/token_8.jpg?dl=1",
    "https://www.dropbox.com/s/ss0pch8fdnv3f5i/token_9.jpg?dl=1",
    "https://www.dropbox.com/s/tw03iokf84smj74/token_10.jpg?dl=1",
    "https://www.dropbox.com/s/xk4bo87zp4aoq59/token_11.jpg?dl=1",
    "https://www.dropbox.com/s/ckvcduv45ha9e3x/token_12.jpg?dl=1",
];

impl Default for CardBacks {
    fn default() -> Self {
        Self {
            primary: PRIMARY_BACK.to_string(),
            alternate: ALTERNATE_BACK.to_string(),
            token_backs: TOKEN_BACKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Complete configuration for one conversion run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Image size to fetch and the sheet cell size.
    pub card_size: CardSize,

    /// Seed for cosmetic back selection.
    pub seed: u64,

    /// Directory the scene document is written to.
    pub output_dir: PathBuf,

    /// Minimum time between two image fetches, in milliseconds.
    pub fetch_interval_ms: u64,

    /// Back images.
    pub backs: CardBacks,

    /// Prefix for uploaded sheet file names.
    pub sheet_prefix: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            card_size: CardSize::default(),
            seed: 0,
            output_dir: PathBuf::from("."),
            fetch_interval_ms: 100,
            backs: CardBacks::default(),
            sheet_prefix: "TTS".to_string(),
        }
    }
}

impl ConversionConfig {
    #[must_use]
    pub fn with_card_size(mut self, size: CardSize) -> Self {
        self.card_size = size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_fetch_interval(mut self, interval: Duration) -> Self {
        self.fetch_interval_ms = interval.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_backs(mut self, backs: CardBacks) -> Self {
        self.backs = backs;
        self
    }

    #[must_use]
    pub fn with_sheet_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sheet_prefix = prefix.into();
        self
    }

    /// Minimum interval between image fetches.
    #[must_use]
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_millis(self.fetch_interval_ms)
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
