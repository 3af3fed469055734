//! Card records as returned by the catalog.
//!
//! A `Card` is immutable once fetched. Only the fields the converter reads are
//! modelled; unknown catalog fields are ignored on deserialization.
//!
//! ```
//! use tts_deck::cards::{Card, Layout};
//! use tts_deck::core::IdSpace;
//!
//! let delver = Card::new("d1", "Delver of Secrets")
//!     .with_layout(Layout::Transform);
//!
//! assert_eq!(delver.id_space(), IdSpace::DoubleFaced);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::error::{DeckError, Result};
use crate::core::ids::IdSpace;

/// Image URIs keyed by size tag ("small", "normal", "large", ...).
pub type ImageUris = BTreeMap<String, String>;

/// Physical layout of a card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layout {
    #[default]
    Normal,
    Token,
    Emblem,
    Meld,
    Transform,
    DoubleFacedToken,
    /// Any other catalog layout (split, flip, saga, ...). Treated as single-faced.
    Other(String),
}

impl Layout {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Layout::Normal => "normal",
            Layout::Token => "token",
            Layout::Emblem => "emblem",
            Layout::Meld => "meld",
            Layout::Transform => "transform",
            Layout::DoubleFacedToken => "double_faced_token",
            Layout::Other(s) => s,
        }
    }

    /// Layouts rendered as a front/back sheet pair.
    #[must_use]
    pub fn is_double_faced(&self) -> bool {
        matches!(self, Layout::Transform | Layout::DoubleFacedToken)
    }
}

impl From<String> for Layout {
    fn from(s: String) -> Self {
        match s.as_str() {
            "normal" => Layout::Normal,
            "token" => Layout::Token,
            "emblem" => Layout::Emblem,
            "meld" => Layout::Meld,
            "transform" => Layout::Transform,
            "double_faced_token" => Layout::DoubleFacedToken,
            _ => Layout::Other(s),
        }
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> Self {
        layout.as_str().to_string()
    }
}

/// Role of a related part.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartComponent {
    Token,
    ComboPiece,
    MeldPart,
    MeldResult,
    Other(String),
}

impl PartComponent {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PartComponent::Token => "token",
            PartComponent::ComboPiece => "combo_piece",
            PartComponent::MeldPart => "meld_part",
            PartComponent::MeldResult => "meld_result",
            PartComponent::Other(s) => s,
        }
    }
}

impl From<String> for PartComponent {
    fn from(s: String) -> Self {
        match s.as_str() {
            "token" => PartComponent::Token,
            "combo_piece" => PartComponent::ComboPiece,
            "meld_part" => PartComponent::MeldPart,
            "meld_result" => PartComponent::MeldResult,
            _ => PartComponent::Other(s),
        }
    }
}

impl From<PartComponent> for String {
    fn from(component: PartComponent) -> Self {
        component.as_str().to_string()
    }
}

/// Reference from a card to a related card (token, emblem, meld result, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPart {
    pub id: String,
    pub component: PartComponent,
    pub name: String,
    /// Catalog URI resolving to the related card.
    pub uri: String,
}

impl RelatedPart {
    pub fn new(
        id: impl Into<String>,
        component: PartComponent,
        name: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            component,
            name: name.into(),
            uri: uri.into(),
        }
    }

    /// Does this part go into the owning deck's token container?
    ///
    /// Tokens, emblems (listed as combo pieces named "... Emblem") and meld
    /// results do.
    #[must_use]
    pub fn belongs_in_tokens(&self) -> bool {
        match self.component {
            PartComponent::Token | PartComponent::MeldResult => true,
            PartComponent::ComboPiece => self.name.contains("Emblem"),
            _ => false,
        }
    }
}

/// One face of a multi-faced card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

impl CardFace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_uris: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, size: impl Into<String>, uri: impl Into<String>) -> Self {
        self.image_uris
            .get_or_insert_with(ImageUris::new)
            .insert(size.into(), uri.into());
        self
    }

    fn image_uri(&self, size: &str) -> Option<&str> {
        self.image_uris.as_ref()?.get(size).map(String::as_str)
    }
}

/// A catalog card record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Opaque catalog id, unique per printing.
    pub id: String,

    /// Display name.
    pub name: String,

    #[serde(default)]
    pub layout: Layout,

    /// Images for single-faced cards.
    #[serde(default)]
    pub image_uris: Option<ImageUris>,

    /// Faces for multi-faced cards.
    #[serde(default)]
    pub card_faces: SmallVec<[CardFace; 2]>,

    /// Related cards (tokens, meld parts, ...).
    #[serde(default)]
    pub all_parts: Vec<RelatedPart>,
}

impl Card {
    /// Create a normal-layout card with no images.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layout: Layout::Normal,
            image_uris: None,
            card_faces: SmallVec::new(),
            all_parts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_image(mut self, size: impl Into<String>, uri: impl Into<String>) -> Self {
        self.image_uris
            .get_or_insert_with(ImageUris::new)
            .insert(size.into(), uri.into());
        self
    }

    #[must_use]
    pub fn with_face(mut self, face: CardFace) -> Self {
        self.card_faces.push(face);
        self
    }

    #[must_use]
    pub fn with_part(mut self, part: RelatedPart) -> Self {
        self.all_parts.push(part);
        self
    }

    /// Id space this card is allocated in when it appears in a main list.
    #[must_use]
    pub fn id_space(&self) -> IdSpace {
        if self.layout.is_double_faced() {
            IdSpace::DoubleFaced
        } else {
            IdSpace::Simple
        }
    }

    /// Image for the card front.
    ///
    /// Falls back to the first face when the card has no top-level images.
    pub fn front_image_uri(&self, size: &str) -> Result<&str> {
        self.image_uris
            .as_ref()
            .and_then(|uris| uris.get(size))
            .map(String::as_str)
            .or_else(|| self.card_faces.first().and_then(|f| f.image_uri(size)))
            .ok_or_else(|| self.missing_image(0, size))
    }

    /// Image for a specific face.
    pub fn face_image_uri(&self, face: usize, size: &str) -> Result<&str> {
        self.card_faces
            .get(face)
            .and_then(|f| f.image_uri(size))
            .ok_or_else(|| self.missing_image(face, size))
    }

    /// Front and back images for a double-faced sheet pair.
    ///
    /// Cards with two imaged faces use face 0 and face 1. Anything else
    /// (meld cards in particular) shows its front on both sides.
    pub fn sheet_faces(&self, size: &str) -> Result<(&str, &str)> {
        if let (Ok(front), Ok(back)) = (self.face_image_uri(0, size), self.face_image_uri(1, size)) {
            return Ok((front, back));
        }
        let front = self.front_image_uri(size)?;
        Ok((front, front))
    }

    fn missing_image(&self, face: usize, size: &str) -> DeckError {
        DeckError::MissingImage {
            card: self.name.clone(),
            face,
            size: size.to_string(),
        }
    }
}
