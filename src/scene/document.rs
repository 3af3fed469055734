//! Scene document model.
//!
//! Serializes to the simulator's saved-object JSON:
//! `{ "ObjectStates": [ ... ] }` where each state is a custom deck or a
//! single card.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Position, rotation and scale of an object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub pos_x: f64,
    pub pos_y: f64,
    pub pos_z: f64,
    pub rot_x: f64,
    pub rot_y: f64,
    pub rot_z: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub scale_z: f64,
}

impl Transform {
    /// Unit scale at the given position and rotation.
    #[must_use]
    pub fn at(position: [f64; 3], rotation: [f64; 3]) -> Self {
        Self {
            pos_x: position[0],
            pos_y: position[1],
            pos_z: position[2],
            rot_x: rotation[0],
            rot_y: rotation[1],
            rot_z: rotation[2],
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
        }
    }

    /// Face-down at the origin; used for cards inside a deck.
    #[must_use]
    pub fn face_down() -> Self {
        Self::at([0.0, 0.0, 0.0], [0.0, 180.0, 180.0])
    }
}

/// Object type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Card,
    DeckCustom,
}

/// One sheet referenced by a deck: grid size and face/back images.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomDeckEntry {
    pub num_width: u32,
    pub num_height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_back: Option<bool>,
    #[serde(rename = "FaceURL")]
    pub face_url: String,
    #[serde(rename = "BackURL")]
    pub back_url: String,
}

/// Sheets keyed by `CardID / 100`.
pub type CustomDeck = BTreeMap<u32, CustomDeckEntry>;

/// A card inside a deck container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainedObject {
    pub name: ObjectKind,
    pub nickname: String,
    pub transform: Transform,
    #[serde(rename = "CardID")]
    pub card_id: u32,
}

impl ContainedObject {
    pub fn card(nickname: impl Into<String>, card_id: u32) -> Self {
        Self {
            name: ObjectKind::Card,
            nickname: nickname.into(),
            transform: Transform::face_down(),
            card_id,
        }
    }
}

/// A top-level object: a deck container or a lone card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectState {
    pub transform: Transform,
    pub name: ObjectKind,
    pub nickname: String,
    #[serde(rename = "CardID", default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_deck: Option<CustomDeck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contained_objects: Option<Vec<ContainedObject>>,
    #[serde(rename = "DeckIDs", default, skip_serializing_if = "Option::is_none")]
    pub deck_ids: Option<Vec<u32>>,
}

impl ObjectState {
    /// A deck container holding `cards` in order.
    pub fn deck(
        nickname: impl Into<String>,
        transform: Transform,
        custom_deck: CustomDeck,
        cards: Vec<ContainedObject>,
    ) -> Self {
        let deck_ids = cards.iter().map(|c| c.card_id).collect();
        Self {
            transform,
            name: ObjectKind::DeckCustom,
            nickname: nickname.into(),
            card_id: None,
            custom_deck: Some(custom_deck),
            contained_objects: Some(cards),
            deck_ids: Some(deck_ids),
        }
    }

    /// A single card lying on the table.
    pub fn single_card(
        nickname: impl Into<String>,
        transform: Transform,
        custom_deck: CustomDeck,
        card_id: u32,
    ) -> Self {
        Self {
            transform,
            name: ObjectKind::Card,
            nickname: nickname.into(),
            card_id: Some(card_id),
            custom_deck: Some(custom_deck),
            contained_objects: None,
            deck_ids: None,
        }
    }
}

/// The whole saved-object document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SceneDocument {
    pub object_states: Vec<ObjectState>,
}
