//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable statistics of a printed card:
//! cost, strength, willpower, lore, type, and whether it can be inked.
//! Instance-specific data (damage, tapped, zone) lives in `CardInstance`.

use serde::{Deserialize, Serialize};

/// Catalog type tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardType {
    Character,
    /// One-shot card: resolves and goes straight to discard.
    Action,
    Item,
    Location,
    Other(String),
}

impl From<String> for CardType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Character" => CardType::Character,
            "Action" => CardType::Action,
            "Item" => CardType::Item,
            "Location" => CardType::Location,
            _ => CardType::Other(s),
        }
    }
}

impl From<CardType> for String {
    fn from(t: CardType) -> Self {
        match t {
            CardType::Character => "Character".into(),
            CardType::Action => "Action".into(),
            CardType::Item => "Item".into(),
            CardType::Location => "Location".into(),
            CardType::Other(s) => s,
        }
    }
}

/// Static card definition, as found in the catalog file.
///
/// ```
/// use inkgraph::cards::{CardDefinition, CardType};
///
/// let tipo = CardDefinition::new(1, "Tipo - Growing Son", CardType::Character)
///     .with_cost(2)
///     .with_stats(2, 3)
///     .with_lore(1)
///     .with_inkable(true);
///
/// assert!(tipo.is_character());
/// assert_eq!(tipo.normalized_name(), "tipo_growing_son");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Numeric catalog id.
    pub id: u32,

    /// Printed name, e.g. "Tinker Bell - Giant Fairy".
    #[serde(rename = "fullName")]
    pub full_name: String,

    #[serde(default)]
    pub cost: u32,

    #[serde(default)]
    pub strength: u32,

    #[serde(default)]
    pub willpower: u32,

    #[serde(default)]
    pub lore: u32,

    #[serde(rename = "type")]
    pub card_type: CardType,

    #[serde(rename = "inkwell", default)]
    pub inkable: bool,
}

impl CardDefinition {
    #[must_use]
    pub fn new(id: u32, full_name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            cost: 0,
            strength: 0,
            willpower: 0,
            lore: 0,
            card_type,
            inkable: false,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, strength: u32, willpower: u32) -> Self {
        self.strength = strength;
        self.willpower = willpower;
        self
    }

    #[must_use]
    pub fn with_lore(mut self, lore: u32) -> Self {
        self.lore = lore;
        self
    }

    #[must_use]
    pub fn with_inkable(mut self, inkable: bool) -> Self {
        self.inkable = inkable;
        self
    }

    /// Catalog lookup key (see [`super::normalize_card_name`]).
    #[must_use]
    pub fn normalized_name(&self) -> String {
        super::normalize_card_name(&self.full_name)
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        self.card_type == CardType::Character
    }

    #[must_use]
    pub fn is_action(&self) -> bool {
        self.card_type == CardType::Action
    }
}
