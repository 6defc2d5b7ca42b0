//! Card catalog for definition lookup.
//!
//! The `CardCatalog` is the immutable reference table of per-card statistics.
//! Card nodes carry the normalized name of their definition as their label,
//! and every rule looks stats up through [`CardCatalog::get`]. A label with no
//! catalog entry is an error: it means corrupted state or a catalog/version
//! mismatch.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;

use super::definition::CardDefinition;
use crate::error::{EngineError, Result};

/// Convert `"Tinker Bell - Giant Fairy"` to `"tinker_bell_giant_fairy"`.
///
/// Lowercases and collapses each run of spaces and hyphens into a single
/// underscore.
#[must_use]
pub fn normalize_card_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.trim().chars() {
        if c == ' ' || c == '-' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.extend(c.to_lowercase());
    }

    out
}

#[derive(Deserialize)]
struct CatalogFile {
    cards: Vec<CardDefinition>,
}

/// Read-only catalog of card definitions, indexed by normalized name.
///
/// ```
/// use inkgraph::cards::{CardCatalog, CardDefinition, CardType};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDefinition::new(1, "Tipo - Growing Son", CardType::Character).with_lore(1));
///
/// let tipo = catalog.get("tipo_growing_son").unwrap();
/// assert_eq!(tipo.lore, 1);
/// assert!(catalog.get("stitch_rock_star").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, CardDefinition>,
}

impl CardCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document: `{"cards": [ {...}, ... ]}`.
    ///
    /// When two records normalize to the same name the later one wins.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for card in file.cards {
            catalog.register(card);
        }
        tracing::debug!(cards = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Register a definition under its normalized name.
    ///
    /// Returns the definition it replaced, if any.
    pub fn register(&mut self, card: CardDefinition) -> Option<CardDefinition> {
        self.cards.insert(card.normalized_name(), card)
    }

    /// Look up a definition by normalized name.
    pub fn get(&self, label: &str) -> Result<&CardDefinition> {
        self.cards.get(label).ok_or_else(|| EngineError::UnknownCard {
            name: label.to_string(),
        })
    }

    /// Look up by printed name (normalizing first).
    pub fn get_by_full_name(&self, full_name: &str) -> Result<&CardDefinition> {
        self.get(&normalize_card_name(full_name))
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.cards.contains_key(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}
