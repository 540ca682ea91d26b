//! Card catalog for content lookup.
//!
//! The `CardCatalog` owns every `CardData` of a match and hands out shared
//! references to it; cards built from the catalog never copy or modify
//! their data.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::card::Card;
use super::data::{CardData, CardId};
use super::error::CatalogError;
use crate::core::config::CardConfig;

/// Catalog of card content.
///
/// ## Example
///
/// ```
/// use card_battle::cards::{CardCatalog, CardData, CardId};
/// use card_battle::core::CardConfig;
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardData::battle(CardId::new(1), "Knight", "blue", 3, 7)).unwrap();
///
/// let card = catalog.create_card(CardId::new(1), &CardConfig::default()).unwrap();
/// assert_eq!(card.display_text(), "03/07");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Rc<CardData>>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON array of card data.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CardData> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for data in entries {
            catalog.register(data)?;
        }
        Ok(catalog)
    }

    /// Add card data. Ids must be unique.
    pub fn register(&mut self, data: CardData) -> Result<(), CatalogError> {
        if self.cards.contains_key(&data.id) {
            return Err(CatalogError::Duplicate(data.id));
        }
        self.cards.insert(data.id, Rc::new(data));
        Ok(())
    }

    /// Get card data by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<Rc<CardData>> {
        self.cards.get(&id).cloned()
    }

    /// Build a card entity for the given ID.
    pub fn create_card(&self, id: CardId, config: &CardConfig) -> Result<Card, CatalogError> {
        let data = self.get(id).ok_or(CatalogError::NotFound(id))?;
        Card::create(data, config).map_err(|source| CatalogError::Card { id, source })
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card data, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CardData> {
        self.cards.values().map(|data| data.as_ref())
    }
}
