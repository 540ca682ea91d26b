//! Errors raised while building cards from content.

use thiserror::Error;

use super::data::CardId;
use super::stats::StatKey;

/// Card configuration errors.
///
/// These come from bad content (an unknown color, a misspelled type) and
/// abort card construction. They are meant to surface while authoring
/// content, not to be recovered from at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("unknown card type id: {0}")]
    UnknownCardType(String),

    #[error("key \"{0}\" not found in card data")]
    MissingStat(StatKey),
}

/// Errors raised by the card catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("card with id {0} already registered")]
    Duplicate(CardId),

    #[error("card {0} not found in catalog")]
    NotFound(CardId),

    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot build card {id}: {source}")]
    Card {
        id: CardId,
        #[source]
        source: CardError,
    },
}
