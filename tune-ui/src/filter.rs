//! Client-side list filtering
//!
//! One pure predicate shared by all three entity kinds. Filtering never
//! triggers a round trip; it is re-evaluated synchronously over the
//! in-memory snapshot.

use tune_common::model::CatalogEntity;

/// Single-field, case-insensitive substring match.
///
/// An empty query or no selected field leaves the filter inert (every
/// entity matches). Numeric fields are matched against their decimal
/// string, so "197" matches 1970 as well as 1975. An absent reference
/// field is simply non-matching, never an evaluation error.
pub fn matches<E: CatalogEntity>(entity: &E, field: Option<E::Field>, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let Some(field) = field else {
        return true;
    };

    match entity.field_text(field) {
        Some(text) => text.to_lowercase().contains(&query.to_lowercase()),
        None => false,
    }
}
