//! Card catalog and data model.
//!
//! - `CardTemplate`: immutable card data, owned by the catalog
//! - `Card`: per-battle mutable instance state
//!
//! Deck construction and card-catalog seeding are presentation concerns;
//! the engine only sees templates dealt into hands.

mod instance;
mod template;

pub use instance::Card;
pub use template::{CardId, CardTemplate, Rarity, Sector};
