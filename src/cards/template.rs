//! Card templates - immutable card data.
//!
//! A `CardTemplate` holds the unchanging properties of a card: name,
//! sector, power rating, rarity, and matchup sectors. Per-battle mutable
//! state (health, power modifier, lock flag) lives on `Card`, created
//! when a template is dealt into a hand.

use serde::{Deserialize, Serialize};

use crate::core::EngineConfig;

use super::instance::Card;

/// Unique identifier for a card instance within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card rarity. Each rarity maps 1:1 to an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Limited,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Limited => "Limited",
        };
        write!(f, "{name}")
    }
}

/// A market sector - the card's category for the matchup relation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sector(String);

impl Sector {
    /// Create a new sector.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the sector name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Sector {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static card template.
///
/// `ovr` is the overall power rating; it doubles as the play cost.
///
/// ## Example
///
/// ```
/// use stock_wars::cards::{CardTemplate, Rarity};
///
/// let card = CardTemplate::new("TechCorp", "Tech", 50, Rarity::Common)
///     .strong_against("Finance")
///     .resistant_to("Energy");
///
/// assert_eq!(card.ovr, 50);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Card name (for display/debugging).
    pub name: String,

    /// The card's sector.
    pub sector: Sector,

    /// Overall power rating; also the play cost.
    pub ovr: i64,

    /// Rarity; determines the card's ability.
    pub rarity: Rarity,

    /// Sector this card attacks with advantage, if any.
    pub strong_against: Option<Sector>,

    /// Sector this card attacks with disadvantage, if any.
    pub resistant_to: Option<Sector>,
}

impl CardTemplate {
    /// Create a new card template.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        sector: impl Into<Sector>,
        ovr: i64,
        rarity: Rarity,
    ) -> Self {
        Self {
            name: name.into(),
            sector: sector.into(),
            ovr,
            rarity,
            strong_against: None,
            resistant_to: None,
        }
    }

    /// Set the advantaged matchup sector (builder pattern).
    #[must_use]
    pub fn strong_against(mut self, sector: impl Into<Sector>) -> Self {
        self.strong_against = Some(sector.into());
        self
    }

    /// Set the disadvantaged matchup sector (builder pattern).
    #[must_use]
    pub fn resistant_to(mut self, sector: impl Into<Sector>) -> Self {
        self.resistant_to = Some(sector.into());
        self
    }

    /// Instantiate this template as a battle card.
    ///
    /// Instance health is derived from OVR via the config.
    #[must_use]
    pub fn deal(&self, id: CardId, config: &EngineConfig) -> Card {
        Card::from_template(id, self, config)
    }
}

impl From<String> for Sector {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Card(7)");
    }

    #[test]
    fn test_sector_equality() {
        assert_eq!(Sector::new("Tech"), Sector::from("Tech"));
        assert_ne!(Sector::new("Tech"), Sector::new("Finance"));
    }

    #[test]
    fn test_template_builder() {
        let template = CardTemplate::new("OilCo", "Energy", 40, Rarity::Epic)
            .strong_against("Tech")
            .resistant_to("Finance");

        assert_eq!(template.name, "OilCo");
        assert_eq!(template.ovr, 40);
        assert_eq!(template.rarity, Rarity::Epic);
        assert_eq!(template.strong_against, Some(Sector::new("Tech")));
        assert_eq!(template.resistant_to, Some(Sector::new("Finance")));
    }

    #[test]
    fn test_deal_derives_health() {
        let config = EngineConfig::default();
        let template = CardTemplate::new("TechCorp", "Tech", 50, Rarity::Common);

        let card = template.deal(CardId::new(1), &config);

        assert_eq!(card.id, CardId::new(1));
        assert_eq!(card.current_health, 50 * config.health_per_ovr);
        assert_eq!(card.power_modifier, 0);
        assert!(!card.locked);
    }

    #[test]
    fn test_template_serialization() {
        let template = CardTemplate::new("Bank", "Finance", 30, Rarity::Rare);

        let json = serde_json::to_string(&template).unwrap();
        let deserialized: CardTemplate = serde_json::from_str(&json).unwrap();

        assert_eq!(template, deserialized);
    }
}
