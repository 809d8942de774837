//! Menu Item Model

use crate::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spice preference for spicy dishes (辣度)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
    ExtraHot,
}

impl SpiceLevel {
    /// All levels, mildest first
    pub const ALL: [SpiceLevel; 4] = [Self::Mild, Self::Medium, Self::Hot, Self::ExtraHot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Medium => "medium",
            Self::Hot => "hot",
            Self::ExtraHot => "extra_hot",
        }
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Menu item entity (菜品)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient::amount")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_spice_level: Option<SpiceLevel>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Spice preference a new cart line starts with.
    ///
    /// Non-spicy dishes carry none; spicy dishes without a configured
    /// default start at `Medium`.
    pub fn initial_spice_level(&self) -> Option<SpiceLevel> {
        if !self.is_spicy {
            return None;
        }
        Some(self.default_spice_level.unwrap_or(SpiceLevel::Medium))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> MenuItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_menu_item_defaults() {
        let m = item(json!({"id": 3, "name": "Dal Makhani", "price": "220"}));
        assert_eq!(m.id, "3");
        assert_eq!(m.price, 220.0);
        assert!(m.is_available);
        assert!(!m.is_spicy);
        assert_eq!(m.initial_spice_level(), None);
    }

    #[test]
    fn test_initial_spice_level() {
        let m = item(json!({
            "id": "m1", "name": "Vindaloo", "price": 340.0,
            "is_spicy": true, "default_spice_level": "hot"
        }));
        assert_eq!(m.initial_spice_level(), Some(SpiceLevel::Hot));

        let m = item(json!({"id": "m2", "name": "Tikka", "price": 300, "is_spicy": true}));
        assert_eq!(m.initial_spice_level(), Some(SpiceLevel::Medium));

        // A default on a non-spicy dish is ignored
        let m = item(json!({
            "id": "m3", "name": "Lassi", "price": 90, "default_spice_level": "mild"
        }));
        assert_eq!(m.initial_spice_level(), None);
    }

    #[test]
    fn test_spice_level_serde() {
        assert_eq!(
            serde_json::to_string(&SpiceLevel::ExtraHot).unwrap(),
            "\"extra_hot\""
        );
        let level: SpiceLevel = serde_json::from_str("\"mild\"").unwrap();
        assert_eq!(level, SpiceLevel::Mild);
        assert!(SpiceLevel::Mild < SpiceLevel::ExtraHot);
    }
}
