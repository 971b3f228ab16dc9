//! Draft inventory items for the add-item dialog.
//!
//! Screens and countable equipment are different shapes of inventory, so a
//! new item is carried as a tagged union and each variant validates its own
//! fields. Like order validation, the checks collect every violation in one
//! pass.

use crate::models::EquipmentCategory;
use serde::{Deserialize, Serialize};

/// A new inventory item being filled in by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InventoryItemDraft {
    /// An LED screen type, tracked by owned area.
    Screen(ScreenItemDraft),
    /// A countable equipment item such as laptops or cabling.
    Equipment(EquipmentItemDraft),
}

/// Fields of a new screen type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenItemDraft {
    /// Display name, e.g. "P2.6 Indoor".
    pub screen_type: String,
    /// Pixel pitch in millimeters.
    pub pixel_pitch: f64,
    /// Total owned area in square meters.
    pub total_sqm_owned: f64,
}

/// Fields of a new countable equipment item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItemDraft {
    /// Which equipment pool the units belong to.
    pub category: EquipmentCategory,
    /// Number of units being added.
    pub count: i64,
    /// Free-form model description; may be left empty.
    #[serde(default)]
    pub model: String,
}

impl InventoryItemDraft {
    /// Validates the draft, collecting every violation.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        match self {
            Self::Screen(screen) => screen.validate(),
            Self::Equipment(equipment) => equipment.validate(),
        }
    }
}

impl ScreenItemDraft {
    /// Checks the screen-specific rules.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if self.screen_type.trim().is_empty() {
            violations.push("Screen type name is required".to_string());
        }
        if self.pixel_pitch <= 0.0 {
            violations.push("Pixel pitch must be greater than zero".to_string());
        }
        if self.total_sqm_owned <= 0.0 {
            violations.push("Total owned area must be greater than zero".to_string());
        }
        violations
    }
}

impl EquipmentItemDraft {
    /// Checks the equipment-specific rules.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if self.count < 1 {
            violations.push("At least 1 unit is required".to_string());
        }
        violations
    }
}
