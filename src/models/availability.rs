//! Availability wire models - what the backend reports as still free for a
//! date range.
//!
//! The backend computes availability; this crate only carries the numbers.
//! Screen availability arrives as a list keyed by screen-inventory id,
//! equipment availability as one object with a field per category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive calendar date range, no time component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First rental day
    pub start: NaiveDate,
    /// Last rental day (inclusive; may equal `start`)
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range without ordering checks; callers validate separately.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Equipment categories tracked alongside screen area.
///
/// Wire names are the snake_case keys of the equipment-availability
/// response: `laptops`, `video_processors`, `cables`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Laptops,
    VideoProcessors,
    Cables,
}

impl EquipmentCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Laptops, Self::VideoProcessors, Self::Cables];

    /// Human-readable label used in violation messages and summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Laptops => "laptops",
            Self::VideoProcessors => "video processors",
            Self::Cables => "cables",
        }
    }
}

/// Remaining capacity for one screen type across the requested range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenAvailability {
    /// Screen-inventory id this entry refers to
    pub id: i64,
    /// Area still free across every day of the range, in square metres
    pub max_available_for_period: f64,
    /// Total owned area of the type, for display alongside
    pub total_sqm_owned: f64,
}

/// Free/total counts for one equipment category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCounts {
    /// Units still free across the range
    pub available: i64,
    /// Units owned in total
    pub total: i64,
}

/// The equipment-availability response: one count pair per category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentAvailability {
    /// Laptop counts
    pub laptops: EquipmentCounts,
    /// Video processor counts
    pub video_processors: EquipmentCounts,
    /// Cable bundle counts
    pub cables: EquipmentCounts,
}

impl EquipmentAvailability {
    /// Counts for one category.
    #[must_use]
    pub const fn counts_for(&self, category: EquipmentCategory) -> EquipmentCounts {
        match category {
            EquipmentCategory::Laptops => self.laptops,
            EquipmentCategory::VideoProcessors => self.video_processors,
            EquipmentCategory::Cables => self.cables,
        }
    }
}
