//! Collect-all validation of a draft order.
//!
//! Validation never mutates the draft and never talks to the network. One
//! pass walks every rule and collects human-readable violations, so the
//! operator sees the full list at once instead of fixing one problem per
//! attempt. Availability ceilings come from the cached snapshot; a ceiling
//! whose data is missing from the cache is skipped, not failed.

use crate::core::availability::AvailabilityCache;
use crate::core::draft::{DraftOrder, MAX_PANEL_COLUMNS, MAX_PANEL_ROWS, ScreenRow};
use crate::models::{EquipmentCategory, ScreenInventoryItem};

/// Everything one validation pass found.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Human-readable violations, in form order.
    pub violations: Vec<String>,
    /// Rows complete enough to submit, in form order.
    pub valid_rows: Vec<ScreenRow>,
}

impl ValidationOutcome {
    /// True when the draft can be submitted.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validates a draft against the directories and the availability snapshot.
///
/// Rules are checked in form order: header fields, equipment counts, then
/// the screen requirement rows. Incomplete rows are not themselves
/// violations; only a draft with no complete row at all is rejected.
#[must_use]
pub fn validate(
    draft: &DraftOrder,
    inventory: &[ScreenInventoryItem],
    availability: &AvailabilityCache,
) -> ValidationOutcome {
    let mut violations = Vec::new();

    if draft.location_name.trim().is_empty() {
        violations.push("Location name is required".to_string());
    }

    if draft.start_date.is_none() {
        violations.push("Start date is required".to_string());
    }
    if draft.end_date.is_none() {
        violations.push("End date is required".to_string());
    }
    if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
        if end < start {
            violations.push("End date cannot be before start date".to_string());
        }
    }

    if draft.installing_assignee_id.is_none() {
        violations.push("Installing assignee is required".to_string());
    }
    if draft.disassemble_assignee_id.is_none() {
        violations.push("Disassembly assignee is required".to_string());
    }

    if draft.laptops_needed < 1 {
        violations.push("At least 1 laptop is required".to_string());
    } else if let Some(available) = availability.available_count_for(EquipmentCategory::Laptops) {
        if draft.laptops_needed > available {
            violations.push(format!(
                "Only {available} laptops available for this period (requested {})",
                draft.laptops_needed
            ));
        }
    }

    if draft.video_processors_needed < 1 {
        violations.push("At least 1 video processor is required".to_string());
    } else if let Some(available) =
        availability.available_count_for(EquipmentCategory::VideoProcessors)
    {
        if draft.video_processors_needed > available {
            violations.push(format!(
                "Only {available} video processors available for this period (requested {})",
                draft.video_processors_needed
            ));
        }
    }

    let mut valid_rows = Vec::new();
    for (index, row) in draft.rows().iter().enumerate() {
        // Abandoned rows are dropped from the payload, not reported.
        if !row.is_complete() {
            continue;
        }
        let position = index + 1;
        if row.dimensions_rows < 1 || row.dimensions_rows > MAX_PANEL_ROWS {
            violations.push(format!(
                "Screen requirement {position}: panel rows must be between 1 and {MAX_PANEL_ROWS}"
            ));
        }
        if row.dimensions_columns < 1 || row.dimensions_columns > MAX_PANEL_COLUMNS {
            violations.push(format!(
                "Screen requirement {position}: panel columns must be between 1 and {MAX_PANEL_COLUMNS}"
            ));
        }
        valid_rows.push(row.clone());
    }

    if valid_rows.is_empty() {
        violations.push("At least one complete screen requirement is needed".to_string());
    }

    for row in &valid_rows {
        let Some(screen_id) = row.screen_inventory_id else {
            continue;
        };
        let Some(available) = availability.available_area_for(screen_id) else {
            continue;
        };
        if row.sqm_required > available {
            let screen_type = inventory
                .iter()
                .find(|item| item.id == screen_id)
                .map_or_else(
                    || format!("screen type {screen_id}"),
                    |item| item.screen_type.clone(),
                );
            violations.push(format!(
                "Only {available} sqm of {screen_type} available for this period (requested {})",
                row.sqm_required
            ));
        }
    }

    if valid_rows.len() > 1 {
        let mut pitches: Vec<u64> = valid_rows
            .iter()
            .filter_map(|row| row.screen_inventory_id)
            .filter_map(|id| inventory.iter().find(|item| item.id == id))
            .map(|item| item.pixel_pitch.to_bits())
            .collect();
        pitches.sort_unstable();
        pitches.dedup();
        if pitches.len() > 1 {
            violations
                .push("All screens in one order must share the same pixel pitch".to_string());
        }
    }

    ValidationOutcome {
        violations,
        valid_rows,
    }
}
