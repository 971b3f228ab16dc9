//! Draft order state - the in-progress order being assembled by an operator.
//!
//! A draft mirrors the order form: header fields, equipment counts, and a
//! list of screen requirement rows. Everything here is synchronous and pure.
//! Derived values (row areas, order totals) are recomputed from the current
//! field values instead of being stored, so they can never drift out of sync
//! with the fields they depend on.

use crate::config::defaults::DraftDefaults;
use crate::errors::{Error, Result};
use crate::models::{
    DateRange, OrderHeaderPayload, OrderPayload, OrderRecord, ScreenRequirementPayload,
};
use chrono::NaiveDate;

/// Area of a single LED panel in square meters.
pub const PANEL_SQM: f64 = 1.0;

/// Largest panel grid accepted for one screen requirement.
pub const MAX_PANEL_ROWS: i64 = 50;

/// Largest panel column count accepted for one screen requirement.
pub const MAX_PANEL_COLUMNS: i64 = 100;

/// Derives a screen's area in square meters from its panel grid.
///
/// Grids within [`MAX_PANEL_ROWS`] and [`MAX_PANEL_COLUMNS`] stay far below
/// the range where an `i64` product loses precision as `f64`; anything
/// larger saturates rather than overflows.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn derive_sqm(rows: i64, columns: i64) -> f64 {
    rows.saturating_mul(columns) as f64 * PANEL_SQM
}

/// One screen requirement row on the draft form.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRow {
    /// Selected screen inventory item, once the operator has picked one.
    pub screen_inventory_id: Option<i64>,
    /// Panel rows in the grid.
    pub dimensions_rows: i64,
    /// Panel columns in the grid.
    pub dimensions_columns: i64,
    /// Area derived from the grid. Updated by the row setters, never directly.
    pub sqm_required: f64,
}

impl ScreenRow {
    /// Creates a row pre-filled with the configured default grid.
    #[must_use]
    pub fn with_defaults(defaults: &DraftDefaults) -> Self {
        Self {
            screen_inventory_id: None,
            dimensions_rows: defaults.grid_rows,
            dimensions_columns: defaults.grid_columns,
            sqm_required: derive_sqm(defaults.grid_rows, defaults.grid_columns),
        }
    }

    /// True when the row names a screen and spans a usable grid.
    ///
    /// Only complete rows are checked against the grid bounds and sent to
    /// the backend; abandoned rows are dropped from the payload.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.screen_inventory_id.is_some()
            && self.dimensions_rows > 0
            && self.dimensions_columns > 0
            && self.sqm_required > 0.0
    }
}

/// Derived area and money totals for a draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    /// Sum of the derived areas across every screen requirement row.
    pub total_sqm: f64,
    /// Final order amount: the manual override when enabled, otherwise
    /// area times price per square meter.
    pub total_amount: f64,
}

/// The in-progress order being assembled by an operator.
///
/// Header fields are plain public fields; rows are manipulated through the
/// row methods so the derived-area invariant and the at-least-one-row
/// invariant always hold.
#[derive(Debug, Clone)]
pub struct DraftOrder {
    /// Backend id of the order being edited, `None` while creating.
    pub id: Option<i64>,
    /// Event location name.
    pub location_name: String,
    /// Google Maps link for the location; empty means not provided.
    pub google_maps_link: String,
    /// First rental day.
    pub start_date: Option<NaiveDate>,
    /// Last rental day, inclusive.
    pub end_date: Option<NaiveDate>,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Employee responsible for installation.
    pub installing_assignee_id: Option<i64>,
    /// Employee responsible for disassembly.
    pub disassemble_assignee_id: Option<i64>,
    /// Third-party company involved in the rental, when any.
    pub third_party_provider_id: Option<i64>,
    /// Laptops requested for the rental period.
    pub laptops_needed: i64,
    /// Video processors requested for the rental period.
    pub video_processors_needed: i64,
    /// Proposed rental price per square meter.
    pub price_per_sqm: f64,
    /// When true, `manual_total_amount` overrides the computed total.
    pub manual_total: bool,
    /// Operator-entered total, only meaningful while `manual_total` is set.
    pub manual_total_amount: f64,
    /// Free-form notes.
    pub notes: String,
    /// Screen requirement rows; never empty.
    rows: Vec<ScreenRow>,
    /// Starting values applied to newly added rows.
    defaults: DraftDefaults,
}

impl DraftOrder {
    /// Creates an empty draft with one default screen requirement row.
    #[must_use]
    pub fn new(defaults: &DraftDefaults) -> Self {
        Self {
            id: None,
            location_name: String::new(),
            google_maps_link: String::new(),
            start_date: None,
            end_date: None,
            due_date: None,
            installing_assignee_id: None,
            disassemble_assignee_id: None,
            third_party_provider_id: None,
            laptops_needed: defaults.laptops_needed,
            video_processors_needed: defaults.video_processors_needed,
            price_per_sqm: defaults.price_per_sqm,
            manual_total: false,
            manual_total_amount: 0.0,
            notes: String::new(),
            rows: vec![ScreenRow::with_defaults(defaults)],
            defaults: defaults.clone(),
        }
    }

    /// Hydrates a draft from a stored order so it can be edited.
    ///
    /// Row areas are re-derived from the stored grids rather than trusted,
    /// keeping the derived-area invariant intact. An order stored without
    /// requirement rows still yields a draft with one default row.
    #[must_use]
    pub fn from_record(record: &OrderRecord, defaults: &DraftDefaults) -> Self {
        let mut rows: Vec<ScreenRow> = record
            .screen_requirements
            .iter()
            .map(|req| ScreenRow {
                screen_inventory_id: Some(req.screen_inventory_id),
                dimensions_rows: req.dimensions_rows,
                dimensions_columns: req.dimensions_columns,
                sqm_required: derive_sqm(req.dimensions_rows, req.dimensions_columns),
            })
            .collect();
        if rows.is_empty() {
            rows.push(ScreenRow::with_defaults(defaults));
        }

        Self {
            id: Some(record.id),
            location_name: record.location_name.clone(),
            google_maps_link: record.google_maps_link.clone().unwrap_or_default(),
            start_date: Some(record.start_date),
            end_date: Some(record.end_date),
            due_date: record.due_date,
            installing_assignee_id: record.installing_assignee_id,
            disassemble_assignee_id: record.disassemble_assignee_id,
            third_party_provider_id: record.third_party_provider_id,
            laptops_needed: record.laptops_needed,
            video_processors_needed: record.video_processors_needed,
            price_per_sqm: record.price_per_sqm,
            manual_total: record.manual_total,
            manual_total_amount: if record.manual_total {
                record.total_amount
            } else {
                0.0
            },
            notes: record.notes.clone(),
            rows,
            defaults: defaults.clone(),
        }
    }

    /// True when this draft edits an existing order rather than creating one.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// The screen requirement rows, in form order.
    #[must_use]
    pub fn rows(&self) -> &[ScreenRow] {
        &self.rows
    }

    /// Appends a new row pre-filled with the default grid.
    pub fn add_row(&mut self) {
        self.rows.push(ScreenRow::with_defaults(&self.defaults));
    }

    /// Removes the row at `index`.
    ///
    /// # Errors
    /// Returns an error if the index is out of range or this is the only
    /// remaining row; a draft always keeps at least one.
    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(Error::RowOutOfRange { index });
        }
        if self.rows.len() == 1 {
            return Err(Error::LastScreenRow);
        }
        self.rows.remove(index);
        Ok(())
    }

    /// Sets the panel grid of the row at `index`, re-deriving its area.
    ///
    /// # Errors
    /// Returns an error if the index is out of range.
    pub fn set_row_dimensions(&mut self, index: usize, rows: i64, columns: i64) -> Result<()> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(Error::RowOutOfRange { index })?;
        row.dimensions_rows = rows;
        row.dimensions_columns = columns;
        row.sqm_required = derive_sqm(rows, columns);
        Ok(())
    }

    /// Selects (or clears) the screen inventory item of the row at `index`.
    ///
    /// # Errors
    /// Returns an error if the index is out of range.
    pub fn set_row_screen(&mut self, index: usize, screen_inventory_id: Option<i64>) -> Result<()> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(Error::RowOutOfRange { index })?;
        row.screen_inventory_id = screen_inventory_id;
        Ok(())
    }

    /// The rental period, once both dates have been entered.
    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.start_date?, self.end_date?))
    }

    /// Computes the current area and money totals.
    ///
    /// Every row contributes its derived area, selected or not, matching
    /// what the form displays while the operator is still filling rows in.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        let total_sqm: f64 = self.rows.iter().map(|row| row.sqm_required).sum();
        let total_amount = if self.manual_total {
            self.manual_total_amount
        } else {
            total_sqm * self.price_per_sqm
        };
        OrderTotals {
            total_sqm,
            total_amount,
        }
    }

    /// Builds the submission payload from this draft and the rows that
    /// passed validation.
    ///
    /// # Errors
    /// Returns an error if a field required by the backend is still unset;
    /// callers are expected to validate the draft first.
    pub fn to_payload(&self, valid_rows: &[ScreenRow]) -> Result<OrderPayload> {
        let missing = |field: &str| Error::Config {
            message: format!("Cannot build order payload: {field} is not set"),
        };

        let screen_requirements = valid_rows
            .iter()
            .map(|row| {
                Ok(ScreenRequirementPayload {
                    screen_inventory_id: row
                        .screen_inventory_id
                        .ok_or_else(|| missing("screen inventory item"))?,
                    sqm_required: row.sqm_required,
                    dimensions_rows: row.dimensions_rows,
                    dimensions_columns: row.dimensions_columns,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let order = OrderHeaderPayload {
            location_name: self.location_name.trim().to_string(),
            google_maps_link: if self.google_maps_link.trim().is_empty() {
                None
            } else {
                Some(self.google_maps_link.trim().to_string())
            },
            start_date: self.start_date.ok_or_else(|| missing("start date"))?,
            end_date: self.end_date.ok_or_else(|| missing("end date"))?,
            due_date: self.due_date,
            installing_assignee_id: self
                .installing_assignee_id
                .ok_or_else(|| missing("installing assignee"))?,
            disassemble_assignee_id: self
                .disassemble_assignee_id
                .ok_or_else(|| missing("disassembly assignee"))?,
            third_party_provider_id: self.third_party_provider_id,
            laptops_needed: self.laptops_needed,
            video_processors_needed: self.video_processors_needed,
            price_per_sqm: self.price_per_sqm,
            manual_total: self.manual_total,
            total_amount: self.totals().total_amount,
            notes: if self.notes.trim().is_empty() {
                None
            } else {
                Some(self.notes.clone())
            },
        };

        Ok(OrderPayload {
            order,
            screen_requirements,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::ScreenRequirementRecord;

    fn defaults() -> DraftDefaults {
        DraftDefaults::default()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_derive_sqm_from_grid() {
        assert_eq!(derive_sqm(8, 12), 96.0);
        assert_eq!(derive_sqm(1, 1), 1.0);
        assert_eq!(derive_sqm(MAX_PANEL_ROWS, MAX_PANEL_COLUMNS), 5000.0);
    }

    #[test]
    fn test_new_draft_starts_with_one_default_row() {
        let draft = DraftOrder::new(&defaults());
        assert_eq!(draft.rows().len(), 1);
        assert_eq!(draft.rows()[0].dimensions_rows, 8);
        assert_eq!(draft.rows()[0].dimensions_columns, 12);
        assert_eq!(draft.rows()[0].sqm_required, 96.0);
        assert!(draft.rows()[0].screen_inventory_id.is_none());
        assert_eq!(draft.laptops_needed, 1);
        assert_eq!(draft.video_processors_needed, 1);
        assert_eq!(draft.price_per_sqm, 150.0);
        assert!(!draft.is_edit());
    }

    #[test]
    fn test_totals_derive_from_rows_and_price() {
        let mut draft = DraftOrder::new(&defaults());
        draft.location_name = "Expo Hall".to_string();
        draft.start_date = Some(date(2025, 3, 1));
        draft.end_date = Some(date(2025, 3, 3));
        draft.set_row_screen(0, Some(1)).unwrap();
        draft.set_row_dimensions(0, 8, 12).unwrap();

        let totals = draft.totals();
        assert_eq!(totals.total_sqm, 96.0);
        assert_eq!(totals.total_amount, 14400.0);
    }

    #[test]
    fn test_manual_total_overrides_computed_amount() {
        let mut draft = DraftOrder::new(&defaults());
        draft.set_row_dimensions(0, 8, 12).unwrap();
        draft.manual_total = true;
        draft.manual_total_amount = 9999.0;

        let totals = draft.totals();
        assert_eq!(totals.total_sqm, 96.0);
        assert_eq!(totals.total_amount, 9999.0);

        // Switching the override off goes back to the computed amount.
        draft.manual_total = false;
        assert_eq!(draft.totals().total_amount, 96.0 * 150.0);
    }

    #[test]
    fn test_set_row_dimensions_rederives_area() {
        let mut draft = DraftOrder::new(&defaults());
        draft.set_row_dimensions(0, 10, 20).unwrap();
        assert_eq!(draft.rows()[0].sqm_required, 200.0);

        draft.set_row_dimensions(0, 3, 7).unwrap();
        assert_eq!(draft.rows()[0].sqm_required, 21.0);
    }

    #[test]
    fn test_oversized_grid_saturates_instead_of_overflowing() {
        let mut draft = DraftOrder::new(&defaults());
        draft.set_row_dimensions(0, i64::MAX, 2).unwrap();
        assert_eq!(draft.rows()[0].sqm_required, derive_sqm(i64::MAX, 1));
    }

    #[test]
    fn test_add_and_remove_rows() {
        let mut draft = DraftOrder::new(&defaults());
        draft.add_row();
        draft.add_row();
        assert_eq!(draft.rows().len(), 3);

        draft.remove_row(1).unwrap();
        assert_eq!(draft.rows().len(), 2);

        let result = draft.remove_row(5);
        assert!(matches!(result, Err(Error::RowOutOfRange { index: 5 })));
    }

    #[test]
    fn test_last_row_cannot_be_removed() {
        let mut draft = DraftOrder::new(&defaults());
        let result = draft.remove_row(0);
        assert!(matches!(result, Err(Error::LastScreenRow)));
        assert_eq!(draft.rows().len(), 1);
    }

    #[test]
    fn test_row_setters_reject_out_of_range_index() {
        let mut draft = DraftOrder::new(&defaults());
        assert!(matches!(
            draft.set_row_dimensions(1, 4, 4),
            Err(Error::RowOutOfRange { index: 1 })
        ));
        assert!(matches!(
            draft.set_row_screen(1, Some(3)),
            Err(Error::RowOutOfRange { index: 1 })
        ));
    }

    #[test]
    fn test_date_range_requires_both_dates() {
        let mut draft = DraftOrder::new(&defaults());
        assert!(draft.date_range().is_none());

        draft.start_date = Some(date(2025, 3, 1));
        assert!(draft.date_range().is_none());

        draft.end_date = Some(date(2025, 3, 3));
        let range = draft.date_range().unwrap();
        assert_eq!(range.start, date(2025, 3, 1));
        assert_eq!(range.end, date(2025, 3, 3));
    }

    #[test]
    fn test_from_record_hydrates_and_rederives_areas() {
        let record = OrderRecord {
            id: 42,
            order_id: Some("ORD-2025-0042".to_string()),
            location_name: "Expo Hall".to_string(),
            google_maps_link: Some("https://maps.example.com/expo".to_string()),
            start_date: date(2025, 3, 1),
            end_date: date(2025, 3, 3),
            due_date: Some(date(2025, 3, 10)),
            installing_assignee_id: Some(7),
            disassemble_assignee_id: Some(8),
            third_party_provider_id: None,
            laptops_needed: 2,
            video_processors_needed: 1,
            price_per_sqm: 150.0,
            manual_total: false,
            total_amount: 14400.0,
            notes: "loading dock B".to_string(),
            screen_requirements: vec![ScreenRequirementRecord {
                screen_inventory_id: 1,
                sqm_required: 90.0, // stale stored area
                dimensions_rows: 8,
                dimensions_columns: 12,
            }],
        };

        let draft = DraftOrder::from_record(&record, &defaults());
        assert!(draft.is_edit());
        assert_eq!(draft.id, Some(42));
        assert_eq!(draft.location_name, "Expo Hall");
        assert_eq!(draft.rows().len(), 1);
        assert_eq!(draft.rows()[0].screen_inventory_id, Some(1));
        // Area comes from the grid, not the stored value.
        assert_eq!(draft.rows()[0].sqm_required, 96.0);

        // With price and rows untouched, the stored total is reproduced.
        let totals = draft.totals();
        assert_eq!(totals.total_amount, record.total_amount);
    }

    #[test]
    fn test_from_record_without_rows_gets_default_row() {
        let record = OrderRecord {
            id: 9,
            order_id: None,
            location_name: "Warehouse".to_string(),
            google_maps_link: None,
            start_date: date(2025, 5, 1),
            end_date: date(2025, 5, 2),
            due_date: None,
            installing_assignee_id: None,
            disassemble_assignee_id: None,
            third_party_provider_id: None,
            laptops_needed: 1,
            video_processors_needed: 1,
            price_per_sqm: 100.0,
            manual_total: true,
            total_amount: 2500.0,
            notes: String::new(),
            screen_requirements: vec![],
        };

        let draft = DraftOrder::from_record(&record, &defaults());
        assert_eq!(draft.rows().len(), 1);
        assert!(draft.rows()[0].screen_inventory_id.is_none());
        assert!(draft.manual_total);
        assert_eq!(draft.manual_total_amount, 2500.0);
    }

    #[test]
    fn test_to_payload_maps_fields_and_valid_rows() {
        let mut draft = DraftOrder::new(&defaults());
        draft.location_name = "Expo Hall".to_string();
        draft.start_date = Some(date(2025, 3, 1));
        draft.end_date = Some(date(2025, 3, 3));
        draft.installing_assignee_id = Some(7);
        draft.disassemble_assignee_id = Some(8);
        draft.set_row_screen(0, Some(1)).unwrap();

        let valid_rows: Vec<ScreenRow> = draft.rows().to_vec();
        let payload = draft.to_payload(&valid_rows).unwrap();

        assert_eq!(payload.order.location_name, "Expo Hall");
        assert_eq!(payload.order.google_maps_link, None);
        assert_eq!(payload.order.installing_assignee_id, 7);
        assert_eq!(payload.order.total_amount, 14400.0);
        assert_eq!(payload.screen_requirements.len(), 1);
        assert_eq!(payload.screen_requirements[0].screen_inventory_id, 1);
        assert_eq!(payload.screen_requirements[0].sqm_required, 96.0);
    }

    #[test]
    fn test_to_payload_requires_dates_and_assignees() {
        let draft = DraftOrder::new(&defaults());
        let result = draft.to_payload(&[]);
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
