//! Order wire models - the shapes sent to and fetched from the orders
//! endpoints.
//!
//! `OrderRecord` is what `GET orders/{id}` returns and what edit mode
//! hydrates a draft from. `OrderPayload` is the create/update request body:
//! `{order: {...}, screen_requirements: [...]}` with numeric ids, ISO
//! `%Y-%m-%d` dates, and an explicit `null` (never `""`) for a missing due
//! date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored screen-requirement row as the backend returns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenRequirementRecord {
    /// Screen type this row reserves
    pub screen_inventory_id: i64,
    /// Reserved area in square metres
    pub sqm_required: f64,
    /// Panel grid height
    pub dimensions_rows: i64,
    /// Panel grid width
    pub dimensions_columns: i64,
}

/// A full order record fetched for edit mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Backend identity
    pub id: i64,
    /// Human order reference, e.g. "ORD-2025-0042"; carried opaquely
    #[serde(default)]
    pub order_id: Option<String>,
    /// Venue name
    pub location_name: String,
    /// Stored maps link, if any
    #[serde(default)]
    pub google_maps_link: Option<String>,
    /// First rental day
    pub start_date: NaiveDate,
    /// Last rental day
    pub end_date: NaiveDate,
    /// Payment due date, if agreed
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Employee assigned to installation
    #[serde(default)]
    pub installing_assignee_id: Option<i64>,
    /// Employee assigned to disassembly
    #[serde(default)]
    pub disassemble_assignee_id: Option<i64>,
    /// Brokering company, if any
    #[serde(default)]
    pub third_party_provider_id: Option<i64>,
    /// Laptops reserved for the order
    pub laptops_needed: i64,
    /// Video processors reserved for the order
    pub video_processors_needed: i64,
    /// Agreed rate per square metre
    pub price_per_sqm: f64,
    /// Whether the total was entered manually instead of computed
    #[serde(default)]
    pub manual_total: bool,
    /// Stored total amount
    pub total_amount: f64,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    /// The order's screen-requirement rows
    #[serde(default)]
    pub screen_requirements: Vec<ScreenRequirementRecord>,
}

/// One screen-requirement entry of the create/update body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenRequirementPayload {
    /// Screen type to reserve
    pub screen_inventory_id: i64,
    /// Area to reserve, derived from the grid
    pub sqm_required: f64,
    /// Panel grid height
    pub dimensions_rows: i64,
    /// Panel grid width
    pub dimensions_columns: i64,
}

/// The order header of the create/update body.
///
/// Optional fields serialize as explicit `null` so the backend clears them
/// on update rather than keeping stale values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderHeaderPayload {
    /// Venue name, trimmed
    pub location_name: String,
    /// Maps link or `null`
    pub google_maps_link: Option<String>,
    /// First rental day, ISO `%Y-%m-%d`
    pub start_date: NaiveDate,
    /// Last rental day, ISO `%Y-%m-%d`
    pub end_date: NaiveDate,
    /// Due date or `null` (never an empty string)
    pub due_date: Option<NaiveDate>,
    /// Installing employee id
    pub installing_assignee_id: i64,
    /// Disassembling employee id
    pub disassemble_assignee_id: i64,
    /// Brokering company id or `null`
    pub third_party_provider_id: Option<i64>,
    /// Laptops to reserve
    pub laptops_needed: i64,
    /// Video processors to reserve
    pub video_processors_needed: i64,
    /// Rate per square metre
    pub price_per_sqm: f64,
    /// Whether `total_amount` was entered manually
    pub manual_total: bool,
    /// Total amount, computed or manual per the draft's pricing mode
    pub total_amount: f64,
    /// Notes or `null`
    pub notes: Option<String>,
}

/// The create/update request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Order header fields
    pub order: OrderHeaderPayload,
    /// Valid screen-requirement rows only
    pub screen_requirements: Vec<ScreenRequirementPayload>,
}

/// The `{order: {...}}` envelope a successful create/update returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedOrderEnvelope {
    /// The saved order's identifiers
    pub order: SavedOrder,
}

/// Identifiers of a saved order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedOrder {
    /// Backend identity
    pub id: i64,
    /// Human order reference, if the backend assigns one
    #[serde(default)]
    pub order_id: Option<String>,
}
