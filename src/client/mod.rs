//! Rental backend access.
//!
//! The dashboard keeps no data of its own; directories, availability, and
//! orders all live in the rental backend behind a REST API. [`Backend`] is
//! the seam the workflow layer depends on, and [`RestBackend`] is the
//! reqwest implementation of it. Tests substitute an in-memory backend so
//! no test performs network I/O.

/// reqwest implementation of the backend trait
pub mod rest;

pub use rest::RestBackend;

use crate::errors::Result;
use crate::models::{
    Company, DateRange, Employee, EquipmentAvailability, LocationSuggestion, OrderPayload,
    OrderRecord, SavedOrder, ScreenAvailability, ScreenInventoryItem,
};
use async_trait::async_trait;

/// Operations the dashboard needs from the rental backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Lists active employees for the assignee pickers.
    async fn list_employees(&self) -> Result<Vec<Employee>>;

    /// Lists active third-party companies.
    async fn list_companies(&self) -> Result<Vec<Company>>;

    /// Lists active screen inventory items.
    async fn list_screen_inventory(&self) -> Result<Vec<ScreenInventoryItem>>;

    /// Free area per screen for a rental period, minus what overlapping
    /// orders already hold. `exclude_order_id` leaves one order out of the
    /// overlap so editing an order does not count against itself.
    async fn screen_availability(
        &self,
        range: DateRange,
        exclude_order_id: Option<i64>,
    ) -> Result<Vec<ScreenAvailability>>;

    /// Equipment counts for a rental period, same exclusion semantics as
    /// [`Backend::screen_availability`].
    async fn equipment_availability(
        &self,
        range: DateRange,
        exclude_order_id: Option<i64>,
    ) -> Result<EquipmentAvailability>;

    /// Location-name suggestions for a partial query.
    async fn location_suggestions(&self, query: &str) -> Result<Vec<LocationSuggestion>>;

    /// Fetches a stored order so it can be edited.
    async fn fetch_order(&self, id: i64) -> Result<OrderRecord>;

    /// Creates a new order.
    async fn create_order(&self, payload: &OrderPayload) -> Result<SavedOrder>;

    /// Replaces an existing order.
    async fn update_order(&self, id: i64, payload: &OrderPayload) -> Result<SavedOrder>;
}
