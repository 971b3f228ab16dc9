/// Availability snapshot cache and refresh flow
pub mod availability;

/// Draft order state and derived totals
pub mod draft;

/// Draft inventory items for the add-item dialog
pub mod inventory;

/// Collect-all validation of a draft order
pub mod validation;
