//! Model module - Read and wire types for the backend's REST resources.
//! These mirror the JSON shapes the booking backend serves and accepts.
//! Derived fields and mutable form state live in `core`, not here.

pub mod availability;
pub mod directory;
pub mod order;

pub use availability::{
    DateRange, EquipmentAvailability, EquipmentCategory, EquipmentCounts, ScreenAvailability,
};
pub use directory::{Company, Employee, LocationSuggestion, ScreenInventoryItem};
pub use order::{
    OrderHeaderPayload, OrderPayload, OrderRecord, SavedOrder, SavedOrderEnvelope,
    ScreenRequirementPayload, ScreenRequirementRecord,
};
