//! Directory read models - the lists that populate the order form's selects.
//!
//! Employees, third-party companies, and the owned screen-type inventory are
//! fetched read-only with `active_only=true`; the crate never mutates them.

use serde::{Deserialize, Serialize};

/// An employee who can be assigned to install or disassemble a screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier
    pub id: i64,
    /// Display name, e.g. "Ana Petrova"
    pub full_name: String,
    /// Role label, e.g. "technician" or "manager"
    pub role: String,
}

/// A third-party provider company an order can be brokered through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier
    pub id: i64,
    /// Company name
    pub name: String,
    /// Contact person at the company, if registered
    #[serde(default)]
    pub contact_person: Option<String>,
}

/// One screen type the business owns, e.g. "P2.6 Indoor".
///
/// `pixel_pitch` drives the homogeneity rule: one order may only combine
/// screen types sharing a single pitch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenInventoryItem {
    /// Unique identifier, referenced by screen-requirement rows
    pub id: i64,
    /// Human-readable type name
    pub screen_type: String,
    /// Physical pixel spacing in millimetres
    pub pixel_pitch: f64,
    /// Area not currently reserved, in square metres
    pub available_sqm: f64,
    /// Total area of this type the business owns
    pub total_sqm_owned: f64,
}

/// One autocomplete suggestion for the location field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    /// Venue name as previously booked
    pub location_name: String,
    /// Stored maps link for the venue, if any
    #[serde(default)]
    pub google_maps_link: Option<String>,
}
