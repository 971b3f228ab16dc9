//! Shared test utilities for the order dashboard.
//!
//! This module provides an in-memory fake backend plus helpers for building
//! the drafts, directories, and availability snapshots tests exercise.

#![allow(clippy::unwrap_used)]

use crate::client::Backend;
use crate::config::defaults::DraftDefaults;
use crate::core::availability::{AvailabilityCache, AvailabilitySnapshot};
use crate::core::draft::DraftOrder;
use crate::errors::{Error, Result};
use crate::models::{
    Company, DateRange, Employee, EquipmentAvailability, EquipmentCounts, LocationSuggestion,
    OrderPayload, OrderRecord, SavedOrder, ScreenAvailability, ScreenInventoryItem,
};
use crate::workflow::session::OrderSession;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness for tests that opt in.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// What the fake backend does with create/update calls.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Accept and return a saved order.
    Saved,
    /// Refuse with a 422-style structured error list.
    Rejected(Vec<String>),
    /// Fail with a 500-style exception detail.
    ServerError(String),
    /// Fail with an unexpected status, as a dead upstream would.
    Unavailable,
    /// Record the call but never answer, leaving the request on the wire.
    Stalled,
}

/// In-memory stand-in for the REST backend.
///
/// Directory and availability data are plain fields set through the
/// builder methods. Calls that matter to the workflow are recorded so
/// tests can assert exactly what would have gone over the wire.
pub struct FakeBackend {
    /// Employees returned by the directory endpoint.
    pub employees: Vec<Employee>,
    /// Companies returned by the directory endpoint.
    pub companies: Vec<Company>,
    /// Screen inventory returned by the directory endpoint.
    pub inventory: Vec<ScreenInventoryItem>,
    /// Screen availability returned for any period.
    pub screens: Vec<ScreenAvailability>,
    /// Equipment availability returned for any period.
    pub equipment: EquipmentAvailability,
    /// Location suggestions returned for any query.
    pub locations: Vec<LocationSuggestion>,
    /// The single stored order `fetch_order` can find.
    pub order: Option<OrderRecord>,
    /// When set, both availability endpoints fail.
    pub fail_availability: bool,
    /// How create/update calls resolve.
    pub submit_outcome: SubmitOutcome,
    availability_calls: Mutex<Vec<(DateRange, Option<i64>)>>,
    location_queries: Mutex<Vec<String>>,
    created: Mutex<Vec<OrderPayload>>,
    updated: Mutex<Vec<(i64, OrderPayload)>>,
}

impl FakeBackend {
    /// Creates an empty backend that saves every submission.
    pub fn new() -> Self {
        Self {
            employees: Vec::new(),
            companies: Vec::new(),
            inventory: Vec::new(),
            screens: Vec::new(),
            equipment: equipment(0, 0, 0, 0, 0, 0),
            locations: Vec::new(),
            order: None,
            fail_availability: false,
            submit_outcome: SubmitOutcome::Saved,
            availability_calls: Mutex::new(Vec::new()),
            location_queries: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
        }
    }

    /// Sets the employee directory.
    pub fn with_employees(mut self, employees: Vec<Employee>) -> Self {
        self.employees = employees;
        self
    }

    /// Sets the company directory.
    pub fn with_companies(mut self, companies: Vec<Company>) -> Self {
        self.companies = companies;
        self
    }

    /// Sets the screen inventory directory.
    pub fn with_inventory(mut self, inventory: Vec<ScreenInventoryItem>) -> Self {
        self.inventory = inventory;
        self
    }

    /// Sets the screen availability answer.
    pub fn with_screen_availability(mut self, screens: Vec<ScreenAvailability>) -> Self {
        self.screens = screens;
        self
    }

    /// Sets the equipment availability answer.
    pub fn with_equipment(mut self, equipment: EquipmentAvailability) -> Self {
        self.equipment = equipment;
        self
    }

    /// Sets the location suggestions answer.
    pub fn with_locations(mut self, locations: Vec<LocationSuggestion>) -> Self {
        self.locations = locations;
        self
    }

    /// Stores the one order `fetch_order` can find.
    pub fn with_order(mut self, order: OrderRecord) -> Self {
        self.order = Some(order);
        self
    }

    /// Makes both availability endpoints fail.
    pub fn with_failing_availability(mut self) -> Self {
        self.fail_availability = true;
        self
    }

    /// Sets how create/update calls resolve.
    pub fn with_submit_outcome(mut self, outcome: SubmitOutcome) -> Self {
        self.submit_outcome = outcome;
        self
    }

    /// Every availability call seen, as (period, excluded order id).
    pub fn availability_calls(&self) -> Vec<(DateRange, Option<i64>)> {
        self.availability_calls.lock().unwrap().clone()
    }

    /// Every location query string received.
    pub fn location_queries(&self) -> Vec<String> {
        self.location_queries.lock().unwrap().clone()
    }

    /// Every payload received by `create_order`.
    pub fn created_orders(&self) -> Vec<OrderPayload> {
        self.created.lock().unwrap().clone()
    }

    /// Every (id, payload) pair received by `update_order`.
    pub fn updated_orders(&self) -> Vec<(i64, OrderPayload)> {
        self.updated.lock().unwrap().clone()
    }

    async fn submit_result(&self, id: i64) -> Result<SavedOrder> {
        match &self.submit_outcome {
            SubmitOutcome::Saved => Ok(SavedOrder {
                id,
                order_id: Some(format!("ORD-2025-{id:04}")),
            }),
            SubmitOutcome::Rejected(errors) => Err(Error::Rejected {
                errors: errors.clone(),
            }),
            SubmitOutcome::ServerError(detail) => Err(Error::Server {
                detail: detail.clone(),
            }),
            SubmitOutcome::Unavailable => Err(Error::Api {
                status: 503,
                body: "upstream unavailable".to_string(),
            }),
            SubmitOutcome::Stalled => std::future::pending().await,
        }
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        Ok(self.companies.clone())
    }

    async fn list_screen_inventory(&self) -> Result<Vec<ScreenInventoryItem>> {
        Ok(self.inventory.clone())
    }

    async fn screen_availability(
        &self,
        range: DateRange,
        exclude_order_id: Option<i64>,
    ) -> Result<Vec<ScreenAvailability>> {
        self.availability_calls
            .lock()
            .unwrap()
            .push((range, exclude_order_id));
        if self.fail_availability {
            return Err(Error::Api {
                status: 503,
                body: "availability unavailable".to_string(),
            });
        }
        Ok(self.screens.clone())
    }

    async fn equipment_availability(
        &self,
        range: DateRange,
        exclude_order_id: Option<i64>,
    ) -> Result<EquipmentAvailability> {
        self.availability_calls
            .lock()
            .unwrap()
            .push((range, exclude_order_id));
        if self.fail_availability {
            return Err(Error::Api {
                status: 503,
                body: "availability unavailable".to_string(),
            });
        }
        Ok(self.equipment)
    }

    async fn location_suggestions(&self, query: &str) -> Result<Vec<LocationSuggestion>> {
        self.location_queries.lock().unwrap().push(query.to_string());
        Ok(self.locations.clone())
    }

    async fn fetch_order(&self, id: i64) -> Result<OrderRecord> {
        self.order
            .clone()
            .filter(|record| record.id == id)
            .ok_or(Error::OrderNotFound { id })
    }

    async fn create_order(&self, payload: &OrderPayload) -> Result<SavedOrder> {
        self.created.lock().unwrap().push(payload.clone());
        self.submit_result(501).await
    }

    async fn update_order(&self, id: i64, payload: &OrderPayload) -> Result<SavedOrder> {
        self.updated.lock().unwrap().push((id, payload.clone()));
        self.submit_result(id).await
    }
}

/// Builds a date without the `Option` dance.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Builds an inclusive date range from two y/m/d triples.
pub fn date_range(
    start_year: i32,
    start_month: u32,
    start_day: u32,
    end_year: i32,
    end_month: u32,
    end_day: u32,
) -> DateRange {
    DateRange::new(
        date(start_year, start_month, start_day),
        date(end_year, end_month, end_day),
    )
}

/// Builds an employee directory entry.
pub fn employee(id: i64, full_name: &str, role: &str) -> Employee {
    Employee {
        id,
        full_name: full_name.to_string(),
        role: role.to_string(),
    }
}

/// Builds a company directory entry.
pub fn company(id: i64, name: &str) -> Company {
    Company {
        id,
        name: name.to_string(),
        contact_person: None,
    }
}

/// Builds a screen inventory item.
pub fn screen_item(
    id: i64,
    screen_type: &str,
    pixel_pitch: f64,
    available_sqm: f64,
    total_sqm_owned: f64,
) -> ScreenInventoryItem {
    ScreenInventoryItem {
        id,
        screen_type: screen_type.to_string(),
        pixel_pitch,
        available_sqm,
        total_sqm_owned,
    }
}

/// Builds a per-screen availability entry.
pub fn screen_availability(
    id: i64,
    max_available_for_period: f64,
    total_sqm_owned: f64,
) -> ScreenAvailability {
    ScreenAvailability {
        id,
        max_available_for_period,
        total_sqm_owned,
    }
}

/// Builds equipment availability from (available, total) pairs per category.
pub fn equipment(
    laptops_available: i64,
    laptops_total: i64,
    video_available: i64,
    video_total: i64,
    cables_available: i64,
    cables_total: i64,
) -> EquipmentAvailability {
    EquipmentAvailability {
        laptops: EquipmentCounts {
            available: laptops_available,
            total: laptops_total,
        },
        video_processors: EquipmentCounts {
            available: video_available,
            total: video_total,
        },
        cables: EquipmentCounts {
            available: cables_available,
            total: cables_total,
        },
    }
}

/// Builds a location suggestion without a maps link.
pub fn location_suggestion(location_name: &str) -> LocationSuggestion {
    LocationSuggestion {
        location_name: location_name.to_string(),
        google_maps_link: None,
    }
}

/// The built-in draft defaults.
pub fn test_defaults() -> DraftDefaults {
    DraftDefaults::default()
}

/// Standard three-screen inventory: screens 1 and 3 share a pixel pitch,
/// screen 2 differs.
pub fn test_inventory() -> Vec<ScreenInventoryItem> {
    vec![
        screen_item(1, "P2.6 Indoor", 2.6, 200.0, 200.0),
        screen_item(2, "P3.9 Outdoor", 3.9, 150.0, 150.0),
        screen_item(3, "P2.6 Flex", 2.6, 80.0, 80.0),
    ]
}

/// Builds an availability snapshot.
pub fn test_snapshot(
    range: DateRange,
    screens: Vec<ScreenAvailability>,
    equipment: EquipmentAvailability,
) -> AvailabilitySnapshot {
    AvailabilitySnapshot {
        range,
        screens,
        equipment,
    }
}

/// Snapshot matching the standard scenario: period 2025-03-01 to
/// 2025-03-03, all screens fully free, 3 laptops and 2 video processors
/// free.
pub fn scenario_snapshot() -> AvailabilitySnapshot {
    test_snapshot(
        date_range(2025, 3, 1, 2025, 3, 3),
        vec![
            screen_availability(1, 200.0, 200.0),
            screen_availability(2, 150.0, 150.0),
            screen_availability(3, 80.0, 80.0),
        ],
        equipment(3, 10, 2, 5, 40, 40),
    )
}

/// A cache already holding the given snapshot.
pub fn cache_with_snapshot(snapshot: AvailabilitySnapshot) -> AvailabilityCache {
    let mut cache = AvailabilityCache::new();
    let ticket = cache.begin_refresh();
    cache.apply(ticket, snapshot);
    cache
}

/// A draft that passes validation against [`scenario_snapshot`]: Expo
/// Hall, 2025-03-01 to 2025-03-03, one 8 by 12 requirement on screen 1.
pub fn complete_draft() -> DraftOrder {
    let mut draft = DraftOrder::new(&test_defaults());
    draft.location_name = "Expo Hall".to_string();
    draft.start_date = Some(date(2025, 3, 1));
    draft.end_date = Some(date(2025, 3, 3));
    draft.installing_assignee_id = Some(7);
    draft.disassemble_assignee_id = Some(8);
    draft.set_row_screen(0, Some(1)).unwrap();
    draft
}

/// A stored order matching the standard scenario, with no assignees and
/// no requirement rows yet so edit tests fill them in.
pub fn test_order_record(id: i64) -> OrderRecord {
    OrderRecord {
        id,
        order_id: Some(format!("ORD-2025-{id:04}")),
        location_name: "Expo Hall".to_string(),
        google_maps_link: None,
        start_date: date(2025, 3, 1),
        end_date: date(2025, 3, 3),
        due_date: None,
        installing_assignee_id: None,
        disassemble_assignee_id: None,
        third_party_provider_id: None,
        laptops_needed: 1,
        video_processors_needed: 1,
        price_per_sqm: 150.0,
        manual_total: false,
        total_amount: 0.0,
        notes: String::new(),
        screen_requirements: vec![],
    }
}

/// A backend preloaded with the standard directories and the scenario
/// availability answers.
pub fn setup_backend() -> FakeBackend {
    FakeBackend::new()
        .with_employees(vec![
            employee(7, "Dana Reyes", "installer"),
            employee(8, "Olek Marchenko", "installer"),
        ])
        .with_companies(vec![company(31, "BrightRent")])
        .with_inventory(test_inventory())
        .with_screen_availability(vec![
            screen_availability(1, 200.0, 200.0),
            screen_availability(2, 150.0, 150.0),
            screen_availability(3, 80.0, 80.0),
        ])
        .with_equipment(equipment(3, 10, 2, 5, 40, 40))
}

/// Opens a create session against the backend, swaps in the standard
/// submittable draft, and fetches availability for its period.
pub async fn setup_submittable_session(backend: &FakeBackend) -> Result<OrderSession> {
    let mut session = OrderSession::open_create(backend, &test_defaults()).await?;
    *session.draft_mut() = complete_draft();
    session.refresh_availability(backend).await;
    Ok(session)
}
