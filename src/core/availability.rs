//! Availability snapshot cache for the order form.
//!
//! Screen and equipment availability is computed by the backend for one
//! specific rental period. The dashboard keeps the most recent snapshot in a
//! shared cache and tags every refresh with a monotonically increasing
//! ticket, so a slow response for an old period can never overwrite the
//! snapshot of a newer one.

use crate::client::Backend;
use crate::errors::Result;
use crate::models::{DateRange, EquipmentAvailability, EquipmentCategory, ScreenAvailability};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, trace};

/// Backend-computed availability for one rental period.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilitySnapshot {
    /// Period the snapshot was computed for.
    pub range: DateRange,
    /// Free area per screen inventory item over the period.
    pub screens: Vec<ScreenAvailability>,
    /// Equipment counts over the period.
    pub equipment: EquipmentAvailability,
}

impl AvailabilitySnapshot {
    /// Looks up the entry for a screen inventory item, if the backend
    /// reported one.
    #[must_use]
    pub fn screen(&self, screen_inventory_id: i64) -> Option<&ScreenAvailability> {
        self.screens
            .iter()
            .find(|screen| screen.id == screen_inventory_id)
    }
}

/// The cached snapshot plus the refresh tickets guarding it.
///
/// `issued` is the ticket handed to the most recently started refresh and
/// `applied` is the ticket whose snapshot is currently stored. A response
/// may only be stored while its ticket is newer than `applied`, which makes
/// the newest-started refresh win regardless of response order.
#[derive(Debug, Default)]
pub struct AvailabilityCache {
    snapshot: Option<AvailabilitySnapshot>,
    issued: u64,
    applied: u64,
}

impl AvailabilityCache {
    /// Creates an empty cache with no snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the ticket for a refresh that is about to start.
    pub fn begin_refresh(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Stores a fetched snapshot unless a newer refresh already landed.
    ///
    /// Returns whether the snapshot was accepted.
    pub fn apply(&mut self, ticket: u64, snapshot: AvailabilitySnapshot) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.applied = ticket;
        self.snapshot = Some(snapshot);
        true
    }

    /// The stored snapshot, when any refresh has completed.
    #[must_use]
    pub fn snapshot(&self) -> Option<&AvailabilitySnapshot> {
        self.snapshot.as_ref()
    }

    /// The period the stored snapshot was computed for.
    #[must_use]
    pub fn fetched_range(&self) -> Option<DateRange> {
        self.snapshot.as_ref().map(|snapshot| snapshot.range)
    }

    /// Free area for a screen over the snapshot period.
    ///
    /// `None` means no snapshot covers this screen yet; callers skip the
    /// corresponding ceiling check instead of failing.
    #[must_use]
    pub fn available_area_for(&self, screen_inventory_id: i64) -> Option<f64> {
        self.snapshot
            .as_ref()?
            .screen(screen_inventory_id)
            .map(|screen| screen.max_available_for_period)
    }

    /// Free unit count for an equipment category over the snapshot period.
    #[must_use]
    pub fn available_count_for(&self, category: EquipmentCategory) -> Option<i64> {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.equipment.counts_for(category).available)
    }

    /// Units already promised to overlapping orders: owned minus free.
    #[must_use]
    pub fn assigned_count_for(&self, category: EquipmentCategory) -> Option<i64> {
        self.snapshot.as_ref().map(|snapshot| {
            let counts = snapshot.equipment.counts_for(category);
            counts.total - counts.available
        })
    }
}

/// Fetches availability for `range` and stores it in the shared cache.
///
/// The ticket is drawn before any request goes out. When several refreshes
/// race, whichever started last wins the cache and the stale responses are
/// discarded on arrival.
///
/// # Errors
/// Propagates backend failures; the previously stored snapshot is kept.
pub async fn refresh_availability<B>(
    backend: &B,
    cache: &Arc<RwLock<AvailabilityCache>>,
    range: DateRange,
    exclude_order_id: Option<i64>,
) -> Result<()>
where
    B: Backend + ?Sized,
{
    let ticket = cache.write().await.begin_refresh();
    info!(
        "Refreshing availability for {} to {} (ticket {})...",
        range.start, range.end, ticket
    );

    let screens = backend.screen_availability(range, exclude_order_id).await?;
    let equipment = backend
        .equipment_availability(range, exclude_order_id)
        .await?;

    let snapshot = AvailabilitySnapshot {
        range,
        screens,
        equipment,
    };

    let mut cache_writer = cache.write().await;
    if cache_writer.apply(ticket, snapshot) {
        info!(
            "Availability cache refreshed with {} screen entries (ticket {}).",
            cache_writer.snapshot().map_or(0, |s| s.screens.len()),
            ticket
        );
    } else {
        trace!(
            "Discarded stale availability response for ticket {} (cache already newer).",
            ticket
        );
    }
    Ok(())
}
