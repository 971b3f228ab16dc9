//! Order session - drives one draft order from opening to acknowledged save.
//!
//! A session owns the draft, the directory lists it was opened with, and
//! the shared availability cache. Submission runs validate-then-send: the
//! collect-all validation pass gates the network call, and every submission
//! outcome comes back as a [`Notification`] for the operator. A successful
//! save parks the session in [`SessionPhase::AwaitingAck`] until the
//! operator acknowledges the confirmation, so the embedding UI cannot
//! close the form before the operator has seen the result.

use crate::client::Backend;
use crate::config::defaults::DraftDefaults;
use crate::core::availability::{self, AvailabilityCache};
use crate::core::draft::{DraftOrder, ScreenRow};
use crate::core::validation::validate;
use crate::errors::{Error, Result};
use crate::models::{Company, Employee, LocationSuggestion, SavedOrder, ScreenInventoryItem};
use crate::workflow::notifications::{self, Notification, OrderSummary};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Most suggestions ever returned for one location query.
const MAX_LOCATION_SUGGESTIONS: usize = 10;

/// Lifecycle phase of an order session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The operator is editing; submission is allowed.
    Editing,
    /// A submission is on the wire; further submissions are refused.
    Submitting,
    /// The backend saved the order; waiting for the operator to
    /// acknowledge the confirmation.
    AwaitingAck,
    /// The session is finished.
    Closed,
}

/// Whether the session creates a new order or edits a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Assembling a brand new order.
    Create,
    /// Revising an order that already exists in the backend.
    Edit,
}

/// One operator's in-progress order, from opening the form to closing it.
pub struct OrderSession {
    mode: SessionMode,
    phase: SessionPhase,
    draft: DraftOrder,
    employees: Vec<Employee>,
    companies: Vec<Company>,
    inventory: Vec<ScreenInventoryItem>,
    availability: Arc<RwLock<AvailabilityCache>>,
    saved: Option<SavedOrder>,
}

impl OrderSession {
    /// Opens a session for creating a new order.
    ///
    /// The three directories are loaded up front; availability stays
    /// unknown until the operator has entered both rental dates.
    ///
    /// # Errors
    /// Returns an error if any directory fetch fails.
    pub async fn open_create<B>(backend: &B, defaults: &DraftDefaults) -> Result<Self>
    where
        B: Backend + ?Sized,
    {
        let employees = backend.list_employees().await?;
        let companies = backend.list_companies().await?;
        let inventory = backend.list_screen_inventory().await?;
        info!(
            "Opened create session ({} employees, {} companies, {} screen types).",
            employees.len(),
            companies.len(),
            inventory.len()
        );

        Ok(Self {
            mode: SessionMode::Create,
            phase: SessionPhase::Editing,
            draft: DraftOrder::new(defaults),
            employees,
            companies,
            inventory,
            availability: Arc::new(RwLock::new(AvailabilityCache::new())),
            saved: None,
        })
    }

    /// Opens a session editing a stored order.
    ///
    /// The draft is hydrated from the stored record and availability is
    /// fetched immediately, with the order itself excluded from the
    /// overlap so its own reservation does not count against it.
    ///
    /// # Errors
    /// Returns an error if the order or any directory fetch fails. An
    /// availability failure is not fatal; the snapshot stays unknown.
    pub async fn open_edit<B>(backend: &B, defaults: &DraftDefaults, order_id: i64) -> Result<Self>
    where
        B: Backend + ?Sized,
    {
        let record = backend.fetch_order(order_id).await?;
        let employees = backend.list_employees().await?;
        let companies = backend.list_companies().await?;
        let inventory = backend.list_screen_inventory().await?;
        info!("Opened edit session for order {order_id}.");

        let session = Self {
            mode: SessionMode::Edit,
            phase: SessionPhase::Editing,
            draft: DraftOrder::from_record(&record, defaults),
            employees,
            companies,
            inventory,
            availability: Arc::new(RwLock::new(AvailabilityCache::new())),
            saved: None,
        };
        session.refresh_availability(backend).await;
        Ok(session)
    }

    /// The session's create/edit mode.
    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The session's current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The draft being assembled.
    #[must_use]
    pub fn draft(&self) -> &DraftOrder {
        &self.draft
    }

    /// Mutable access to the draft for form edits.
    pub fn draft_mut(&mut self) -> &mut DraftOrder {
        &mut self.draft
    }

    /// Employees for the assignee pickers.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Third-party companies for the provider picker.
    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Screen inventory items for the requirement rows.
    #[must_use]
    pub fn inventory(&self) -> &[ScreenInventoryItem] {
        &self.inventory
    }

    /// Shared handle to the availability cache, for UI reads.
    #[must_use]
    pub fn availability(&self) -> Arc<RwLock<AvailabilityCache>> {
        Arc::clone(&self.availability)
    }

    /// The saved order, once the backend has accepted a submission.
    #[must_use]
    pub fn saved_order(&self) -> Option<&SavedOrder> {
        self.saved.as_ref()
    }

    /// True when the draft's rental period differs from the period the
    /// cached snapshot was computed for.
    ///
    /// The embedding UI polls this after date edits; refreshing exactly
    /// when it returns true also covers the very first fetch, since an
    /// empty cache has no period at all.
    pub async fn needs_availability_refresh(&self) -> bool {
        let Some(range) = self.draft.date_range() else {
            return false;
        };
        self.availability.read().await.fetched_range() != Some(range)
    }

    /// Refreshes the availability snapshot for the draft's current period.
    ///
    /// Does nothing until both dates are set. Failures are logged and the
    /// previous snapshot is kept, so the operator keeps working against
    /// stale-or-unknown data instead of being blocked.
    pub async fn refresh_availability<B>(&self, backend: &B)
    where
        B: Backend + ?Sized,
    {
        let Some(range) = self.draft.date_range() else {
            return;
        };
        let exclude_order_id = self.draft.id;
        if let Err(error) =
            availability::refresh_availability(backend, &self.availability, range, exclude_order_id)
                .await
        {
            warn!("Availability refresh failed, keeping previous snapshot: {error}");
        }
    }

    /// Location suggestions for a partial query, alphabetized and capped.
    ///
    /// An empty query returns no suggestions without calling the backend.
    ///
    /// # Errors
    /// Propagates backend failures.
    pub async fn suggest_locations<B>(
        &self,
        backend: &B,
        query: &str,
    ) -> Result<Vec<LocationSuggestion>>
    where
        B: Backend + ?Sized,
    {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let mut suggestions = backend.location_suggestions(query).await?;
        suggestions.sort_by(|a, b| a.location_name.cmp(&b.location_name));
        suggestions.truncate(MAX_LOCATION_SUGGESTIONS);
        Ok(suggestions)
    }

    /// Validates the draft and, when it is clean, sends it to the backend.
    ///
    /// Validation runs against the snapshot as cached; no fresh fetch
    /// happens on the submit path. Create mode POSTs a new order, edit
    /// mode PUTs the stored one. Every outcome the operator can act on is
    /// returned as a [`Notification`]; `Err` is reserved for calling this
    /// in the wrong phase. Failures of any kind return the session to
    /// [`SessionPhase::Editing`] so the operator can fix and resubmit.
    ///
    /// # Errors
    /// Returns an error when a submission is already in flight, the last
    /// save still awaits acknowledgement, or the session is closed.
    pub async fn submit<B>(&mut self, backend: &B) -> Result<Notification>
    where
        B: Backend + ?Sized,
    {
        match self.phase {
            SessionPhase::Submitting => return Err(Error::SubmitInFlight),
            SessionPhase::AwaitingAck => return Err(Error::AwaitingAcknowledgement),
            SessionPhase::Closed => return Err(Error::SessionClosed),
            SessionPhase::Editing => {}
        }

        let outcome = {
            let cache = self.availability.read().await;
            validate(&self.draft, &self.inventory, &cache)
        };
        if !outcome.is_ok() {
            info!(
                "Draft failed validation with {} violation(s); nothing sent.",
                outcome.violations.len()
            );
            return Ok(Notification::ValidationFailed {
                violations: outcome.violations,
            });
        }

        let payload = self.draft.to_payload(&outcome.valid_rows)?;

        self.phase = SessionPhase::Submitting;
        let result = match self.draft.id {
            Some(order_id) => backend.update_order(order_id, &payload).await,
            None => backend.create_order(&payload).await,
        };

        match result {
            Ok(saved) => {
                self.phase = SessionPhase::AwaitingAck;
                let summary = self.build_summary(&saved, &outcome.valid_rows);
                info!(
                    "Order saved (id {}, reference {:?}); awaiting acknowledgement.",
                    saved.id, saved.order_id
                );
                self.saved = Some(saved);
                Ok(Notification::OrderSaved { summary })
            }
            Err(Error::Rejected { errors }) => {
                self.phase = SessionPhase::Editing;
                warn!("Backend rejected the order with {} error(s).", errors.len());
                Ok(Notification::BackendRejected { errors })
            }
            Err(Error::Server { detail }) => {
                self.phase = SessionPhase::Editing;
                error!("Backend server error while saving order: {detail}");
                Ok(Notification::ServerError { detail })
            }
            Err(err) => {
                self.phase = SessionPhase::Editing;
                error!("Order submission failed: {err}");
                Ok(Notification::SubmitFailed {
                    message: err.to_string(),
                })
            }
        }
    }

    /// Acknowledges the success confirmation, closing the session.
    ///
    /// Returns the saved order so the caller can refresh its order list,
    /// or `None` when there is nothing to acknowledge.
    pub fn acknowledge(&mut self) -> Option<SavedOrder> {
        if self.phase != SessionPhase::AwaitingAck {
            return None;
        }
        self.phase = SessionPhase::Closed;
        self.saved.clone()
    }

    /// Abandons the session without saving.
    ///
    /// # Errors
    /// Refused while a submission is on the wire.
    pub fn cancel(&mut self) -> Result<()> {
        if self.phase == SessionPhase::Submitting {
            return Err(Error::SubmitInFlight);
        }
        self.phase = SessionPhase::Closed;
        Ok(())
    }

    fn build_summary(&self, saved: &SavedOrder, rows: &[ScreenRow]) -> OrderSummary {
        let screens = rows
            .iter()
            .map(|row| {
                let name = match row.screen_inventory_id {
                    Some(id) => self
                        .inventory
                        .iter()
                        .find(|item| item.id == id)
                        .map_or_else(
                            || format!("screen type {id}"),
                            |item| item.screen_type.clone(),
                        ),
                    None => "screen".to_string(),
                };
                notifications::format_screen_line(
                    &name,
                    row.dimensions_rows,
                    row.dimensions_columns,
                    row.sqm_required,
                )
            })
            .collect();

        OrderSummary {
            order_reference: saved.order_id.clone(),
            location_name: self.draft.location_name.clone(),
            total_amount: self.draft.totals().total_amount,
            laptops_needed: self.draft.laptops_needed,
            video_processors_needed: self.draft.video_processors_needed,
            screens,
        }
    }
}
