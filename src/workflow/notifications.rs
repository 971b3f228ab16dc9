//! Operator-facing notifications and their message formatting.
//!
//! Every submission attempt resolves to exactly one [`Notification`]. The
//! embedding UI renders [`Notification::message`] as-is, so the wording
//! here is the wording the operator reads.

/// Compact description of a saved order for the success notification.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    /// Human-facing order reference, when the backend assigned one.
    pub order_reference: Option<String>,
    /// Event location name.
    pub location_name: String,
    /// Final order amount.
    pub total_amount: f64,
    /// Laptops reserved for the period.
    pub laptops_needed: i64,
    /// Video processors reserved for the period.
    pub video_processors_needed: i64,
    /// One formatted line per submitted screen requirement.
    pub screens: Vec<String>,
}

/// Outcome of a submission attempt, ready to show to the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Local validation found problems; nothing was sent to the backend.
    ValidationFailed {
        /// Every violation found, in form order.
        violations: Vec<String>,
    },
    /// The backend accepted and stored the order.
    OrderSaved {
        /// What was saved, for the confirmation message.
        summary: OrderSummary,
    },
    /// The backend ran its own validation and refused the order.
    BackendRejected {
        /// The backend's error list, shown verbatim.
        errors: Vec<String>,
    },
    /// The backend hit an internal error while saving.
    ServerError {
        /// Best diagnostic text the backend provided.
        detail: String,
    },
    /// The request never completed (network, timeout, unexpected status).
    SubmitFailed {
        /// Rendered error for the operator.
        message: String,
    },
}

impl Notification {
    /// Renders the message text shown to the operator.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::ValidationFailed { violations } => {
                format!("❌ Cannot submit order:\n{}", bullet_list(violations))
            }
            Self::OrderSaved { summary } => summary.message(),
            Self::BackendRejected { errors } => {
                format!("❌ Order rejected by backend:\n{}", bullet_list(errors))
            }
            Self::ServerError { detail } => {
                format!("❌ Server error while saving the order: {detail}")
            }
            Self::SubmitFailed { message } => {
                format!("❌ Could not submit the order: {message}")
            }
        }
    }
}

impl OrderSummary {
    fn message(&self) -> String {
        let reference = self.order_reference.as_deref().map_or_else(
            || "Order".to_string(),
            |reference| format!("Order {reference}"),
        );
        let mut message = format!(
            "✅ {reference} saved: '{}', total {}",
            self.location_name,
            format_amount(self.total_amount)
        );
        if !self.screens.is_empty() {
            message.push_str(&format!("\n• Screens: {}", self.screens.join(", ")));
        }
        message.push_str(&format!(
            "\n• Equipment: {} laptop(s), {} video processor(s)",
            self.laptops_needed, self.video_processors_needed
        ));
        message
    }
}

/// Formats a money amount the way the dashboard displays it.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Formats a panel grid as rows by columns.
#[must_use]
pub fn format_dimensions(rows: i64, columns: i64) -> String {
    format!("{rows}×{columns}")
}

/// Formats one screen requirement line for the success summary.
#[must_use]
pub fn format_screen_line(screen_type: &str, rows: i64, columns: i64, sqm: f64) -> String {
    format!(
        "{screen_type} {} ({sqm} sqm)",
        format_dimensions(rows, columns)
    )
}

/// Joins lines into a bullet list.
fn bullet_list(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("• {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
