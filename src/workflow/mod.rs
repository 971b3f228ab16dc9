/// Operator-facing notifications produced by the workflow
pub mod notifications;

/// Order session driving one draft from opening to acknowledged save
pub mod session;

pub use notifications::{Notification, OrderSummary};
pub use session::{OrderSession, SessionMode, SessionPhase};
