//! Dispensation orchestration.
//!
//! # Data Flow
//! ```text
//! DispensationRequest (user, network, destination)
//!     → registry resolve          (UnknownNetwork)
//!     → destination validation    (InvalidAddress)
//!     → cooldown slot + check     (CooldownActive)
//!     → TransactionSender::send   (RpcUnavailable | SigningError | SubmissionRejected)
//!     → record claim              (Sent)
//! ```

pub mod messages;
pub mod orchestrator;
pub mod types;

pub use orchestrator::Dispenser;
pub use types::{DispensationOutcome, DispensationRequest, FailureKind};
