//! Cooldown tracking subsystem.
//!
//! # Data Flow
//! ```text
//! Orchestrator
//!     → tracker.rs lock(user, network)   (per-key exclusive slot)
//!     → slot.check_eligible(now)         (Eligible | NotEligible(remaining))
//!     → [issuer runs, slot still held]
//!     → slot.record(destination, now)    (only after a successful send)
//!
//! sweeper.rs
//!     periodic prune_expired(now) until shutdown
//! ```
//!
//! # Design Decisions
//! - `now` is always passed in; nothing here reads the clock except the sweeper
//! - Records are process-lifetime only; nothing is persisted

pub mod sweeper;
pub mod tracker;

pub use sweeper::CooldownSweeper;
pub use tracker::{ClaimKey, ClaimRecord, ClaimSlot, CooldownTracker, Eligibility, DEFAULT_COOLDOWN};
