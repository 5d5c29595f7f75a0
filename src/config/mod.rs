//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! faucet.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FaucetConfig (validated, immutable)
//!
//! environment
//!     → loader::Secrets (custodial key, bot token, admin key)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the network set is fixed for the
//!   lifetime of the process
//! - Any load or validation error is fatal at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, Secrets};
pub use schema::{
    AdminConfig, CustodyConfig, DispenseConfig, FaucetConfig, ListenerConfig, NetworkConfig,
    ObservabilityConfig, TimeoutConfig,
};
