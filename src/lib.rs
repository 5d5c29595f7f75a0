//! Conversational testnet faucet: dispensation core and bot-facing API.

// Core subsystems
pub mod blockchain;
pub mod config;
pub mod cooldown;
pub mod dispense;

// Inbound surface
pub mod admin;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::FaucetConfig;
pub use dispense::{DispensationOutcome, DispensationRequest, Dispenser, FailureKind};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
