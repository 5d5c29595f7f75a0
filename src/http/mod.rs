//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Chat front-end
//!     → server.rs (Axum setup, request ID, timeout, trace)
//!     → middleware/auth.rs (bot bearer token)
//!     → request.rs (ClaimRequest → DispensationRequest)
//!     → handlers.rs → Dispenser
//!     → response.rs (outcome → status + JSON + user message)
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::ClaimRequest;
pub use response::{ClaimResponse, NetworkInfo};
pub use server::{AppState, HttpServer};
