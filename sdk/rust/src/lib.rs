//! Client for the faucet's bot-facing HTTP API.

mod client;

pub use client::{ClaimRequest, ClaimResponse, FaucetClient, NetworkInfo};
