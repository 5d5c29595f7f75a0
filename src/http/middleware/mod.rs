pub mod auth;

pub use auth::{bearer_matches, require_bot_token};
