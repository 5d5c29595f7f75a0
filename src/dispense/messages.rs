//! Chat-facing text for prompts and outcomes.
//!
//! Failure detail never reaches the user; every failure kind renders the
//! same generic message.

use std::time::Duration;

use crate::blockchain::types::NetworkId;
use crate::dispense::types::DispensationOutcome;

pub const FAILURE_MESSAGE: &str = "An error occurred while sending tokens. Please try again later.";

/// Ask the user for an address on `network`.
pub fn address_prompt(network: NetworkId) -> String {
    format!("Please provide your {} wallet address.", network.display_name())
}

/// Render `remaining` as `H:MM:SS`.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Text shown to the user for an outcome.
pub fn render_outcome(
    outcome: &DispensationOutcome,
    amount: &str,
    symbol: &str,
    destination: &str,
) -> String {
    match outcome {
        DispensationOutcome::Sent(_) => {
            format!("{} {} has been sent to {}.", amount, symbol, destination.trim())
        }
        DispensationOutcome::CooldownActive(remaining) => {
            format!("Cool down! Come back after {}.", format_remaining(*remaining))
        }
        DispensationOutcome::Failed(_) => FAILURE_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispense::types::FailureKind;
    use alloy::primitives::TxHash;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::from_secs(23 * 3600)), "23:00:00");
        assert_eq!(format_remaining(Duration::from_secs(3661)), "1:01:01");
        assert_eq!(format_remaining(Duration::from_millis(59_999)), "0:00:59");
    }

    #[test]
    fn test_render_outcomes() {
        let sent = render_outcome(&DispensationOutcome::Sent(TxHash::ZERO), "0.1", "BERA", " 0xabc ");
        assert_eq!(sent, "0.1 BERA has been sent to 0xabc.");

        let cooldown = render_outcome(
            &DispensationOutcome::CooldownActive(Duration::from_secs(7200)),
            "0.1",
            "ETH",
            "0xabc",
        );
        assert_eq!(cooldown, "Cool down! Come back after 2:00:00.");

        for kind in [FailureKind::RpcUnavailable, FailureKind::SigningError] {
            let text = render_outcome(&DispensationOutcome::Failed(kind), "0.1", "ETH", "0xabc");
            assert_eq!(text, FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_prompt() {
        assert_eq!(address_prompt(NetworkId::Sepolia), "Please provide your Sepolia wallet address.");
        assert_eq!(address_prompt(NetworkId::Bera), "Please provide your BERA wallet address.");
    }
}
