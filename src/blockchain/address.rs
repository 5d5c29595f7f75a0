//! Destination address validation.

use alloy::primitives::Address;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Parse a user-supplied EVM address.
///
/// Accepts `0x` + 40 hex digits. All-lower or all-upper input is taken as is;
/// mixed case must carry a valid EIP-55 checksum. The zero address is refused.
pub fn parse_destination(input: &str) -> BlockchainResult<Address> {
    let trimmed = input.trim();
    let invalid = || BlockchainError::InvalidAddress(trimmed.chars().take(64).collect());

    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(invalid)?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let mixed_case = hex.chars().any(|c| c.is_ascii_lowercase())
        && hex.chars().any(|c| c.is_ascii_uppercase());
    let address = if mixed_case {
        Address::parse_checksummed(format!("0x{}", hex), None).map_err(|_| invalid())?
    } else {
        hex.parse::<Address>().map_err(|_| invalid())?
    };

    if address.is_zero() {
        return Err(invalid());
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_accepts_checksummed_and_single_case() {
        let expected: Address = CHECKSUMMED.parse().unwrap();
        assert_eq!(parse_destination(CHECKSUMMED).unwrap(), expected);
        assert_eq!(parse_destination(&CHECKSUMMED.to_lowercase()).unwrap(), expected);
        assert_eq!(
            parse_destination(&format!("0x{}", CHECKSUMMED[2..].to_uppercase())).unwrap(),
            expected
        );
        assert_eq!(parse_destination(&format!("  {}\n", CHECKSUMMED)).unwrap(), expected);
    }

    #[test]
    fn test_rejects_bad_checksum() {
        let broken = "0xF39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
        assert!(matches!(
            parse_destination(broken),
            Err(BlockchainError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "",
            "hello",
            "f39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb9226",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb922666",
            "0xg39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "0x0000000000000000000000000000000000000000",
        ] {
            assert!(parse_destination(input).is_err(), "accepted {:?}", input);
        }
    }
}
