//! Exact conversion between decimal ETH strings and integer wei.
//!
//! User input arrives as a decimal string and is scaled to wei (10^18 base
//! units) before it touches the network; on-chain amounts come back as wei
//! and are scaled down for display.  Both directions are exact: a decimal
//! amount representable in 18 fractional digits round-trips unchanged (up
//! to canonical form, i.e. no leading/trailing zeros).

use crate::error::ClientError;

/// Wei per ETH.
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Fractional digits of the base unit.
const ETH_DECIMALS: usize = 18;

/// Parse a decimal ETH string into wei.
///
/// Accepts plain non-negative decimals (`"1"`, `"1.5"`, `".5"`, `"1."`).
/// Rejects empty input, signs, exponents, more than 18 fractional digits,
/// and values that overflow `u128`.
pub fn parse_eth(input: &str) -> Result<u128, ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidAmount("amount is empty".into()));
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(ClientError::InvalidAmount("no digits".into()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::InvalidAmount(format!(
            "not a decimal number: {trimmed}"
        )));
    }
    if frac.len() > ETH_DECIMALS {
        return Err(ClientError::InvalidAmount(format!(
            "more than {ETH_DECIMALS} fractional digits"
        )));
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .ok()
            .and_then(|w| w.checked_mul(WEI_PER_ETH))
            .ok_or_else(overflow)?
    };

    let frac_wei = if frac.is_empty() {
        0
    } else {
        // At most 18 digits, so the parse cannot overflow and the scale
        // factor keeps the product below 10^36.
        let scale = 10u128.pow((ETH_DECIMALS - frac.len()) as u32);
        frac.parse::<u128>().map_err(|_| overflow())? * scale
    };

    whole_wei.checked_add(frac_wei).ok_or_else(overflow)
}

/// Format wei as a canonical decimal ETH string.
///
/// `1500000000000000000` -> `"1.5"`, `10^18` -> `"1"`, `1` ->
/// `"0.000000000000000001"`.
pub fn format_wei(wei: u128) -> String {
    let whole = wei / WEI_PER_ETH;
    let frac = wei % WEI_PER_ETH;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:018}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

fn overflow() -> ClientError {
    ClientError::InvalidAmount("amount overflows 128-bit wei".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_amounts() {
        assert_eq!(parse_eth("1").unwrap(), WEI_PER_ETH);
        assert_eq!(parse_eth("0").unwrap(), 0);
        assert_eq!(parse_eth("42").unwrap(), 42 * WEI_PER_ETH);
        assert_eq!(parse_eth("1.").unwrap(), WEI_PER_ETH);
    }

    #[test]
    fn test_parse_fractional_amounts() {
        assert_eq!(parse_eth("1.5").unwrap(), 1_500_000_000_000_000_000);
        assert_eq!(parse_eth(".5").unwrap(), 500_000_000_000_000_000);
        assert_eq!(parse_eth("0.000000000000000001").unwrap(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "  ", ".", "-1", "+1", "1e18", "1..2", "abc", "1,5"] {
            assert!(
                matches!(parse_eth(bad), Err(ClientError::InvalidAmount(_))),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        // 19 fractional digits cannot be represented in wei.
        assert!(parse_eth("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(parse_eth("340282366920938463464").is_err());
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(format_wei(WEI_PER_ETH), "1");
        assert_eq!(format_wei(1_500_000_000_000_000_000), "1.5");
        assert_eq!(format_wei(0), "0");
        assert_eq!(format_wei(1), "0.000000000000000001");
        assert_eq!(format_wei(1_230_000_000_000_000_000_000), "1230");
    }

    #[test]
    fn test_round_trip_law() {
        for canonical in [
            "1",
            "1.5",
            "0.1",
            "123.456789012345678",
            "0.000000000000000001",
            "999999999",
        ] {
            let wei = parse_eth(canonical).unwrap();
            assert_eq!(format_wei(wei), canonical, "round trip of {canonical:?}");
        }
        // Non-canonical input parses to the same value as its canonical form.
        assert_eq!(parse_eth("01.50").unwrap(), parse_eth("1.5").unwrap());
    }
}
