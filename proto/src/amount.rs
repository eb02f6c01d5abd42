// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Amount conversions
//!
//! Amounts on the wire are signed 64-bit integers in stroops,
//! one lumen (or unit of any asset) is 10^7 stroops.

use crate::Error;

/// Decimal places in a displayed amount
pub const DECIMALS: usize = 7;

/// Stroops per whole unit
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// Parse a decimal amount (eg. `10.5`, `-2.5`) to stroops
pub fn parse_amount(s: &str) -> Result<i64, Error> {
    let invalid = || Error::InvalidAmount(s.to_string());

    let (negative, v) = match s.strip_prefix('-') {
        Some(v) => (true, v),
        None => (false, s),
    };

    let (whole, frac) = match v.split_once('.') {
        Some((w, f)) => (w, f),
        None => (v, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if frac.len() > DECIMALS
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole = match whole.is_empty() {
        true => 0,
        false => whole.parse::<i64>().map_err(|_| invalid())?,
    };
    let frac = match frac.is_empty() {
        true => 0,
        false => format!("{frac:0<DECIMALS$}").parse::<i64>().map_err(|_| invalid())?,
    };

    // Accumulate negative values separately so i64::MIN remains reachable
    match negative {
        false => whole
            .checked_mul(STROOPS_PER_UNIT)
            .and_then(|v| v.checked_add(frac)),
        true => whole
            .checked_mul(-STROOPS_PER_UNIT)
            .and_then(|v| v.checked_sub(frac)),
    }
    .ok_or_else(invalid)
}

/// Format an amount in stroops as a decimal string,
/// trailing fractional zeros are trimmed
pub fn format_amount(stroops: i64) -> String {
    let sign = if stroops < 0 { "-" } else { "" };
    let v = stroops.unsigned_abs();
    let unit = STROOPS_PER_UNIT as u64;

    let whole = v / unit;
    let frac = v % unit;

    match frac {
        0 => format!("{sign}{whole}"),
        _ => {
            let f = format!("{frac:0>DECIMALS$}");
            format!("{sign}{whole}.{}", f.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_amounts() {
        let tests = [
            ("10.5", 105_000_000),
            ("1", 10_000_000),
            ("0.0000001", 1),
            (".25", 2_500_000),
            ("922337203685.4775807", i64::MAX),
            ("-2.5", -25_000_000),
            ("-0.0000001", -1),
            ("-922337203685.4775808", i64::MIN),
        ];

        for (s, v) in tests {
            assert_eq!(parse_amount(s), Ok(v), "parse '{s}'");
        }

        for s in ["", ".", "-", "--1", "+1", "1.00000001", "1e5", "922337203685.4775808"] {
            assert!(parse_amount(s).is_err(), "accepted '{s}'");
        }
    }

    #[test]
    fn format_amounts() {
        assert_eq!(format_amount(105_000_000), "10.5");
        assert_eq!(format_amount(10_000_000), "1");
        assert_eq!(format_amount(1), "0.0000001");
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(-25_000_000), "-2.5");
    }

    #[test]
    fn format_then_parse() {
        for v in [0, 1, -1, 25_000_000, -25_000_000, 105_000_001, i64::MAX, i64::MIN] {
            let s = format_amount(v);
            assert_eq!(parse_amount(&s), Ok(v), "round trip '{s}'");
        }
    }
}
