use crate::{Error, Result};
use std::time::Duration;

/// Largest duration accepted, the same bound as a signed 64 bits nanoseconds counter.
const MAX_NANOS: u128 = i64::MAX as u128;
/// Fraction digits past this position are below nanosecond precision for every unit.
const MAX_FRACTION_DIGITS: usize = 19;

/// Parse a duration string like `"300ms"`, `"5s"`, `"1m30s"` or `"1.5h"`.
///
/// A duration is an optionally signed sequence of decimal numbers, each with an
/// optional fraction and a mandatory unit: `ns`, `us` (or `µs`, `μs`), `ms`, `s`, `m`,
/// `h`. The bare string `"0"` is also accepted. Negative values other than zero are
/// rejected, `Duration` cannot represent them.
///
/// *Example*:
/// ```ignore
/// assert_eq!(parse_duration("1m30s")?, Duration::from_secs(90));
/// ```
pub fn parse_duration(value: &str) -> Result<Duration> {
    let invalid = || Error::msg(format!("time: invalid duration {value:?}"));
    let (negative, mut rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (integer, tail) = rest.split_at(end);
        rest = tail;
        let mut fraction = "";
        if let Some(tail) = rest.strip_prefix('.') {
            let end = tail
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(tail.len());
            (fraction, rest) = tail.split_at(end);
        }
        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, tail) = rest.split_at(end);
        rest = tail;
        if unit.is_empty() {
            return Err(Error::msg(format!(
                "time: missing unit in duration {value:?}"
            )));
        }
        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 60 * 60 * 1_000_000_000,
            _ => {
                return Err(Error::msg(format!(
                    "time: unknown unit {unit:?} in duration {value:?}"
                )));
            }
        };
        let mut nanos: u128 = 0;
        for digit in integer.bytes() {
            nanos = nanos
                .checked_mul(10)
                .and_then(|v| v.checked_add((digit - b'0') as u128))
                .filter(|v| *v <= MAX_NANOS)
                .ok_or_else(invalid)?;
        }
        nanos = nanos
            .checked_mul(scale)
            .filter(|v| *v <= MAX_NANOS)
            .ok_or_else(invalid)?;
        let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
        if !fraction.is_empty() {
            let digits: u128 = fraction
                .bytes()
                .fold(0, |acc, digit| acc * 10 + (digit - b'0') as u128);
            nanos += digits * scale / 10u128.pow(fraction.len() as u32);
        }
        total = total
            .checked_add(nanos)
            .filter(|v| *v <= MAX_NANOS)
            .ok_or_else(invalid)?;
    }
    if negative && total != 0 {
        return Err(Error::msg(format!(
            "negative duration {value:?} is not supported"
        )));
    }
    Ok(Duration::from_nanos(total as u64))
}
