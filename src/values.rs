//! Type-directed coercion of raw source strings into field storage.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::EnvfillError;
use crate::reflect::{Kind, Slot};

/// Write `raw` into `slot`, converting to the slot's declared type.
///
/// `Option` chains of any depth are descended, allocating zero values on the
/// way. Sequences are rebuilt from the comma-split pieces of `raw`, each
/// piece trimmed and coerced as an element. Failures abort the current field
/// only; the caller decides what that means for the overall load.
pub(crate) fn assign(slot: Slot<'_>, raw: &str) -> Result<(), EnvfillError> {
    match slot {
        Slot::Text(v) => {
            *v = raw.to_owned();
            Ok(())
        }
        Slot::Bool(v) => {
            *v = parse_bool(raw)?;
            Ok(())
        }
        Slot::I8(v) => parse_into(v, raw),
        Slot::I16(v) => parse_into(v, raw),
        Slot::I32(v) => parse_into(v, raw),
        Slot::I64(v) => parse_into(v, raw),
        Slot::Isize(v) => parse_into(v, raw),
        Slot::U8(v) => parse_into(v, raw),
        Slot::U16(v) => parse_into(v, raw),
        Slot::U32(v) => parse_into(v, raw),
        Slot::U64(v) => parse_into(v, raw),
        Slot::Usize(v) => parse_into(v, raw),
        Slot::F32(v) => parse_into(v, raw),
        Slot::F64(v) => parse_into(v, raw),
        Slot::Duration(v) => {
            *v = parse_duration(raw)?;
            Ok(())
        }
        Slot::Timestamp(v) => {
            let parsed = DateTime::parse_from_rfc3339(raw).map_err(|e| coerce_err(raw, e))?;
            *v = parsed.with_timezone(&Utc);
            Ok(())
        }
        Slot::Seq(seq) => {
            seq.clear();
            for piece in raw.split(',') {
                assign(seq.push_zero(), piece.trim())?;
            }
            Ok(())
        }
        Slot::Opt(opt) => assign(opt.get_or_insert_zero(), raw),
        Slot::Record(_) => Err(EnvfillError::UnsupportedKind { kind: Kind::Record }),
        Slot::Other(kind) => Err(EnvfillError::UnsupportedKind { kind }),
    }
}

fn parse_into<T>(dst: &mut T, raw: &str) -> Result<(), EnvfillError>
where
    T: FromStr,
    T::Err: Display,
{
    *dst = raw.parse().map_err(|e: T::Err| coerce_err(raw, e))?;
    Ok(())
}

/// Accepts the common boolean literal set: `1`, `t`, `T`, `true`, `True`,
/// `TRUE` and their false counterparts.
fn parse_bool(raw: &str) -> Result<bool, EnvfillError> {
    match raw {
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Ok(true),
        "0" | "f" | "F" | "false" | "False" | "FALSE" => Ok(false),
        _ => Err(coerce_err(raw, "expected a boolean literal")),
    }
}

/// Parse a duration literal: one or more decimal numbers (fractions
/// allowed), each followed by a unit — `ns`, `us`, `ms`, `s`, `m`, `h` —
/// e.g. `300ms`, `1h30m`, `1.5h`. The bare literal `0` is accepted.
/// Negative durations are rejected.
pub(crate) fn parse_duration(raw: &str) -> Result<Duration, EnvfillError> {
    if raw == "0" {
        return Ok(Duration::ZERO);
    }
    if raw.is_empty() {
        return Err(coerce_err(raw, "empty duration"));
    }

    let mut rest = raw;
    let mut total_nanos: u128 = 0;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if number_end == 0 {
            return Err(coerce_err(raw, "expected a number"));
        }
        let (number, after) = rest.split_at(number_end);

        let unit_end = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, next) = after.split_at(unit_end);
        if unit.is_empty() {
            return Err(coerce_err(raw, "missing unit"));
        }

        let scale = unit_nanos(unit)
            .ok_or_else(|| coerce_err(raw, format!("unknown duration unit {unit:?}")))?;
        let value: f64 = number.parse().map_err(|e| coerce_err(raw, e))?;
        total_nanos += (value * scale as f64) as u128;

        rest = next;
    }

    let nanos =
        u64::try_from(total_nanos).map_err(|_| coerce_err(raw, "duration out of range"))?;
    Ok(Duration::from_nanos(nanos))
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

fn coerce_err(raw: &str, reason: impl Display) -> EnvfillError {
    EnvfillError::Coerce {
        value: raw.to_owned(),
        reason: reason.to_string(),
    }
}
