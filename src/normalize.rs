//! Row normalizer: untyped host rows -> [`NormalizedRow`]s.
//!
//! Coercion policy (applies to every declared series column):
//! - JSON numbers are taken as-is; numeric strings are parsed after trimming.
//! - `true`/`false` become `1`/`0`; `null`, empty strings and missing columns become `0`.
//! - Anything else (unparseable text, arrays, objects, non-finite results) becomes `0`.
//!
//! Dates never fail either: unparseable values yield `None` and the row is skipped
//! when geometry is built.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

use crate::models::{DATE_FIELD, NormalizedRow, RawRow, SeriesKey, SeriesValues, Timestamp};

/// Normalize `raw_rows`, reading the columns named by `series_keys`.
///
/// Output has the same length and order as the input. Keys not listed read as `0`.
pub fn normalize(raw_rows: &[RawRow], series_keys: &[SeriesKey]) -> Vec<NormalizedRow> {
    let mut coerced = 0usize;
    let mut bad_dates = 0usize;

    let rows: Vec<NormalizedRow> = raw_rows
        .iter()
        .map(|raw| {
            let date = raw.get(DATE_FIELD).and_then(parse_date);
            if date.is_none() {
                bad_dates += 1;
            }
            let values: SeriesValues = series_keys
                .iter()
                .map(|key| {
                    let (v, exact) = coerce_number(raw.get(key.name()));
                    if !exact {
                        coerced += 1;
                    }
                    (*key, v)
                })
                .collect();
            NormalizedRow::new(date, values)
        })
        .collect();

    if coerced > 0 || bad_dates > 0 {
        warn!(
            "normalized {} rows: {} value(s) coerced to 0, {} unparseable date(s)",
            rows.len(),
            coerced,
            bad_dates
        );
    } else {
        debug!("normalized {} rows", rows.len());
    }
    rows
}

/// Coerce one cell to a number. The flag is `false` when the policy had to substitute `0`.
pub fn coerce_number(cell: Option<&Value>) -> (f64, bool) {
    let parsed = match cell {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let t = s.trim();
            if t.is_empty() {
                Some(0.0)
            } else {
                t.parse::<f64>().ok()
            }
        }
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(Value::Null) => Some(0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) | None => None,
    };
    match parsed {
        Some(v) if v.is_finite() => (v, !matches!(cell, None | Some(Value::Null))),
        _ => (0.0, false),
    }
}

/// Parse a date cell. Strings may be RFC 3339, `YYYY-MM-DD[ HH:MM:SS]`, `YYYY-MM` or `YYYY`
/// (all read as UTC); numbers are epoch milliseconds.
pub fn parse_date(cell: &Value) -> Timestamp {
    match cell {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => n
            .as_f64()
            .filter(|ms| ms.is_finite())
            .and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms as i64)),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Timestamp {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return midnight(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return midnight(d);
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse::<i32>()
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .and_then(midnight);
    }
    None
}

fn midnight(d: NaiveDate) -> Timestamp {
    d.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn row(v: Value) -> RawRow {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(normalize(&[], &SeriesKey::ALL).is_empty());
    }

    #[test]
    fn numbers_and_numeric_strings_parse() {
        let rows = normalize(
            &[row(json!({"Date": "2024-03-01", "GPT-4": 10, "Gemini": " 2.5 ", "Claude": "7"}))],
            &SeriesKey::ALL,
        );
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.value(SeriesKey::Gpt4), 10.0);
        assert_eq!(r.value(SeriesKey::Gemini), 2.5);
        assert_eq!(r.value(SeriesKey::Claude), 7.0);
        let d = r.date.unwrap();
        assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2024, 3, 1, 0));
    }

    #[test]
    fn malformed_cells_become_zero() {
        let rows = normalize(
            &[row(json!({
                "Date": "not a date",
                "GPT-4": "abc",
                "Gemini": null,
                "PaLM-2": [1, 2],
                "Claude": true,
                "LLaMA-3.1": "NaN"
            }))],
            &SeriesKey::ALL,
        );
        let r = &rows[0];
        assert!(r.date.is_none());
        assert_eq!(r.value(SeriesKey::Gpt4), 0.0);
        assert_eq!(r.value(SeriesKey::Gemini), 0.0);
        assert_eq!(r.value(SeriesKey::Palm2), 0.0);
        assert_eq!(r.value(SeriesKey::Claude), 1.0);
        assert_eq!(r.value(SeriesKey::Llama31), 0.0);
        assert!(r.total(&SeriesKey::ALL).is_finite());
    }

    #[test]
    fn only_listed_keys_are_read() {
        let rows = normalize(
            &[row(json!({"Date": "2024-01-01", "GPT-4": 3, "Claude": 4}))],
            &[SeriesKey::Claude],
        );
        assert_eq!(rows[0].value(SeriesKey::Gpt4), 0.0);
        assert_eq!(rows[0].value(SeriesKey::Claude), 4.0);
    }

    #[test]
    fn order_is_preserved() {
        let rows = normalize(
            &[
                row(json!({"Date": "2024-02-01", "GPT-4": 2})),
                row(json!({"Date": "2024-01-01", "GPT-4": 1})),
            ],
            &SeriesKey::ALL,
        );
        assert_eq!(rows[0].value(SeriesKey::Gpt4), 2.0);
        assert_eq!(rows[1].value(SeriesKey::Gpt4), 1.0);
    }

    #[test]
    fn date_forms() {
        let utc = |v: Value| parse_date(&v).map(|d| (d.year(), d.month(), d.day(), d.hour()));
        assert_eq!(utc(json!("2024-05-06T07:00:00Z")), Some((2024, 5, 6, 7)));
        assert_eq!(utc(json!("2024-05-06T09:00:00+02:00")), Some((2024, 5, 6, 7)));
        assert_eq!(utc(json!("2024-05-06 07:00:00")), Some((2024, 5, 6, 7)));
        assert_eq!(utc(json!("2024-05")), Some((2024, 5, 1, 0)));
        assert_eq!(utc(json!("2024")), Some((2024, 1, 1, 0)));
        assert_eq!(utc(json!(0)), Some((1970, 1, 1, 0)));
        assert_eq!(utc(json!("2024-13-01")), None);
        assert_eq!(utc(json!("")), None);
        assert_eq!(utc(json!(true)), None);
    }

    #[test]
    fn coercion_flags_substitutions() {
        assert_eq!(coerce_number(Some(&json!(4))), (4.0, true));
        assert_eq!(coerce_number(Some(&json!(""))), (0.0, true));
        assert_eq!(coerce_number(Some(&json!("x"))), (0.0, false));
        assert_eq!(coerce_number(None), (0.0, false));
        assert_eq!(coerce_number(Some(&Value::Null)), (0.0, false));
    }
}
