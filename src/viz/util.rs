//! Label formatting shared by the axes.

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};

/// Short month name, e.g. `Jan`. Invalid dates render as an empty label.
pub fn month_label(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%b").to_string()).unwrap_or_default()
}

/// Decimal places needed to tell ticks `step` apart (0 for steps of 1 and above).
pub fn tick_precision(step: f64) -> usize {
    if !(step > 0.0) || !step.is_finite() {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Fixed-point tick label with thousands separators, e.g. `12,500` or `0.25`.
pub fn format_tick(v: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, v.abs());
    let (int_part, frac) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    // Past u128 the digits are printed ungrouped.
    let grouped = match int_part.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    let negative = v < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn month_labels() {
        let d = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single();
        assert_eq!(month_label(d), "Feb");
        assert_eq!(month_label(None), "");
    }

    #[test]
    fn precision_follows_step() {
        assert_eq!(tick_precision(2.0), 0);
        assert_eq!(tick_precision(1000.0), 0);
        assert_eq!(tick_precision(0.5), 1);
        assert_eq!(tick_precision(0.25), 1);
        assert_eq!(tick_precision(0.02), 2);
        assert_eq!(tick_precision(0.0), 0);
    }

    #[test]
    fn tick_labels_group_thousands() {
        assert_eq!(format_tick(12500.0, 0), "12,500");
        assert_eq!(format_tick(0.5, 1), "0.5");
        assert_eq!(format_tick(1234.5, 1), "1,234.5");
        assert_eq!(format_tick(-3.0, 0), "-3");
        assert_eq!(format_tick(-0.0001, 0), "0");
    }

    #[test]
    fn huge_ticks_keep_their_digits() {
        assert_eq!(
            format_tick(2f64.powi(70), 0),
            "1,180,591,620,717,411,303,424"
        );
        assert_eq!(format_tick(-2f64.powi(64), 0), "-18,446,744,073,709,551,616");
        let past_u128 = format_tick(1e40, 0);
        assert_eq!(past_u128.len(), 41);
        assert!(past_u128.starts_with("1000000000000000"));
    }
}
