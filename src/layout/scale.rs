//! Continuous, time and band scales.
//!
//! Degenerate domains (`d0 == d1`) map every input to the middle of the range instead of
//! dividing by zero.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

/// Linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span != 0.0 && span.is_finite() {
            (v - d0) / span
        } else if span.is_nan() {
            f64::NAN
        } else {
            0.5
        };
        r0 + (r1 - r0) * t
    }

    /// Round-number ticks covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        nice_ticks(d0.min(d1), d0.max(d1), count)
    }

    /// Distance between consecutive [`ticks`](Self::ticks) for the same `count`.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain;
        match tick_spec(d0.min(d1), d0.max(d1), count as f64) {
            Some((_, _, inc)) if inc < 0.0 => -1.0 / inc,
            Some((_, _, inc)) => inc,
            None => 0.0,
        }
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Tick index bounds and increment; a negative increment means "divide by -inc".
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() || stop <= start {
        return None;
    }
    let step = (stop - start) / count;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let m = 10f64.powf(-power) / factor;
        i1 = (start * m).round();
        i2 = (stop * m).round();
        if i1 / m < start {
            i1 += 1.0;
        }
        if i2 / m > stop {
            i2 -= 1.0;
        }
        inc = -m;
    } else {
        let m = 10f64.powf(power) * factor;
        i1 = (start / m).round();
        i2 = (stop / m).round();
        if i1 * m < start {
            i1 += 1.0;
        }
        if i2 * m > stop {
            i2 -= 1.0;
        }
        inc = m;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect()
}

/// Time -> pixel mapping over the extent of the valid dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    /// `None` when no row carried a valid date.
    pub domain: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub range: (f64, f64),
}

impl TimeScale {
    /// Build from the extent of `dates`, ignoring invalid ones.
    pub fn from_extent<I>(dates: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = Option<DateTime<Utc>>>,
    {
        let domain = dates.into_iter().flatten().fold(
            None,
            |acc: Option<(DateTime<Utc>, DateTime<Utc>)>, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            },
        );
        Self { domain, range }
    }

    /// Pixel position of `t`; `None` for an invalid date or an empty domain.
    pub fn map(&self, t: Option<DateTime<Utc>>) -> Option<f64> {
        let (d0, d1) = self.domain?;
        let t = t?;
        let ms = |d: DateTime<Utc>| d.timestamp_millis() as f64;
        let linear = LinearScale::new((ms(d0), ms(d1)), self.range);
        Some(linear.map(ms(t)))
    }

    /// Month starts inside the domain, thinned so at most about `max_count` remain.
    ///
    /// Thinning keeps every k-th month counted from year 0, so the chosen months stay
    /// calendar-aligned (e.g. Jan/Apr/Jul/Oct for k = 3). When no month starts inside the
    /// domain, the domain start is the only tick.
    pub fn month_ticks(&self, max_count: usize) -> Vec<DateTime<Utc>> {
        let Some((d0, d1)) = self.domain else {
            return Vec::new();
        };
        let mut months = Vec::new();
        let first = NaiveDate::from_ymd_opt(d0.year(), d0.month(), 1);
        let mut cur = first.and_then(|d| d.and_hms_opt(0, 0, 0)).map(|d| d.and_utc());
        while let Some(m) = cur {
            if m > d1 {
                break;
            }
            if m >= d0 {
                months.push(m);
            }
            cur = m.checked_add_months(Months::new(1));
        }
        if months.is_empty() {
            return vec![d0];
        }
        let max_count = max_count.max(1);
        if months.len() <= max_count {
            return months;
        }
        let k = months.len().div_ceil(max_count) as i64;
        months
            .into_iter()
            .filter(|m| (m.year() as i64 * 12 + m.month0() as i64).rem_euclid(k) == 0)
            .collect()
    }
}

/// Evenly spaced bands, one per category, with inner and outer padding.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// `padding` is applied both between bands and at the two ends; bands are centered.
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let (lo, hi) = if range.1 < range.0 {
            (range.1, range.0)
        } else {
            range
        };
        let n = count as f64;
        let step = (hi - lo) / (n - padding + padding * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - padding)) * 0.5;
        Self {
            count,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of band `i`, `None` when out of range.
    pub fn position(&self, i: usize) -> Option<f64> {
        (i < self.count).then(|| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
