use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Name of the column holding the sample date in raw rows.
pub const DATE_FIELD: &str = "Date";

/// Raw row as handed over by the host: column name -> untyped scalar.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// Point in time of one sample. `None` marks a date that could not be parsed.
pub type Timestamp = Option<DateTime<Utc>>;

/// The fixed, ordered set of plotted series.
///
/// Declaration order is the stack order (bottom to top) and the legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeriesKey {
    #[serde(rename = "GPT-4")]
    Gpt4,
    #[serde(rename = "Gemini")]
    Gemini,
    #[serde(rename = "PaLM-2")]
    Palm2,
    #[serde(rename = "Claude")]
    Claude,
    #[serde(rename = "LLaMA-3.1")]
    Llama31,
}

impl SeriesKey {
    /// All keys in stack order.
    pub const ALL: [SeriesKey; 5] = [
        SeriesKey::Gpt4,
        SeriesKey::Gemini,
        SeriesKey::Palm2,
        SeriesKey::Claude,
        SeriesKey::Llama31,
    ];

    /// Column name used in raw rows and shown in the legend.
    pub fn name(self) -> &'static str {
        match self {
            SeriesKey::Gpt4 => "GPT-4",
            SeriesKey::Gemini => "Gemini",
            SeriesKey::Palm2 => "PaLM-2",
            SeriesKey::Claude => "Claude",
            SeriesKey::Llama31 => "LLaMA-3.1",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeriesKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeriesKey::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| Error::UnknownSeries(s.to_string()))
    }
}

/// One numeric value per [`SeriesKey`]; unset keys read as `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesValues([f64; 5]);

impl SeriesValues {
    pub fn get(&self, key: SeriesKey) -> f64 {
        self.0[key.index()]
    }

    pub fn set(&mut self, key: SeriesKey, value: f64) {
        self.0[key.index()] = value;
    }

    /// Sum over the given keys, in the given order.
    pub fn sum(&self, keys: &[SeriesKey]) -> f64 {
        keys.iter().map(|k| self.get(*k)).sum()
    }
}

impl FromIterator<(SeriesKey, f64)> for SeriesValues {
    fn from_iter<I: IntoIterator<Item = (SeriesKey, f64)>>(iter: I) -> Self {
        let mut out = SeriesValues::default();
        for (k, v) in iter {
            out.set(k, v);
        }
        out
    }
}

/// Typed sample produced by the row normalizer (one per raw row, same order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub date: Timestamp,
    pub values: SeriesValues,
}

impl NormalizedRow {
    pub fn new(date: Timestamp, values: SeriesValues) -> Self {
        Self { date, values }
    }

    #[inline]
    pub fn value(&self, key: SeriesKey) -> f64 {
        self.values.get(key)
    }

    /// Stacked height of this row over `keys`.
    pub fn total(&self, keys: &[SeriesKey]) -> f64 {
        self.values.sum(keys)
    }
}
