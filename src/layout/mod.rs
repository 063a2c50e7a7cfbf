//! Layout engine: scales plus wiggle-offset stacked layers for one render pass.
//!
//! A [`Layout`] borrows the normalized rows it was built from and is rebuilt on every
//! data update; nothing here is kept across renders.

pub mod scale;
pub mod stack;

pub use scale::{BandScale, LinearScale, TimeScale};

use log::debug;

use crate::config::ChartConfig;
use crate::models::{NormalizedRow, SeriesKey};

/// One sample of a stacked band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackPoint<'a> {
    pub row: &'a NormalizedRow,
    pub y0: f64,
    pub y1: f64,
}

/// The band of one series across all rows, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedLayer<'a> {
    pub key: SeriesKey,
    pub points: Vec<StackPoint<'a>>,
}

/// Scales and layers for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<'a> {
    pub x_scale: TimeScale,
    pub y_scale: LinearScale,
    /// Largest per-row sum over the stacked keys; `0` for empty input.
    pub max_sum: f64,
    /// One layer per stacked key, in stack order. Empty when there are no rows.
    pub layers: Vec<StackedLayer<'a>>,
}

impl<'a> Layout<'a> {
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|l| l.points.is_empty())
    }

    pub fn layer(&self, key: SeriesKey) -> Option<&StackedLayer<'a>> {
        self.layers.iter().find(|l| l.key == key)
    }

    /// Lowest band floor over all layers, `None` for an empty layout.
    pub fn lowest_baseline(&self) -> Option<f64> {
        self.layers
            .iter()
            .flat_map(|l| l.points.iter().map(|p| p.y0))
            .filter(|y| !y.is_nan())
            .reduce(f64::min)
    }
}

/// Compute scales and stacked layers for `rows`, stacking `keys` in the given order.
pub fn layout<'a>(
    rows: &'a [NormalizedRow],
    keys: &[SeriesKey],
    config: &ChartConfig,
) -> Layout<'a> {
    let x_scale = TimeScale::from_extent(rows.iter().map(|r| r.date), (0.0, config.plot_width()));

    let max_sum = rows
        .iter()
        .map(|r| r.total(keys))
        .filter(|s| !s.is_nan())
        .reduce(f64::max)
        .unwrap_or(0.0);
    let y_scale = LinearScale::new((0.0, max_sum), (config.plot_height(), 0.0));

    if rows.is_empty() {
        debug!("layout: no rows, degenerate scales");
        return Layout {
            x_scale,
            y_scale,
            max_sum,
            layers: Vec::new(),
        };
    }

    let columns: Vec<Vec<f64>> = keys
        .iter()
        .map(|k| rows.iter().map(|r| r.value(*k)).collect())
        .collect();
    let bands = stack::stack_wiggle(&columns);

    let layers = keys
        .iter()
        .zip(bands)
        .map(|(key, band)| StackedLayer {
            key: *key,
            points: rows
                .iter()
                .zip(band)
                .map(|(row, (y0, y1))| StackPoint { row, y0, y1 })
                .collect(),
        })
        .collect();

    debug!(
        "layout: {} rows x {} series, max_sum = {}",
        rows.len(),
        keys.len(),
        max_sum
    );
    Layout {
        x_scale,
        y_scale,
        max_sum,
        layers,
    }
}
