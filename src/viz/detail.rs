//! Detail chart: one series as a bar per row, drawn into the tooltip surface.
//!
//! The chart only ever touches its own [`BARS`], [`AXIS_X`] and [`AXIS_Y`] groups. Bars
//! start in the previously hovered series' color and the returned [`ColorTransition`]
//! carries them to the hovered series' color.
//!
//! Bands are not merged by month: two rows in the same month give two adjacent bands
//! with the same label.

use std::time::Duration;

use log::debug;

use crate::config::TooltipConfig;
use crate::layout::{BandScale, LinearScale};
use crate::models::{NormalizedRow, SeriesKey};
use crate::style::{ColorMap, Rgb};
use crate::surface::{Node, Rect, Surface};
use crate::transition::ColorTransition;

use super::axis::{band_axis_bottom, linear_axis_left};
use super::types::{AXIS_X, AXIS_Y, BARS};
use super::util::month_label;

/// Redraw the detail chart for `series` and return the color transition to run.
pub fn render_detail(
    surface: &mut Surface,
    series: SeriesKey,
    previous: Option<SeriesKey>,
    rows: &[NormalizedRow],
    colors: &ColorMap,
    config: &TooltipConfig,
    now: Duration,
) -> ColorTransition {
    for class in [BARS, AXIS_X, AXIS_Y] {
        surface.remove_class(class);
    }

    let (w, h) = (config.width as f64, config.height as f64);
    let m = config.margin;
    let x_range = (m.left, w - m.right);
    let band = BandScale::new(rows.len(), x_range, config.band_padding);

    let max = rows
        .iter()
        .map(|r| r.value(series))
        .filter(|v| !v.is_nan())
        .reduce(f64::max)
        .unwrap_or(0.0);
    let y = LinearScale::new((0.0, max), (h - m.bottom, m.top));

    let target = colors.get(series);
    let start = previous.map_or(target, |p| colors.get(p));

    let bars = surface.append_group(BARS, (0.0, 0.0));
    for (i, row) in rows.iter().enumerate() {
        let Some(x) = band.position(i) else { continue };
        let top = y.map(row.value(series));
        bars.push(Node::Rect(Rect {
            x,
            y: top,
            width: band.bandwidth(),
            height: (y.map(0.0) - top).max(0.0),
            fill: start,
        }));
    }

    let labels: Vec<String> = rows.iter().map(|r| month_label(r.date)).collect();
    band_axis_bottom(
        surface.append_group(AXIS_X, (0.0, h - m.bottom)),
        &band,
        &labels,
        x_range,
    );
    linear_axis_left(
        surface.append_group(AXIS_Y, (m.left, 0.0)),
        &y,
        config.y_ticks,
    );

    debug!(
        "detail chart: {} bars for {}, {} -> {}",
        rows.len(),
        series,
        start,
        target
    );
    ColorTransition::new(
        start,
        target,
        now,
        Duration::from_millis(config.transition_ms),
    )
}

/// Repaint every detail bar with `color`.
pub fn paint_bars(surface: &mut Surface, color: Rgb) {
    if let Some(bars) = surface.find_class_mut(BARS) {
        for r in bars.rects_mut() {
            r.fill = color;
        }
    }
}
