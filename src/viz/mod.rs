//! Visualization: draw a [`Layout`] onto a [`Surface`].
//!
//! - One filled, spline-smoothed area per series, colored from the [`ColorMap`], stacked
//!   bottom to top in key order and hooked for pointer events
//! - Bottom time axis with short month labels, just below the lowest band
//! - Legend listing the series
//! - Detail bar chart for the tooltip (see [`detail`])

pub mod axis;
pub mod curve;
pub mod detail;
pub mod legend;
pub mod types;
pub mod util;

pub use detail::{paint_bars, render_detail};

use log::debug;

use crate::config::ChartConfig;
use crate::layout::Layout;
use crate::models::SeriesKey;
use crate::style::ColorMap;
use crate::surface::{Area, Node, Surface};

use curve::area_outline;
use legend::draw_legend;
use types::{GRAPH, LEGEND, X_AXIS};

/// Gap between the lowest band and the time axis.
const AXIS_GAP_PX: f64 = 10.0;

/// Replace the stream layers, time axis and legend on `surface` with `layout`.
///
/// Only the [`GRAPH`] and [`LEGEND`] groups are touched; calling this twice with the same
/// layout leaves the surface exactly as after the first call.
pub fn render_layers(surface: &mut Surface, layout: &Layout<'_>, colors: &ColorMap, config: &ChartConfig) {
    surface.remove_class(GRAPH);
    surface.remove_class(LEGEND);
    if layout.is_empty() {
        debug!("render_layers: empty layout, nothing drawn");
        return;
    }

    let m = config.margin;
    let graph = surface.append_group(GRAPH, (m.left - 20.0, m.top + 10.0));

    for layer in &layout.layers {
        let samples: Vec<(f64, f64, f64)> = layer
            .points
            .iter()
            .filter_map(|p| {
                layout.x_scale.map(p.row.date).map(|x| {
                    (x, layout.y_scale.map(p.y0), layout.y_scale.map(p.y1))
                })
            })
            .collect();
        graph.push(Node::Area(Area {
            points: area_outline(&samples, config.curve_samples),
            fill: colors.get(layer.key),
            hook: Some(layer.key),
        }));
    }

    if let Some(lowest) = layout.lowest_baseline() {
        let bottom = layout.y_scale.map(lowest);
        let x_axis = graph.append_group(X_AXIS, (0.0, bottom + AXIS_GAP_PX));
        axis::time_axis_bottom(x_axis, &layout.x_scale, config.x_ticks);
    }

    let keys: Vec<SeriesKey> = layout.layers.iter().map(|l| l.key).collect();
    draw_legend(
        surface,
        &keys,
        colors,
        (config.width + m.right - 10.0, m.top + 100.0),
    );
    debug!("render_layers: drew {} layers", keys.len());
}
