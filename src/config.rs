//! Chart geometry and behavior settings.
//!
//! Every field has a default matching the stock 600×600 chart with a 350×200 tooltip,
//! so hosts usually only override a handful of values (e.g. via [`ChartConfig::from_json_str`]).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::style::ColorMap;

/// Pixel margins around a plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Settings for the primary streamgraph surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Outer frame (surface) size in pixels.
    pub frame_width: u32,
    pub frame_height: u32,
    /// Content area the margins are subtracted from.
    pub width: f64,
    pub height: f64,
    pub margin: Margins,
    /// Requested number of time-axis ticks (an upper bound on month ticks).
    pub x_ticks: usize,
    /// Straight segments used to flatten each spline segment.
    pub curve_samples: usize,
    pub colors: ColorMap,
    pub tooltip: TooltipConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            frame_width: 600,
            frame_height: 600,
            width: 500.0,
            height: 500.0,
            margin: Margins::new(20.0, 20.0, 60.0, 40.0),
            x_ticks: 10,
            curve_samples: 12,
            colors: ColorMap::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Parse a (possibly partial) JSON object; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Width of the stacked-area plot: content width minus left/right margins.
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height of the stacked-area plot: content height minus top/bottom margins.
    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

/// Settings for the hover tooltip and its detail bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub width: u32,
    pub height: u32,
    pub margin: Margins,
    /// Tooltip offset from the pointer position.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Length of the bar recolor animation in milliseconds.
    pub transition_ms: u64,
    pub y_ticks: usize,
    /// Fraction of each band left empty between bars.
    pub band_padding: f64,
    /// Class name used to find an existing tooltip container on the page.
    pub class_name: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            width: 350,
            height: 200,
            margin: Margins::new(20.0, 20.0, 30.0, 30.0),
            offset_x: 15.0,
            offset_y: -10.0,
            transition_ms: 600,
            y_ticks: 5,
            band_padding: 0.1,
            class_name: "tooltip".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_stock_plot_area() {
        let c = ChartConfig::default();
        assert_eq!(c.plot_width(), 440.0);
        assert_eq!(c.plot_height(), 420.0);
        assert_eq!(c.tooltip.transition_ms, 600);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let c = ChartConfig::from_json_str(r#"{"x_ticks": 4, "tooltip": {"transition_ms": 250}}"#)
            .unwrap();
        assert_eq!(c.x_ticks, 4);
        assert_eq!(c.tooltip.transition_ms, 250);
        assert_eq!(c.tooltip.width, 350);
        assert_eq!(c.frame_width, 600);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let e = ChartConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(e, crate::error::Error::Config(_)));
    }
}
