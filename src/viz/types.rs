//! Class names of the groups each renderer owns on its surface.
//!
//! Renderers remove and redraw only their own classes; anything else on the surface
//! belongs to someone else.

/// Container of the stream layers and the time axis.
pub const GRAPH: &str = "graph";
/// Bottom time axis inside [`GRAPH`].
pub const X_AXIS: &str = "x-axis";
pub const LEGEND: &str = "legend";
pub const LEGEND_ITEM: &str = "legend-item";
/// One tick (mark and label) on any axis.
pub const TICK: &str = "tick";

/// Detail chart bars (tooltip surface).
pub const BARS: &str = "bars";
/// Detail chart band axis (tooltip surface).
pub const AXIS_X: &str = "axis-x";
/// Detail chart value axis (tooltip surface).
pub const AXIS_Y: &str = "axis-y";
