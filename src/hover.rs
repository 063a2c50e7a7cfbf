//! Hover controller: which series is under the pointer, which one was before, and where
//! the tooltip floats.
//!
//! Leaving a shape hides the tooltip but keeps `current`, so the next hover can start its
//! color transition from the series seen last.

use serde::Serialize;

use crate::models::SeriesKey;

/// Current and previously hovered series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HoverState {
    pub current: Option<SeriesKey>,
    pub previous: Option<SeriesKey>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum HoverPhase {
    #[default]
    Idle,
    Hovering(SeriesKey),
}

/// Tooltip placement derived from the latest pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TooltipPosition {
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

/// What the detail chart should draw after a pointer enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub series: SeriesKey,
    pub previous: Option<SeriesKey>,
}

#[derive(Debug, Clone, Default)]
pub struct HoverController {
    state: HoverState,
    phase: HoverPhase,
    tooltip: TooltipPosition,
    offset: (f64, f64),
}

impl HoverController {
    /// `offset` is added to every pointer position to place the tooltip.
    pub fn new(offset: (f64, f64)) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    pub fn tooltip(&self) -> TooltipPosition {
        self.tooltip
    }

    pub fn pointer_enter(&mut self, series: SeriesKey, x: f64, y: f64) -> DetailRequest {
        self.state.previous = Some(self.state.current.unwrap_or(series));
        self.state.current = Some(series);
        self.phase = HoverPhase::Hovering(series);
        self.place(x, y);
        self.tooltip.visible = true;
        DetailRequest {
            series,
            previous: self.state.previous,
        }
    }

    /// Moves the tooltip while hovering; ignored when idle.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if matches!(self.phase, HoverPhase::Hovering(_)) {
            self.place(x, y);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.tooltip.visible = false;
        self.phase = HoverPhase::Idle;
    }

    fn place(&mut self, x: f64, y: f64) {
        self.tooltip.x = x + self.offset.0;
        self.tooltip.y = y + self.offset.1;
    }
}
