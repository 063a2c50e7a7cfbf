//! Axis drawing into surface groups: a domain line, tick marks and tick labels.
//!
//! Each tick is its own [`TICK`] group translated to the tick position, so callers and
//! tests can read labels back in order.

use crate::layout::{BandScale, LinearScale, TimeScale};
use crate::style::Rgb;
use crate::surface::{Anchor, Group, Label, Line, Node};

use super::types::TICK;
use super::util::{format_tick, month_label, tick_precision};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const FONT_PX: u32 = 10;
const INK: Rgb = Rgb::new(0, 0, 0);

fn line(from: (f64, f64), to: (f64, f64)) -> Node {
    Node::Line(Line {
        from,
        to,
        stroke: INK,
    })
}

fn label(text: String, pos: (f64, f64), anchor: Anchor) -> Node {
    Node::Label(Label {
        text,
        pos,
        size: FONT_PX,
        anchor,
        color: INK,
    })
}

/// Vertical distance from the axis line to the middle of a bottom tick label.
fn bottom_label_y() -> f64 {
    TICK_SIZE + TICK_PADDING + FONT_PX as f64 / 2.0
}

fn bottom_tick(g: &mut Group, x: f64, text: String) {
    let tick = g.append_group(TICK, (x, 0.0));
    tick.push(line((0.0, 0.0), (0.0, TICK_SIZE)));
    tick.push(label(text, (0.0, bottom_label_y()), Anchor::Middle));
}

/// Time axis below the plot; ticks at month starts labeled with short month names.
pub fn time_axis_bottom(g: &mut Group, scale: &TimeScale, max_ticks: usize) {
    let (r0, r1) = scale.range;
    g.push(line((r0, TICK_SIZE), (r0, 0.0)));
    g.push(line((r0, 0.0), (r1, 0.0)));
    g.push(line((r1, 0.0), (r1, TICK_SIZE)));
    for t in scale.month_ticks(max_ticks) {
        if let Some(x) = scale.map(Some(t)) {
            bottom_tick(g, x, month_label(Some(t)));
        }
    }
}

/// Band axis below a bar chart, one tick per band at its center, no outer ticks.
pub fn band_axis_bottom(g: &mut Group, scale: &BandScale, labels: &[String], range: (f64, f64)) {
    g.push(line((range.0, 0.0), (range.1, 0.0)));
    let half = scale.bandwidth() / 2.0;
    for (i, text) in labels.iter().enumerate() {
        if let Some(x) = scale.position(i) {
            bottom_tick(g, x + half, text.clone());
        }
    }
}

/// Value axis on the left with round-number ticks.
pub fn linear_axis_left(g: &mut Group, scale: &LinearScale, count: usize) {
    let (r0, r1) = scale.range;
    g.push(line((-TICK_SIZE, r0), (0.0, r0)));
    g.push(line((0.0, r0), (0.0, r1)));
    g.push(line((0.0, r1), (-TICK_SIZE, r1)));
    let precision = tick_precision(scale.tick_step(count));
    for v in scale.ticks(count) {
        let tick = g.append_group(TICK, (0.0, scale.map(v)));
        tick.push(line((-TICK_SIZE, 0.0), (0.0, 0.0)));
        tick.push(label(
            format_tick(v, precision),
            (-(TICK_SIZE + TICK_PADDING), 0.0),
            Anchor::End,
        ));
    }
}
