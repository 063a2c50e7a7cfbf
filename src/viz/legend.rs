//! Series legend: one swatch and name per key, top of the stack listed first.

use crate::models::SeriesKey;
use crate::style::{ColorMap, Rgb};
use crate::surface::{Anchor, Label, Node, Rect, Surface};

use super::types::{LEGEND, LEGEND_ITEM};

const SWATCH_PX: f64 = 18.0;
const ROW_PITCH_PX: f64 = 25.0;
const TEXT_GAP_PX: f64 = 24.0;
const FONT_PX: u32 = 14;

/// Draw the legend group at `origin`, listing `keys` in reverse stack order.
pub fn draw_legend(surface: &mut Surface, keys: &[SeriesKey], colors: &ColorMap, origin: (f64, f64)) {
    let legend = surface.append_group(LEGEND, origin);
    for (i, key) in keys.iter().rev().enumerate() {
        let item = legend.append_group(LEGEND_ITEM, (0.0, i as f64 * ROW_PITCH_PX));
        item.push(Node::Rect(Rect {
            x: 0.0,
            y: 0.0,
            width: SWATCH_PX,
            height: SWATCH_PX,
            fill: colors.get(*key),
        }));
        item.push(Node::Label(Label {
            text: key.name().to_string(),
            pos: (TEXT_GAP_PX, SWATCH_PX / 2.0),
            size: FONT_PX,
            anchor: Anchor::Start,
            color: Rgb::new(0, 0, 0),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_keys_top_down() {
        let mut s = Surface::new(600, 600);
        draw_legend(&mut s, &SeriesKey::ALL, &ColorMap::default(), (510.0, 120.0));
        let legend = s.find_class(LEGEND).unwrap();
        assert_eq!(legend.translate, (510.0, 120.0));
        assert_eq!(legend.count_class(LEGEND_ITEM), 5);
        assert_eq!(
            legend.labels(),
            vec!["LLaMA-3.1", "Claude", "PaLM-2", "Gemini", "GPT-4"]
        );
        let swatches = legend.rects();
        assert_eq!(swatches[0].fill, ColorMap::default().get(SeriesKey::Llama31));
    }
}
