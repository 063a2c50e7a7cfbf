//! Retained drawing surface.
//!
//! A [`Surface`] is a small scene graph of class-tagged groups. Renderers own the groups
//! they create (found and removed by class name) and leave everything else alone, so
//! several producers can share one surface. Filled areas may carry a pointer hook
//! (the series they belong to); [`Surface::hit_test`] resolves pointer positions to hooks.
//!
//! Export goes through plotters' SVG backend.

use std::path::Path;

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;

use crate::error::{Error, Result};
use crate::models::SeriesKey;
use crate::style::Rgb;

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Closed filled polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub points: Vec<(f64, f64)>,
    pub fill: Rgb,
    /// Series notified when the pointer enters, moves over or leaves this shape.
    pub hook: Option<SeriesKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub stroke: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: (f64, f64),
    pub size: u32,
    pub anchor: Anchor,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Area(Area),
    Rect(Rect),
    Line(Line),
    Label(Label),
}

/// Translated container of nodes, optionally tagged with a class name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub class: Option<String>,
    pub translate: (f64, f64),
    pub children: Vec<Node>,
}

impl Group {
    pub fn new(class: impl Into<String>, translate: (f64, f64)) -> Self {
        Self {
            class: Some(class.into()),
            translate,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Append a child group and return it for filling.
    pub fn append_group(&mut self, class: impl Into<String>, translate: (f64, f64)) -> &mut Group {
        self.children.push(Node::Group(Group::new(class, translate)));
        match self.children.last_mut() {
            Some(Node::Group(g)) => g,
            _ => unreachable!("just pushed a group"),
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.class.as_deref() == Some(class)
    }

    /// Remove every descendant group tagged `class`; returns how many were removed.
    pub fn remove_class(&mut self, class: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|n| !matches!(n, Node::Group(g) if g.has_class(class)));
        let mut removed = before - self.children.len();
        for n in &mut self.children {
            if let Node::Group(g) = n {
                removed += g.remove_class(class);
            }
        }
        removed
    }

    pub fn find_class(&self, class: &str) -> Option<&Group> {
        self.children.iter().find_map(|n| match n {
            Node::Group(g) if g.has_class(class) => Some(g),
            Node::Group(g) => g.find_class(class),
            _ => None,
        })
    }

    pub fn find_class_mut(&mut self, class: &str) -> Option<&mut Group> {
        for n in &mut self.children {
            if let Node::Group(g) = n {
                if g.has_class(class) {
                    return Some(g);
                }
                if let Some(found) = g.find_class_mut(class) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn count_class(&self, class: &str) -> usize {
        self.children
            .iter()
            .map(|n| match n {
                Node::Group(g) => usize::from(g.has_class(class)) + g.count_class(class),
                _ => 0,
            })
            .sum()
    }

    /// Number of drawn (non-group) nodes in this subtree.
    pub fn shape_count(&self) -> usize {
        self.children
            .iter()
            .map(|n| match n {
                Node::Group(g) => g.shape_count(),
                _ => 1,
            })
            .sum()
    }

    /// Areas in paint order, with their absolute offset.
    pub fn areas(&self) -> Vec<(&Area, (f64, f64))> {
        let mut out = Vec::new();
        self.collect_areas((0.0, 0.0), &mut out);
        out
    }

    fn collect_areas<'a>(&'a self, origin: (f64, f64), out: &mut Vec<(&'a Area, (f64, f64))>) {
        let origin = (origin.0 + self.translate.0, origin.1 + self.translate.1);
        for n in &self.children {
            match n {
                Node::Area(a) => out.push((a, origin)),
                Node::Group(g) => g.collect_areas(origin, out),
                _ => {}
            }
        }
    }

    /// Rectangles in paint order (relative to their own group).
    pub fn rects(&self) -> Vec<&Rect> {
        let mut out = Vec::new();
        for n in &self.children {
            match n {
                Node::Rect(r) => out.push(r),
                Node::Group(g) => out.extend(g.rects()),
                _ => {}
            }
        }
        out
    }

    pub fn rects_mut(&mut self) -> Vec<&mut Rect> {
        let mut out = Vec::new();
        for n in &mut self.children {
            match n {
                Node::Rect(r) => out.push(r),
                Node::Group(g) => out.extend(g.rects_mut()),
                _ => {}
            }
        }
        out
    }

    /// Label texts in paint order.
    pub fn labels(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for n in &self.children {
            match n {
                Node::Label(l) => out.push(l.text.as_str()),
                Node::Group(g) => out.extend(g.labels()),
                _ => {}
            }
        }
        out
    }

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, origin: (f64, f64)) -> Result<()> {
        let (ox, oy) = (origin.0 + self.translate.0, origin.1 + self.translate.1);
        let px = |p: (f64, f64)| ((p.0 + ox).round() as i32, (p.1 + oy).round() as i32);
        for n in &self.children {
            match n {
                Node::Group(g) => g.draw(area, (ox, oy))?,
                Node::Area(a) => {
                    if a.points.len() < 3 {
                        continue;
                    }
                    let pts: Vec<(i32, i32)> = a.points.iter().copied().map(px).collect();
                    area.draw(&Polygon::new(pts, RGBColor::from(a.fill).filled()))
                        .map_err(draw_err)?;
                }
                Node::Rect(r) => {
                    let c0 = px((r.x, r.y));
                    let c1 = px((r.x + r.width, r.y + r.height));
                    area.draw(&Rectangle::new([c0, c1], RGBColor::from(r.fill).filled()))
                        .map_err(draw_err)?;
                }
                Node::Line(l) => {
                    area.draw(&PathElement::new(
                        vec![px(l.from), px(l.to)],
                        RGBColor::from(l.stroke).stroke_width(1),
                    ))
                    .map_err(draw_err)?;
                }
                Node::Label(l) => {
                    let h_pos = match l.anchor {
                        Anchor::Start => HPos::Left,
                        Anchor::Middle => HPos::Center,
                        Anchor::End => HPos::Right,
                    };
                    let style = (FontFamily::SansSerif, l.size as f64)
                        .into_font()
                        .color(&RGBColor::from(l.color))
                        .pos(Pos::new(h_pos, VPos::Center));
                    area.draw(&Text::new(l.text.clone(), px(l.pos), style))
                        .map_err(draw_err)?;
                }
            }
        }
        Ok(())
    }
}

fn draw_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Draw(format!("{e:?}"))
}

/// Fixed-size drawing target holding a root group.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    root: Group,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            root: Group::default(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    pub fn append_group(&mut self, class: impl Into<String>, translate: (f64, f64)) -> &mut Group {
        self.root.append_group(class, translate)
    }

    pub fn remove_class(&mut self, class: &str) -> usize {
        self.root.remove_class(class)
    }

    pub fn find_class(&self, class: &str) -> Option<&Group> {
        self.root.find_class(class)
    }

    pub fn find_class_mut(&mut self, class: &str) -> Option<&mut Group> {
        self.root.find_class_mut(class)
    }

    pub fn count_class(&self, class: &str) -> usize {
        self.root.count_class(class)
    }

    pub fn shape_count(&self) -> usize {
        self.root.shape_count()
    }

    /// Hook of the topmost hooked area containing `(x, y)` (surface coordinates).
    pub fn hit_test(&self, x: f64, y: f64) -> Option<SeriesKey> {
        self.root
            .areas()
            .into_iter()
            .rev()
            .find(|(a, (ox, oy))| a.hook.is_some() && contains(&a.points, x - ox, y - oy))
            .and_then(|(a, _)| a.hook)
    }

    /// Render to an SVG document.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            self.root.draw(&root, (0.0, 0.0))?;
            root.present().map_err(draw_err)?;
        }
        Ok(buf)
    }

    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let svg = self.to_svg_string()?;
        std::fs::write(path.as_ref(), svg)?;
        debug!("wrote {}", path.as_ref().display());
        Ok(())
    }
}

/// Even-odd point-in-polygon test.
fn contains(poly: &[(f64, f64)], x: f64, y: f64) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (xi, yi) = poly[i];
        let (xj, yj) = poly[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, s: f64, hook: Option<SeriesKey>) -> Node {
        Node::Area(Area {
            points: vec![(x, y), (x + s, y), (x + s, y + s), (x, y + s)],
            fill: Rgb::new(1, 2, 3),
            hook,
        })
    }

    #[test]
    fn remove_class_spares_siblings() {
        let mut s = Surface::new(100, 100);
        s.append_group("bars", (0.0, 0.0)).push(square(0.0, 0.0, 1.0, None));
        s.append_group("host", (0.0, 0.0)).append_group("bars", (0.0, 0.0));
        s.append_group("other", (0.0, 0.0)).push(square(0.0, 0.0, 1.0, None));
        assert_eq!(s.count_class("bars"), 2);
        assert_eq!(s.remove_class("bars"), 2);
        assert_eq!(s.count_class("bars"), 0);
        assert!(s.find_class("host").is_some());
        assert_eq!(s.find_class("other").unwrap().shape_count(), 1);
    }

    #[test]
    fn hit_test_prefers_topmost_and_respects_translation() {
        let mut s = Surface::new(100, 100);
        let g = s.append_group("graph", (10.0, 10.0));
        g.push(square(0.0, 0.0, 50.0, Some(SeriesKey::Gpt4)));
        g.push(square(20.0, 20.0, 10.0, Some(SeriesKey::Claude)));
        g.push(square(40.0, 40.0, 5.0, None));
        assert_eq!(s.hit_test(15.0, 15.0), Some(SeriesKey::Gpt4));
        assert_eq!(s.hit_test(35.0, 35.0), Some(SeriesKey::Claude));
        // Unhooked shape on top does not swallow the event.
        assert_eq!(s.hit_test(52.0, 52.0), Some(SeriesKey::Gpt4));
        assert_eq!(s.hit_test(5.0, 5.0), None);
        assert_eq!(s.hit_test(95.0, 95.0), None);
    }

    #[test]
    fn svg_export_contains_shapes() {
        let mut s = Surface::new(120, 80);
        let g = s.append_group("graph", (0.0, 0.0));
        g.push(square(10.0, 10.0, 20.0, None));
        g.push(Node::Rect(Rect {
            x: 40.0,
            y: 10.0,
            width: 10.0,
            height: 30.0,
            fill: Rgb::new(0xe4, 0x1a, 0x1c),
        }));
        let svg = s.to_svg_string().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<polygon"));
        assert!(svg.to_ascii_lowercase().contains("#e41a1c"));
    }

    #[test]
    fn save_svg_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.svg");
        Surface::new(10, 10).save_svg(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
