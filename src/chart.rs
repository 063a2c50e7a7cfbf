//! The interactive streamgraph component.
//!
//! A [`StreamGraph`] is created when the host mounts the chart and dropped (or
//! [`unmount`](StreamGraph::unmount)ed) when it goes away. Everything it needs between
//! events (the last normalized rows, hover state, the running color transition) lives
//! in the instance. The only state shared between instances is the tooltip container on
//! the host [`Page`], looked up by class name before one is created.
//!
//! All handlers run on the host's single UI thread; shared handles are `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::ChartConfig;
use crate::hover::{HoverController, HoverPhase, HoverState, TooltipPosition};
use crate::layout::{Layout, layout};
use crate::models::{NormalizedRow, RawRow, SeriesKey};
use crate::normalize::normalize;
use crate::surface::Surface;
use crate::transition::ColorTransition;
use crate::viz::{paint_bars, render_detail, render_layers};

/// Floating tooltip element: where it is, whether it shows, and the chart surfaces in it.
#[derive(Debug, Clone, Default)]
pub struct TooltipContainer {
    pub position: TooltipPosition,
    /// One detail surface per mounted chart instance, keyed by slot id in mount order.
    pub surfaces: BTreeMap<u64, Surface>,
    next_id: u64,
}

impl TooltipContainer {
    /// Add `surface` and return the id it is stored under. Ids are never reused.
    pub fn attach(&mut self, surface: Surface) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.surfaces.insert(id, surface);
        id
    }

    /// Remove the surface stored under `id`, if it is still there.
    pub fn detach(&mut self, id: u64) -> Option<Surface> {
        self.surfaces.remove(&id)
    }
}

pub type SharedTooltip = Rc<RefCell<TooltipContainer>>;

/// Host page: body-level elements that chart instances may share, keyed by class name.
#[derive(Debug, Default)]
pub struct Page {
    containers: HashMap<String, SharedTooltip>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing container with `class`, if any.
    pub fn find(&self, class: &str) -> Option<SharedTooltip> {
        self.containers.get(class).cloned()
    }

    /// Existing container with `class`, or a fresh empty one registered under it.
    pub fn find_or_create(&mut self, class: &str) -> SharedTooltip {
        self.containers
            .entry(class.to_string())
            .or_insert_with(|| {
                debug!("page: creating tooltip container .{class}");
                Rc::new(RefCell::new(TooltipContainer::default()))
            })
            .clone()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }
}

/// This instance's surface inside a (possibly shared) tooltip container.
///
/// Dropping the slot takes the surface back out; the container itself stays on the page.
#[derive(Debug)]
struct TooltipSlot {
    container: SharedTooltip,
    id: u64,
}

impl TooltipSlot {
    fn with_surface<R>(&self, f: impl FnOnce(&mut Surface) -> R) -> Option<R> {
        let mut c = self.container.borrow_mut();
        c.surfaces.get_mut(&self.id).map(f)
    }
}

impl Drop for TooltipSlot {
    fn drop(&mut self) {
        match self.container.try_borrow_mut() {
            Ok(mut c) => {
                c.detach(self.id);
                debug!("tooltip: released slot {} ({} left)", self.id, c.surfaces.len());
            }
            Err(_) => warn!("tooltip: container busy, slot {} not released", self.id),
        }
    }
}

/// Streamgraph with hover-driven detail chart.
#[derive(Debug)]
pub struct StreamGraph {
    config: ChartConfig,
    keys: Vec<SeriesKey>,
    surface: Surface,
    rows: Vec<NormalizedRow>,
    hover: HoverController,
    tooltip: Option<TooltipSlot>,
    transition: Option<ColorTransition>,
    /// Series whose shape the pointer is over, as seen by [`pointer_at`](Self::pointer_at).
    pointer_over: Option<SeriesKey>,
}

impl StreamGraph {
    /// Mount a chart over all five series.
    pub fn new(config: ChartConfig) -> Self {
        Self::with_series(config, SeriesKey::ALL.to_vec())
    }

    /// Mount a chart stacking only `keys`, in the given order.
    pub fn with_series(config: ChartConfig, keys: Vec<SeriesKey>) -> Self {
        let surface = Surface::new(config.frame_width, config.frame_height);
        let hover = HoverController::new((config.tooltip.offset_x, config.tooltip.offset_y));
        Self {
            config,
            keys,
            surface,
            rows: Vec::new(),
            hover,
            tooltip: None,
            transition: None,
            pointer_over: None,
        }
    }

    /// Host signal that new rows are available.
    ///
    /// Empty input is skipped: the previous frame stays on the surface as it was.
    pub fn on_data_update(&mut self, page: &mut Page, rows: &[RawRow]) {
        if rows.is_empty() {
            debug!("data update with no rows, keeping previous frame");
            return;
        }
        self.rows = normalize(rows, &self.keys);
        let layout = layout(&self.rows, &self.keys, &self.config);
        render_layers(&mut self.surface, &layout, &self.config.colors, &self.config);
        info!(
            "rendered {} rows, {} series (max stacked sum {})",
            self.rows.len(),
            self.keys.len(),
            layout.max_sum
        );
        self.ensure_tooltip(page);
    }

    fn ensure_tooltip(&mut self, page: &mut Page) {
        if self.tooltip.is_some() {
            return;
        }
        let container = page.find_or_create(&self.config.tooltip.class_name);
        let id = container
            .borrow_mut()
            .attach(Surface::new(self.config.tooltip.width, self.config.tooltip.height));
        self.tooltip = Some(TooltipSlot { container, id });
    }

    /// Layout of the rows from the last data update (recomputed; cheap and pure).
    pub fn layout(&self) -> Layout<'_> {
        layout(&self.rows, &self.keys, &self.config)
    }

    /// Pointer entered the shape of `series` at `(x, y)`.
    pub fn on_pointer_enter(&mut self, series: SeriesKey, x: f64, y: f64, now: Duration) {
        let req = self.hover.pointer_enter(series, x, y);
        self.sync_tooltip_position();
        let Some(slot) = &self.tooltip else {
            return;
        };
        let (rows, colors, cfg) = (&self.rows, &self.config.colors, &self.config.tooltip);
        // A new hover replaces whatever transition was still running.
        self.transition = slot.with_surface(|surface| {
            render_detail(surface, req.series, req.previous, rows, colors, cfg, now)
        });
    }

    /// Pointer moved while over a hooked shape.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.hover.pointer_move(x, y);
        self.sync_tooltip_position();
    }

    /// Pointer left a hooked shape.
    pub fn on_pointer_leave(&mut self) {
        self.hover.pointer_leave();
        self.sync_tooltip_position();
    }

    /// Resolve a raw pointer position against the drawn shapes and dispatch the resulting
    /// enter/move/leave events. Returns the series under the pointer.
    pub fn pointer_at(&mut self, x: f64, y: f64, now: Duration) -> Option<SeriesKey> {
        let hit = self.surface.hit_test(x, y);
        match (self.pointer_over, hit) {
            (Some(a), Some(b)) if a == b => self.on_pointer_move(x, y),
            (before, after) => {
                if before.is_some() {
                    self.on_pointer_leave();
                }
                if let Some(series) = after {
                    self.on_pointer_enter(series, x, y, now);
                }
            }
        }
        self.pointer_over = hit;
        hit
    }

    /// Advance the bar color transition to `now`. Returns `true` while it is still running.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(t) = self.transition else {
            return false;
        };
        if let Some(slot) = &self.tooltip {
            slot.with_surface(|surface| paint_bars(surface, t.color_at(now)));
        }
        if t.is_finished(now) {
            self.transition = None;
            return false;
        }
        true
    }

    fn sync_tooltip_position(&self) {
        if let Some(slot) = &self.tooltip {
            slot.container.borrow_mut().position = self.hover.tooltip();
        }
    }

    /// Tear the chart down: its detail surface leaves the tooltip container, which stays
    /// on the page for other instances. Dropping the chart does the same.
    pub fn unmount(mut self) {
        debug!("unmounting streamgraph");
        self.transition = None;
        self.tooltip = None;
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn series(&self) -> &[SeriesKey] {
        &self.keys
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Host access to the primary surface, e.g. to add its own decorations.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover.state()
    }

    pub fn hover_phase(&self) -> HoverPhase {
        self.hover.phase()
    }

    pub fn tooltip_position(&self) -> TooltipPosition {
        self.hover.tooltip()
    }

    pub fn transition(&self) -> Option<ColorTransition> {
        self.transition
    }

    /// Snapshot of this instance's detail surface, once the tooltip exists.
    pub fn detail_surface(&self) -> Option<Surface> {
        self.tooltip
            .as_ref()
            .and_then(|slot| slot.with_surface(|s| s.clone()))
    }

    /// Run `f` on this instance's detail surface, once the tooltip exists.
    pub fn with_detail_surface<R>(&self, f: impl FnOnce(&mut Surface) -> R) -> Option<R> {
        self.tooltip.as_ref().and_then(|slot| slot.with_surface(f))
    }
}
