//! streamgraph
//!
//! Core of an interactive streamgraph: a wiggle-offset stacked area chart of five model
//! series over time, with a hover-driven detail bar chart.
//!
//! ### Pipeline
//! - [`normalize`](normalize::normalize) untyped host rows into typed samples
//! - [`layout`](layout::layout) them: time/value scales and wiggle-stacked bands
//! - [`render_layers`](viz::render_layers) onto a retained [`Surface`]
//! - on hover, the [`HoverController`](hover::HoverController) drives
//!   [`render_detail`](viz::render_detail) and a [`ColorTransition`](transition::ColorTransition)
//!
//! [`StreamGraph`] wires all of it behind host events.
//!
//! ### Example
//! ```no_run
//! use std::time::Duration;
//! use streamgraph::{ChartConfig, Page, SeriesKey, StreamGraph};
//!
//! let rows: Vec<streamgraph::RawRow> = serde_json::from_str(
//!     r#"[{"Date": "2024-01-01", "GPT-4": 10, "Gemini": 5, "PaLM-2": 2, "Claude": 1, "LLaMA-3.1": 1},
//!         {"Date": "2024-02-01", "GPT-4": 8, "Gemini": 7, "PaLM-2": 3, "Claude": 2, "LLaMA-3.1": 2}]"#,
//! )?;
//! let mut page = Page::new();
//! let mut chart = StreamGraph::new(ChartConfig::default());
//! chart.on_data_update(&mut page, &rows);
//! chart.on_pointer_enter(SeriesKey::Claude, 200.0, 150.0, Duration::ZERO);
//! chart.tick(Duration::from_millis(600));
//! chart.surface().save_svg("streamgraph.svg")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod hover;
pub mod layout;
pub mod models;
pub mod normalize;
pub mod style;
pub mod surface;
pub mod transition;
pub mod viz;

pub use chart::{Page, StreamGraph};
pub use config::{ChartConfig, Margins, TooltipConfig};
pub use error::{Error, Result};
pub use models::{NormalizedRow, RawRow, SeriesKey, SeriesValues};
pub use style::{ColorMap, Rgb};
pub use surface::Surface;
