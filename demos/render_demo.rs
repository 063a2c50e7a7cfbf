//! Render a year of sample usage numbers, hover two series and write the frames as SVG.
//!
//! Run with `RUST_LOG=debug` to follow the pipeline. Output goes to
//! `target/streamgraph-demo/`.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use streamgraph::{ChartConfig, Page, RawRow, SeriesKey, StreamGraph};

fn sample_rows() -> Vec<RawRow> {
    let usage = [
        ("2024-01-01", [10, 5, 2, 1, 1]),
        ("2024-02-01", [8, 7, 3, 2, 2]),
        ("2024-03-01", [9, 8, 3, 4, 3]),
        ("2024-04-01", [11, 7, 2, 6, 5]),
        ("2024-05-01", [12, 9, 2, 7, 6]),
        ("2024-06-01", [10, 11, 1, 9, 8]),
        ("2024-07-01", [9, 12, 1, 11, 10]),
        ("2024-08-01", [8, 12, 1, 12, 13]),
        ("2024-09-01", [7, 13, 0, 14, 12]),
        ("2024-10-01", [7, 12, 0, 15, 14]),
        ("2024-11-01", [6, 14, 0, 16, 15]),
        ("2024-12-01", [6, 15, 0, 18, 16]),
    ];
    usage
        .iter()
        .map(|(date, v)| {
            let row = json!({
                "Date": date,
                "GPT-4": v[0],
                "Gemini": v[1],
                "PaLM-2": v[2],
                "Claude": v[3],
                "LLaMA-3.1": v[4],
            });
            row.as_object().cloned().unwrap_or_default()
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let out = Path::new("target/streamgraph-demo");
    std::fs::create_dir_all(out)?;

    let mut page = Page::new();
    let mut chart = StreamGraph::new(ChartConfig::default());
    chart.on_data_update(&mut page, &sample_rows());
    chart.surface().save_svg(out.join("streamgraph.svg"))?;

    let ms = Duration::from_millis;
    chart.on_pointer_enter(SeriesKey::Gpt4, 120.0, 200.0, ms(0));
    chart.tick(ms(600));
    chart.on_pointer_leave();
    chart.on_pointer_enter(SeriesKey::Claude, 300.0, 180.0, ms(1000));
    chart.tick(ms(1300));
    if let Some(detail) = chart.detail_surface() {
        detail.save_svg(out.join("detail_mid_transition.svg"))?;
    }
    chart.tick(ms(1600));
    if let Some(detail) = chart.detail_surface() {
        detail.save_svg(out.join("detail_final.svg"))?;
    }

    let state = chart.hover_state();
    println!(
        "hovered {:?} (previously {:?}); tooltip at {:?}",
        state.current,
        state.previous,
        chart.tooltip_position()
    );
    println!("wrote SVG frames to {}", out.display());
    Ok(())
}
