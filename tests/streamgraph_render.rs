use serde_json::json;
use streamgraph::viz::types::{GRAPH, LEGEND, TICK, X_AXIS};
use streamgraph::{ChartConfig, Page, RawRow, SeriesKey, StreamGraph};

fn raw(rows: serde_json::Value) -> Vec<RawRow> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().cloned().unwrap())
        .collect()
}

fn two_months() -> Vec<RawRow> {
    raw(json!([
        {"Date": "2024-01-01", "GPT-4": 10, "Gemini": 5, "PaLM-2": 2, "Claude": 1, "LLaMA-3.1": 1},
        {"Date": "2024-02-01", "GPT-4": 8, "Gemini": 7, "PaLM-2": 3, "Claude": 2, "LLaMA-3.1": 2}
    ]))
}

#[test]
fn two_month_scenario_draws_layers_axis_and_legend() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut page = Page::new();
    let mut chart = StreamGraph::new(ChartConfig::default());
    chart.on_data_update(&mut page, &two_months());

    assert_eq!(chart.layout().max_sum, 22.0);

    let s = chart.surface();
    let graph = s.find_class(GRAPH).expect("graph group");
    assert_eq!(graph.translate, (20.0, 30.0));

    let areas = graph.areas();
    assert_eq!(areas.len(), 5);
    let hooks: Vec<Option<SeriesKey>> = areas.iter().map(|(a, _)| a.hook).collect();
    assert_eq!(hooks, SeriesKey::ALL.map(Some).to_vec());
    for (area, _) in &areas {
        assert_eq!(
            Some(area.fill),
            area.hook.map(|k| chart.config().colors.get(k))
        );
    }

    let axis = s.find_class(X_AXIS).expect("time axis");
    assert_eq!(axis.count_class(TICK), 2);
    assert_eq!(axis.labels(), vec!["Jan", "Feb"]);

    assert_eq!(s.count_class(LEGEND), 1);
}

#[test]
fn axis_sits_below_the_lowest_band() {
    let mut page = Page::new();
    let mut chart = StreamGraph::new(ChartConfig::default());
    chart.on_data_update(&mut page, &two_months());

    let layout = chart.layout();
    let lowest_px = layout.y_scale.map(layout.lowest_baseline().unwrap());
    let axis = chart.surface().find_class(X_AXIS).unwrap();
    assert!((axis.translate.1 - (lowest_px + 10.0)).abs() < 1e-9);
}

#[test]
fn redraw_with_same_rows_is_idempotent() {
    let mut page = Page::new();
    let mut chart = StreamGraph::new(ChartConfig::default());
    chart.on_data_update(&mut page, &two_months());
    let first = chart.surface().clone();
    let first_bands: Vec<(f64, f64)> = chart
        .layout()
        .layers
        .iter()
        .flat_map(|l| l.points.iter().map(|p| (p.y0, p.y1)))
        .collect();

    chart.on_data_update(&mut page, &two_months());
    assert_eq!(chart.surface(), &first);
    assert_eq!(chart.surface().count_class(GRAPH), 1);
    assert_eq!(chart.surface().count_class(LEGEND), 1);
    let second_bands: Vec<(f64, f64)> = chart
        .layout()
        .layers
        .iter()
        .flat_map(|l| l.points.iter().map(|p| (p.y0, p.y1)))
        .collect();
    assert_eq!(first_bands, second_bands);
}

#[test]
fn empty_input_draws_nothing() {
    let mut page = Page::new();
    let mut chart = StreamGraph::new(ChartConfig::default());
    chart.on_data_update(&mut page, &[]);
    assert_eq!(chart.surface().shape_count(), 0);
    assert!(chart.detail_surface().is_none());
    assert_eq!(page.container_count(), 0);
}

#[test]
fn empty_update_keeps_previous_frame() {
    let mut page = Page::new();
    let mut chart = StreamGraph::new(ChartConfig::default());
    chart.on_data_update(&mut page, &two_months());
    let before = chart.surface().clone();
    chart.on_data_update(&mut page, &[]);
    assert_eq!(chart.surface(), &before);
    assert_eq!(chart.rows().len(), 2);
}

#[test]
fn redraw_leaves_host_elements_alone() {
    let mut page = Page::new();
    let mut chart = StreamGraph::new(ChartConfig::default());
    chart.surface_mut().append_group("host-caption", (0.0, 0.0));
    chart.on_data_update(&mut page, &two_months());
    chart.on_data_update(&mut page, &two_months());
    assert_eq!(chart.surface().count_class("host-caption"), 1);
}

#[test]
fn malformed_rows_render_without_failing() {
    let mut page = Page::new();
    let mut chart = StreamGraph::new(ChartConfig::default());
    chart.on_data_update(
        &mut page,
        &raw(json!([
            {"Date": "yesterday", "GPT-4": "n/a"},
            {"Date": "2024-03-01", "Gemini": {"nested": true}, "Claude": 3}
        ])),
    );
    assert_eq!(chart.surface().find_class(GRAPH).unwrap().areas().len(), 5);
    assert!(chart.surface().to_svg_string().is_ok());
}

#[test]
fn subset_of_series_stacks_only_those() {
    let mut page = Page::new();
    let mut chart = StreamGraph::with_series(
        ChartConfig::default(),
        vec![SeriesKey::Claude, SeriesKey::Gpt4],
    );
    chart.on_data_update(&mut page, &two_months());
    // Row sums are 10 + 1 and 8 + 2.
    assert_eq!(chart.layout().max_sum, 11.0);
    let legend = chart.surface().find_class(LEGEND).unwrap();
    assert_eq!(legend.labels(), vec!["GPT-4", "Claude"]);
}

#[test]
fn svg_export_writes_file() {
    let mut page = Page::new();
    let mut chart = StreamGraph::new(ChartConfig::default());
    chart.on_data_update(&mut page, &two_months());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream.svg");
    chart.surface().save_svg(&path).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert_eq!(svg.matches("<polygon").count(), 5);
}
