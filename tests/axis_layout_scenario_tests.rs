use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use approx::assert_relative_eq;
use axis_fit::api::{
    AxisLayoutConfig, AxisLayoutEngine, AxisLayoutRequest, DomainRoundMode, TickScene,
    estimate_required_size,
};
use axis_fit::core::nice_ticks::MAX_GENERATED_TICKS;
use axis_fit::core::{
    AxisAnchor, AxisScale, AxisValue, ClientSize, ContinuousScale, DiscreteScale, Font,
    OverlapMode, SearchTermination, Side, TextAlign, TextBaseline, TextMeasurer,
    compute_label_box,
};

/// Every character is `char_width` pixels wide; fonts are `height` tall,
/// of which labels reserve two thirds.
#[derive(Debug, Clone, Copy)]
struct FixedWidthMeasurer {
    char_width: f64,
    height: f64,
}

impl TextMeasurer for FixedWidthMeasurer {
    fn measure_width(&self, text: &str, _font: &Font) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn font_height(&self, _font: &Font) -> f64 {
        self.height
    }
}

/// Every non-empty label measures the same.
#[derive(Debug, Clone, Copy)]
struct UniformMeasurer {
    label_width: f64,
    height: f64,
}

impl TextMeasurer for UniformMeasurer {
    fn measure_width(&self, text: &str, _font: &Font) -> f64 {
        if text.is_empty() { 0.0 } else { self.label_width }
    }

    fn font_height(&self, _font: &Font) -> f64 {
        self.height
    }
}

/// 10px characters, 12px label text height.
const TEN_PX: FixedWidthMeasurer = FixedWidthMeasurer {
    char_width: 10.0,
    height: 18.0,
};

fn texts(ticks: &[TickScene]) -> Vec<&str> {
    ticks.iter().map(|tick| tick.text.as_str()).collect()
}

fn numbers(ticks: &[TickScene]) -> Vec<f64> {
    ticks
        .iter()
        .filter_map(|tick| tick.value.as_f64())
        .collect()
}

#[test]
fn city_labels_with_ample_bands_are_all_visible() {
    let measurer = UniformMeasurer {
        label_width: 40.0,
        height: 18.0,
    };
    let config = AxisLayoutConfig::default().with_overlap_mode(OverlapMode::Leave);
    let engine = AxisLayoutEngine::new(measurer, config).expect("engine init");
    let mut scale = AxisScale::Discrete(DiscreteScale::from_keys(["London", "Lisbon", "Paris"]));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(300.0, 50.0)))
        .expect("layout");

    assert_eq!(layout.include_modulo, 1);
    assert_eq!(texts(&layout.ticks), vec!["London", "Lisbon", "Paris"]);
    assert!(layout.ticks.iter().all(|tick| !tick.is_hidden));
    assert!(layout.hidden_groups.is_empty());
    let positions: Vec<f64> = layout.ticks.iter().map(|tick| tick.position_px).collect();
    assert_eq!(positions, vec![50.0, 150.0, 250.0]);
    // no ticks on discrete axes: 3px margin + 12px text
    assert_eq!(layout.axis_size, 15.0);
    assert!(layout.overflow_paddings.is_empty());
    assert_eq!(layout.tick_count, None);
}

#[test]
fn desired_count_five_over_0_97_steps_by_twenty() {
    let config = AxisLayoutConfig::default().with_desired_tick_count(Some(5));
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.0, 97.0).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(200.0, 40.0)))
        .expect("layout");

    assert_eq!(layout.tick_step, Some(20.0));
    assert_eq!(numbers(&layout.ticks), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
    assert_eq!(texts(&layout.ticks), vec!["0", "20", "40", "60", "80"]);
}

#[test]
fn tick_rounding_extends_domain_to_enclosing_ticks() {
    let config = AxisLayoutConfig::default()
        .with_desired_tick_count(Some(5))
        .with_domain_round_mode(DomainRoundMode::Tick);
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.0, 97.0).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(200.0, 40.0)))
        .expect("layout");

    assert_eq!(numbers(&layout.ticks), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    let AxisScale::Numeric(numeric) = &scale else {
        unreachable!("constructed as numeric");
    };
    assert_eq!(numeric.domain(), Some((0.0, 100.0)));
    assert_eq!(numeric.source_domain(), Some((0.0, 97.0)));
    assert_eq!(layout.ticks.last().map(|tick| tick.position_px), Some(200.0));
}

#[test]
fn single_desired_tick_overflowing_with_three_ticks_keeps_two() {
    let config = AxisLayoutConfig::default()
        .with_domain_round_mode(DomainRoundMode::Tick)
        .with_label_spacing_min(0.25);
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.5, 2.5).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(20.0, 40.0)))
        .expect("layout");

    let summary = layout.tick_count.expect("search ran");
    assert_eq!(summary.termination, Some(SearchTermination::Degenerate));
    assert_eq!(summary.desired_count, 1);
    assert_eq!(numbers(&layout.ticks), vec![0.0, 4.0]);
    assert_eq!(layout.tick_step, Some(4.0));
}

#[test]
fn empty_domain_yields_zero_size_axis() {
    let engine =
        AxisLayoutEngine::new(TEN_PX, AxisLayoutConfig::default()).expect("engine init");
    let request = AxisLayoutRequest::new(ClientSize::new(300.0, 40.0));

    let mut numeric = AxisScale::Numeric(ContinuousScale::empty());
    let layout = engine.layout(&mut numeric, &request).expect("layout");
    assert_eq!(layout.axis_size, 0.0);
    assert!(layout.ticks.is_empty());
    assert!(layout.overflow_paddings.is_empty());

    let mut discrete = AxisScale::Discrete(DiscreteScale::new(Vec::new()));
    let layout = engine.layout(&mut discrete, &request).expect("layout");
    assert_eq!(layout.axis_size, 0.0);
    assert!(layout.ticks.is_empty());
}

#[test]
fn repeated_layout_passes_are_identical() {
    let engine = AxisLayoutEngine::new(TEN_PX, AxisLayoutConfig::default().with_show_minor_ticks(true))
        .expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(-13.7, 4_521.0).expect("scale"));
    let request = AxisLayoutRequest::new(ClientSize::new(640.0, 40.0));

    let first = engine.layout(&mut scale, &request).expect("first pass");
    let second = engine.layout(&mut scale, &request).expect("second pass");
    assert_eq!(first, second);
    assert!(engine.label_width_cache_stats().hits > 0);
}

#[test]
fn horizontal_search_fits_labels_in_client_length() {
    let engine =
        AxisLayoutEngine::new(TEN_PX, AxisLayoutConfig::default()).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.0, 1_000.0).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(400.0, 40.0)))
        .expect("layout");

    let summary = layout.tick_count.expect("search ran");
    assert!(summary.termination.is_some());
    let widest = layout
        .ticks
        .iter()
        .map(|tick| tick.text.chars().count() as f64 * 10.0)
        .fold(0.0, f64::max);
    let spacing = 12.0 * 1.5;
    let needed = (layout.ticks.len() as f64 - 1.0) * (widest + spacing);
    assert!(needed <= 400.0, "labels need {needed}px");
    assert!(layout.ticks.len() >= 2);
}

#[test]
fn vertical_axis_uses_line_height_count() {
    let config = AxisLayoutConfig::default().with_anchor(AxisAnchor::Left);
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.0, 100.0).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(80.0, 300.0)))
        .expect("layout");

    // 300 / (12 * 2.5) = 10 desired -> step 10
    let summary = layout.tick_count.expect("continuous axis");
    assert_eq!(summary.desired_count, 10);
    assert_eq!(summary.termination, None);
    assert_eq!(layout.tick_step, Some(10.0));
    assert_eq!(layout.ticks.len(), 11);
    assert_eq!(layout.text_style.align, TextAlign::Right);
    assert_eq!(layout.text_style.baseline, TextBaseline::Middle);
    // widest label "100": 6 + 3 + 30 + 6
    assert_eq!(layout.axis_size, 45.0);
}

#[test]
fn crowded_categories_rotate_then_hide() {
    let keys: Vec<String> = (0..12).map(|i| format!("category-{i:02}")).collect();
    let request = AxisLayoutRequest::new(ClientSize::new(240.0, 200.0));

    let config = AxisLayoutConfig::default().with_overlap_mode(OverlapMode::RotateThenHide);
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Discrete(DiscreteScale::from_keys(keys.clone()));
    let layout = engine.layout(&mut scale, &request).expect("layout");

    assert_relative_eq!(layout.text_style.angle, FRAC_PI_4);
    assert_eq!(layout.text_style.align, TextAlign::Left);
    assert_eq!(layout.text_style.baseline, TextBaseline::Middle);
    assert_eq!(layout.include_modulo, 2);
    assert_eq!(layout.visible_ticks().count(), 6);
    assert_eq!(layout.hidden_groups.len(), 6);
    assert!(layout.hidden_groups.iter().all(|group| group.is_placeholder));

    let config = AxisLayoutConfig::default().with_overlap_mode(OverlapMode::Rotate);
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let layout = engine.layout(&mut scale, &request).expect("layout");
    assert_relative_eq!(layout.text_style.angle, FRAC_PI_4);
    assert_eq!(layout.include_modulo, 1);
}

#[test]
fn hide_mode_keeps_every_nth_category() {
    let keys: Vec<String> = (0..12).map(|i| format!("category-{i:02}")).collect();
    let config = AxisLayoutConfig::default().with_overlap_mode(OverlapMode::Hide);
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Discrete(DiscreteScale::from_keys(keys));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(240.0, 200.0)))
        .expect("layout");

    // (10 + 3 + 110) / 20 -> 7
    assert_eq!(layout.include_modulo, 7);
    let visible: Vec<usize> = layout.visible_ticks().map(|tick| tick.index).collect();
    assert_eq!(visible, vec![0, 7]);
    assert_eq!(layout.hidden_groups.len(), 2);
    assert_eq!(layout.hidden_groups[0].first_index, 1);
    assert_eq!(layout.hidden_groups[0].last_index, 6);
    assert_eq!(layout.hidden_groups[1].tick_count, 4);
}

#[test]
fn fixed_size_left_axis_trims_long_labels() {
    let config = AxisLayoutConfig::default()
        .with_anchor(AxisAnchor::Left)
        .with_show_ticks(true)
        .with_tooltip_enabled(true);
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale =
        AxisScale::Discrete(DiscreteScale::from_keys(["abcdefghijklmnopqrst", "tiny"]));
    let request =
        AxisLayoutRequest::new(ClientSize::new(300.0, 200.0)).with_fixed_axis_size(Some(60.0));

    let layout = engine.layout(&mut scale, &request).expect("layout");

    // 6 + (3 + 200) + 6
    assert_eq!(layout.required_axis_size, 215.0);
    assert_eq!(layout.axis_size, 60.0);
    // 60 - 2 * 6 leaves 48px for the 3px margin and the text.
    assert_eq!(layout.max_text_width, Some(45.0));
    assert_eq!(layout.ticks[0].display_text, "a...");
    assert_eq!(layout.ticks[0].tooltip.as_deref(), Some("abcdefghijklmnopqrst"));
    assert_eq!(layout.ticks[1].display_text, "tiny");
    assert_eq!(layout.ticks[1].tooltip, None);

    let style = layout.text_style;
    let trimmed = compute_label_box(
        45.0,
        12.0,
        style.align,
        style.baseline,
        style.angle,
        style.margin,
    );
    let needed = estimate_required_size(Some(&trimmed), 6.0, AxisAnchor::Left);
    assert!(needed <= layout.axis_size, "trimmed labels need {needed}px");
}

#[test]
fn thin_client_trims_rotated_labels_on_bottom_axis() {
    let config = AxisLayoutConfig::default().with_label_angle(Some(FRAC_PI_2));
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Discrete(DiscreteScale::from_keys(["abcdefghij", "klmnopqrst"]));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(200.0, 44.0)))
        .expect("layout");

    // Upright 100px labels centered on their tick reach 50px down.
    assert_relative_eq!(layout.required_axis_size, 50.0, epsilon = 1e-9);
    assert_eq!(layout.axis_size, 44.0);
    let max_text_width = layout.max_text_width.expect("labels are trimmed");
    assert_relative_eq!(max_text_width, 88.0, epsilon = 1e-9);
    assert_eq!(layout.ticks[0].display_text, "abcde...");

    let style = layout.text_style;
    let trimmed = compute_label_box(
        max_text_width,
        12.0,
        style.align,
        style.baseline,
        style.angle,
        style.margin,
    );
    let needed = estimate_required_size(Some(&trimmed), 0.0, AxisAnchor::Bottom);
    assert!(needed <= layout.axis_size + 1e-9, "trimmed labels need {needed}px");
}

#[test]
fn capped_exponent_over_a_huge_domain_stops_at_the_tick_cap() {
    let config = AxisLayoutConfig::default()
        .with_desired_tick_count(Some(5))
        .with_number_exponent_bounds(None, Some(0));
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.0, 1e20).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(400.0, 40.0)))
        .expect("layout");

    assert_eq!(layout.tick_step, Some(1.0));
    assert_eq!(layout.ticks.len(), MAX_GENERATED_TICKS);
}

#[test]
fn capped_exponent_ends_the_search_on_the_first_coarse_request() {
    let config = AxisLayoutConfig::default().with_number_exponent_bounds(None, Some(0));
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.0, 1_000.0).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(400.0, 40.0)))
        .expect("layout");

    let summary = layout.tick_count.expect("search ran");
    assert_eq!(summary.termination, Some(SearchTermination::ExponentSaturated));
    assert_eq!(summary.iterations, 1);
    assert_eq!(layout.ticks.len(), 1_001);
}

#[test]
fn edge_labels_request_overflow_padding() {
    let config = AxisLayoutConfig::default().with_desired_tick_count(Some(5));
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.0, 100.0).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(200.0, 40.0)))
        .expect("layout");

    // "0" is 10px wide centered on 0; "100" is 30px wide centered on 200.
    assert_eq!(layout.overflow_paddings.get(&Side::Left).copied(), Some(5.0));
    assert_eq!(layout.overflow_paddings.get(&Side::Right).copied(), Some(15.0));
}

#[test]
fn minor_ticks_sit_between_major_ticks() {
    let config = AxisLayoutConfig::default()
        .with_desired_tick_count(Some(5))
        .with_show_minor_ticks(true);
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.0, 100.0).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(200.0, 40.0)))
        .expect("layout");

    let minor: Vec<(f64, f64)> = layout
        .minor_ticks
        .iter()
        .map(|tick| (tick.value, tick.position_px))
        .collect();
    assert_eq!(
        minor,
        vec![(10.0, 20.0), (30.0, 60.0), (50.0, 100.0), (70.0, 140.0), (90.0, 180.0)]
    );
}

#[test]
fn reversed_axis_runs_from_the_end_side() {
    let config = AxisLayoutConfig::default()
        .with_desired_tick_count(Some(5))
        .with_reversed(true);
    let engine = AxisLayoutEngine::new(TEN_PX, config).expect("engine init");
    let mut scale = AxisScale::Numeric(ContinuousScale::new(0.0, 100.0).expect("scale"));

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(200.0, 40.0)))
        .expect("layout");
    assert_eq!(layout.ticks.first().map(|tick| tick.position_px), Some(200.0));
    assert_eq!(layout.ticks.last().map(|tick| tick.position_px), Some(0.0));

    let mut discrete = AxisScale::Discrete(DiscreteScale::from_keys(["a", "b", "c"]));
    let layout = engine
        .layout(&mut discrete, &AxisLayoutRequest::new(ClientSize::new(300.0, 40.0)))
        .expect("layout");
    assert_eq!(texts(&layout.ticks), vec!["c", "b", "a"]);
}

#[test]
fn ticks_default_to_continuous_axes_only() {
    let request = AxisLayoutRequest::new(ClientSize::new(100.0, 40.0));
    let layout_with = |config: AxisLayoutConfig, scale: &mut AxisScale| {
        AxisLayoutEngine::new(TEN_PX, config)
            .expect("engine init")
            .layout(scale, &request)
            .expect("layout")
    };

    let mut discrete = AxisScale::Discrete(DiscreteScale::from_keys(["a"]));
    // 3px margin + 12px text, plus one 6px tick when shown
    assert_eq!(layout_with(AxisLayoutConfig::default(), &mut discrete).axis_size, 15.0);
    let shown = AxisLayoutConfig::default().with_show_ticks(true);
    assert_eq!(layout_with(shown, &mut discrete).axis_size, 21.0);

    let mut numeric = AxisScale::Numeric(ContinuousScale::new(0.0, 1.0).expect("scale"));
    let defaults = AxisLayoutConfig::default().with_desired_tick_count(Some(1));
    assert_eq!(layout_with(defaults.clone(), &mut numeric).axis_size, 21.0);
    let hidden = defaults.with_show_ticks(false);
    assert_eq!(layout_with(hidden, &mut numeric).axis_size, 15.0);
}

#[test]
fn month_ticks_are_formatted_by_month() {
    let engine =
        AxisLayoutEngine::new(TEN_PX, AxisLayoutConfig::default().with_desired_tick_count(Some(5)))
            .expect("engine init");
    // 2024-01-15 .. 2024-06-15
    let mut scale = AxisScale::TimeSeries(
        ContinuousScale::new(1_705_276_800.0, 1_718_409_600.0).expect("scale"),
    );

    let layout = engine
        .layout(&mut scale, &AxisLayoutRequest::new(ClientSize::new(600.0, 40.0)))
        .expect("layout");

    assert_eq!(
        texts(&layout.ticks),
        vec!["2024-02", "2024-03", "2024-04", "2024-05", "2024-06"]
    );
    assert!(
        layout
            .ticks
            .iter()
            .all(|tick| matches!(tick.value, AxisValue::Time(_)))
    );
}
