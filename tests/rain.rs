// Native integration tests for the matrix-rain model.
// These drive `RainLoop` with a seeded RNG and a recording sink, so no
// browser APIs are touched.

use portfolio_wasm::{FrameOutcome, GlyphSink, RainConfig, RainLoop, RainSlot};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Default)]
struct Tally {
    frames: usize,
    glyphs: usize,
    colors: Vec<String>,
}

impl GlyphSink for Tally {
    fn fill_trail(&mut self, _color: &str, _width: f64, _height: f64) {
        self.frames += 1;
    }
    fn set_glyph_style(&mut self, color: &str, _font: &str) {
        self.colors.push(color.to_string());
    }
    fn draw_glyph(&mut self, _glyph: char, _x: f64, _y: f64) {
        self.glyphs += 1;
    }
}

fn run_to_end(rain: &mut RainLoop, seed: u64) -> (Vec<f64>, Vec<Vec<u32>>, usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sink = Tally::default();
    let mut opacities = Vec::new();
    let mut rows = vec![rain.columns().rows().to_vec()];
    let mut steps = 0;
    loop {
        opacities.push(rain.clock().opacity());
        let outcome = rain.step(&mut rng, &mut sink);
        steps += 1;
        rows.push(rain.columns().rows().to_vec());
        if outcome == FrameOutcome::Finished {
            break;
        }
        assert!(steps < 10_000, "rain loop never finished");
    }
    (opacities, rows, steps)
}

#[test]
fn viewport_1600x900_has_100_columns_at_row_one() {
    let rain = RainLoop::new(RainConfig::default(), 1600.0, 900.0);
    assert_eq!(rain.columns().len(), 100);
    assert!(rain.columns().rows().iter().all(|&r| r == 1));
    assert_eq!(rain.clock().frame(), 0);
}

#[test]
fn column_count_is_floor_of_width_over_glyph_size() {
    for (width, expected) in [(1599.0, 99), (1600.0, 100), (1615.9, 100), (8.0, 0)] {
        let rain = RainLoop::new(RainConfig::default(), width, 900.0);
        assert_eq!(rain.columns().len(), expected, "width {}", width);
    }
}

#[test]
fn full_run_lasts_exactly_the_frame_budget() {
    let mut rain = RainLoop::new(RainConfig::default(), 1600.0, 900.0);
    let (_, _, steps) = run_to_end(&mut rain, 42);
    assert_eq!(steps, 300);
    assert_eq!(rain.clock().frame(), 300);
    assert!(rain.clock().is_finished());
    assert_eq!(rain.config().teardown_ms, 500);
}

#[test]
fn opacity_holds_then_ramps_down() {
    let mut rain = RainLoop::new(RainConfig::default(), 320.0, 240.0);
    let (opacities, _, _) = run_to_end(&mut rain, 9);
    for (f, &o) in opacities.iter().enumerate().take(240) {
        assert_eq!(o, 1.0, "frame {} should be fully opaque", f);
    }
    for f in 240..300 {
        let expected = (300 - f) as f64 / 60.0;
        assert!(
            (opacities[f] - expected).abs() < 1e-12,
            "frame {}: {} != {}",
            f,
            opacities[f],
            expected
        );
    }
    for f in 241..300 {
        assert!(opacities[f] < opacities[f - 1], "not decreasing at {}", f);
    }
}

#[test]
fn rows_only_reset_past_the_bottom_edge() {
    let height = 900.0;
    let mut rain = RainLoop::new(RainConfig::default(), 1600.0, height);
    let (_, rows, _) = run_to_end(&mut rain, 2024);
    let mut resets = 0;
    for pair in rows.windows(2) {
        for (&before, &after) in pair[0].iter().zip(&pair[1]) {
            if after == 0 {
                assert!(
                    before as f64 * 16.0 > height,
                    "reset from row {} which is still on screen",
                    before
                );
                resets += 1;
            } else {
                assert_eq!(after, before + 1);
            }
        }
    }
    // 300 frames on a 900px surface leave ~240 frames below the edge per column.
    assert!(resets > 0, "expected some staggered restarts");
}

#[test]
fn same_seed_same_rain() {
    let mut a = RainLoop::new(RainConfig::default(), 640.0, 480.0);
    let mut b = RainLoop::new(RainConfig::default(), 640.0, 480.0);
    let (_, rows_a, _) = run_to_end(&mut a, 7);
    let (_, rows_b, _) = run_to_end(&mut b, 7);
    assert_eq!(rows_a, rows_b);
}

#[test]
fn every_frame_draws_one_glyph_per_column() {
    let mut rain = RainLoop::new(RainConfig::default(), 160.0, 160.0);
    let mut rng = StdRng::seed_from_u64(5);
    let mut sink = Tally::default();
    while rain.step(&mut rng, &mut sink) == FrameOutcome::Continue {}
    assert_eq!(sink.frames, 300);
    assert_eq!(sink.glyphs, 300 * 10);
    assert_eq!(sink.colors.first().map(String::as_str), Some("rgba(99, 102, 241, 1)"));
    assert_eq!(
        sink.colors.last().map(String::as_str),
        Some(format!("rgba(99, 102, 241, {})", 1.0 / 60.0).as_str())
    );
}

#[test]
fn only_one_overlay_at_a_time() {
    let slot = RainSlot::default();
    let first = slot.try_acquire();
    assert!(first.is_some());
    assert!(slot.try_acquire().is_none(), "second trigger must be ignored");
    drop(first);
    assert!(!slot.is_active(), "teardown frees the slot");
    assert!(slot.try_acquire().is_some());
}
