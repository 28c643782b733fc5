//! Matrix-rain overlay.
//!
//! [`RainLoop`] owns the per-column rows and the frame clock. It knows nothing
//! about the browser: glyphs go to a [`GlyphSink`] and randomness comes from any
//! `rand::Rng`, so a seeded run is fully deterministic. The `canvas` submodule
//! drives it from `requestAnimationFrame` and owns the overlay element.

use std::cell::Cell;
use std::rc::Rc;

use rand::Rng;

use crate::config::RainConfig;

pub mod canvas;

pub use canvas::MatrixRain;

/// Drawing seam for one rain frame.
pub trait GlyphSink {
    /// Paint the translucent rectangle that fades previous frames.
    fn fill_trail(&mut self, color: &str, width: f64, height: f64);
    fn set_glyph_style(&mut self, color: &str, font: &str);
    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Another frame should be scheduled.
    Continue,
    /// The frame budget is spent; start teardown.
    Finished,
}

/// Global opacity for the frame drawn at `frame`.
///
/// 1.0 until the last `fade_frames` of the run, then `(max - frame) / fade`.
pub fn opacity_at(frame: u32, max_frames: u32, fade_frames: u32) -> f64 {
    let fade_start = max_frames.saturating_sub(fade_frames);
    if fade_frames == 0 || frame < fade_start {
        return 1.0;
    }
    (max_frames.saturating_sub(frame) as f64 / fade_frames as f64).clamp(0.0, 1.0)
}

/// Frame counter plus the opacity multiplier derived from it.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    frame: u32,
    max_frames: u32,
    fade_frames: u32,
    opacity: f64,
}

impl AnimationClock {
    pub fn new(max_frames: u32, fade_frames: u32) -> Self {
        Self {
            frame: 0,
            max_frames,
            fade_frames,
            opacity: opacity_at(0, max_frames, fade_frames),
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.max_frames
    }

    fn advance(&mut self) {
        self.frame += 1;
        self.opacity = opacity_at(self.frame, self.max_frames, self.fade_frames);
    }
}

/// Row position of every column, left to right.
#[derive(Clone, Debug)]
pub struct RainColumns {
    rows: Vec<u32>,
}

impl RainColumns {
    /// `floor(width / glyph_size)` columns, all starting at row 1.
    pub fn new(width: f64, glyph_size: f64) -> Self {
        let count = if glyph_size > 0.0 && width > 0.0 {
            (width / glyph_size).floor() as usize
        } else {
            0
        };
        Self {
            rows: vec![1; count],
        }
    }

    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One activation of the effect: columns, clock and surface geometry.
pub struct RainLoop {
    config: RainConfig,
    width: f64,
    height: f64,
    glyphs: Vec<char>,
    columns: RainColumns,
    clock: AnimationClock,
}

impl RainLoop {
    pub fn new(config: RainConfig, width: f64, height: f64) -> Self {
        let glyphs = config.glyphs.chars().collect();
        let columns = RainColumns::new(width, config.glyph_size);
        let clock = AnimationClock::new(config.max_frames, config.fade_frames);
        Self {
            config,
            width,
            height,
            glyphs,
            columns,
            clock,
        }
    }

    pub fn columns(&self) -> &RainColumns {
        &self.columns
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    /// Draw one frame and advance every column and the clock.
    ///
    /// Once the clock is terminal this draws nothing and keeps returning
    /// `Finished`.
    pub fn step<R, S>(&mut self, rng: &mut R, sink: &mut S) -> FrameOutcome
    where
        R: Rng,
        S: GlyphSink + ?Sized,
    {
        if self.clock.is_finished() {
            return FrameOutcome::Finished;
        }

        sink.fill_trail(&self.config.trail_color, self.width, self.height);
        sink.set_glyph_style(
            &self.config.accent_rgba(self.clock.opacity()),
            &self.config.font(),
        );

        let size = self.config.glyph_size;
        for (i, row) in self.columns.rows.iter_mut().enumerate() {
            if !self.glyphs.is_empty() {
                let glyph = self.glyphs[rng.random_range(0..self.glyphs.len())];
                sink.draw_glyph(glyph, i as f64 * size, *row as f64 * size);
            }
            let below_edge = *row as f64 * size > self.height;
            if below_edge && rng.random::<f64>() < self.config.reset_probability {
                *row = 0;
            } else {
                *row += 1;
            }
        }

        self.clock.advance();
        if self.clock.is_finished() {
            FrameOutcome::Finished
        } else {
            FrameOutcome::Continue
        }
    }
}

/// Single-instance guard for the overlay.
///
/// `try_acquire` hands out at most one [`RainSlotGuard`] at a time; dropping
/// the guard frees the slot.
#[derive(Clone, Debug, Default)]
pub struct RainSlot {
    active: Rc<Cell<bool>>,
}

impl RainSlot {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn try_acquire(&self) -> Option<RainSlotGuard> {
        if self.active.replace(true) {
            return None;
        }
        Some(RainSlotGuard {
            active: self.active.clone(),
        })
    }
}

#[derive(Debug)]
pub struct RainSlotGuard {
    active: Rc<Cell<bool>>,
}

impl Drop for RainSlotGuard {
    fn drop(&mut self) {
        self.active.set(false);
    }
}
