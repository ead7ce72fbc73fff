//! The render loop: animation state, viewport handling, and layered passes.
//!
//! A [`Starfield`] owns the full animation state explicitly (no globals) and
//! is driven from outside: the host calls [`Starfield::tick`] once per frame
//! with the current monotonic time, [`Starfield::on_viewport_change`] on
//! resize, and [`Starfield::on_theme_toggle`] when the theme switches.
//! Everything funnels through `&mut self`, so callbacks serialize by
//! construction.

use crate::config::StarfieldConfig;
use crate::geometry::{self, Star};
use crate::palette::{ResolvedPalette, Theme};
use crate::rng::{Rng, DEFAULT_SEED};
use crate::surface::Surface;
use crate::transition::Crossfade;

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A full frame was drawn.
    Rendered,
    /// The viewport has no area; nothing was drawn and no state advanced.
    /// The next tick retries.
    SkippedViewport,
    /// The loop has been stopped; ticks are no-ops.
    Stopped,
}

/// The starfield animation engine.
pub struct Starfield {
    config: StarfieldConfig,
    light: ResolvedPalette,
    dark: ResolvedPalette,
    rng: Rng,
    theme: Theme,
    crossfade: Crossfade,
    width: f64,
    height: f64,
    pivot: (f64, f64),
    stars: Vec<Star>,
    total_angle: f64,
    running: bool,
}

impl Starfield {
    /// Build an engine from a configuration and an initial theme.
    ///
    /// Palette colors are parsed once here; malformed colors degrade to
    /// black. The engine starts with an empty viewport - call
    /// [`Starfield::on_viewport_change`] before the first tick.
    pub fn new(config: StarfieldConfig, theme: Theme) -> Self {
        let light = config.palettes.light.resolve();
        let dark = config.palettes.dark.resolve();
        let rng = Rng::new(config.seed.unwrap_or(DEFAULT_SEED));
        let crossfade = Crossfade::new(config.transition_duration_ms);
        Self {
            config,
            light,
            dark,
            rng,
            theme,
            crossfade,
            width: 0.0,
            height: 0.0,
            pivot: (0.0, 0.0),
            stars: Vec::new(),
            total_angle: 0.0,
            running: true,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn total_angle(&self) -> f64 {
        self.total_angle
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_transitioning(&self) -> bool {
        self.crossfade.is_active()
    }

    fn palette_of(&self, theme: Theme) -> ResolvedPalette {
        match theme {
            Theme::Light => self.light,
            Theme::Dark => self.dark,
        }
    }

    /// Adopt a new viewport size: recompute the pivot and regenerate every
    /// star. Destroys the old field rather than mutating it.
    ///
    /// Any running crossfade is cancelled; regeneration invalidates the
    /// visual continuity the fade was preserving.
    pub fn on_viewport_change(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.crossfade.cancel();
        if width <= 0.0 || height <= 0.0 {
            self.stars.clear();
            return;
        }
        self.pivot = geometry::pivot_point(width, height, &self.config);
        self.stars = geometry::generate(width, height, &self.config, &mut self.rng);
    }

    /// Request a switch to `theme`, crossfading the canvas palette.
    ///
    /// Requests are ignored while a crossfade is already running, and when
    /// `theme` is already active.
    pub fn on_theme_toggle(&mut self, theme: Theme, now_ms: f64) {
        if theme == self.theme || self.crossfade.is_active() {
            return;
        }
        let from = self.palette_of(self.theme);
        let to = self.palette_of(theme);
        self.theme = theme;
        self.crossfade.begin(now_ms, from, to);
    }

    /// Stop the loop. Idempotent: repeated calls and ticks after stopping
    /// are no-ops.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Render one frame at `now_ms` (monotonic milliseconds).
    ///
    /// Draw order is fixed: background fill, then glow under every trail,
    /// then normal trails, then accent trails on top. The global angle
    /// advances by a fixed step per tick, so visual speed tracks the host's
    /// callback frequency rather than wall time.
    pub fn tick(&mut self, surface: &mut dyn Surface, now_ms: f64) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Stopped;
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return FrameOutcome::SkippedViewport;
        }

        let idle = self.palette_of(self.theme);
        let palette = self.crossfade.palette_at(now_ms, idle);

        surface.fill_rect(0.0, 0.0, self.width, self.height, palette.background);

        self.total_angle += self.config.rotation_speed;
        let (px, py) = self.pivot;

        // Pass 1: glows beneath everything
        if self.config.glow_enabled {
            for star in self.stars.iter().filter(|s| s.is_special) {
                let head = star.angle_offset + self.total_angle;
                let head_x = px + star.radius * head.cos();
                let head_y = py + star.radius * head.sin();
                surface.fill_glow(
                    head_x,
                    head_y,
                    star.thickness * self.config.glow_radius_multiplier,
                    palette.special,
                    self.config.glow_opacity,
                );
            }
        }

        // Pass 2: normal trails
        for star in self.stars.iter().filter(|s| !s.is_special) {
            let head = star.angle_offset + self.total_angle;
            surface.stroke_arc(
                px,
                py,
                star.radius,
                head - star.trail_arc,
                head,
                star.thickness,
                palette.normal,
            );
        }

        // Pass 3: accent trails, never occluded by normal ones
        for star in self.stars.iter().filter(|s| s.is_special) {
            let head = star.angle_offset + self.total_angle;
            surface.stroke_arc(
                px,
                py,
                star.radius,
                head - star.trail_arc,
                head,
                star.thickness,
                palette.special,
            );
        }

        FrameOutcome::Rendered
    }
}
