//! Timed crossfade between two resolved palettes.
//!
//! A two-state machine: idle, or fading from a source palette to a target
//! palette over a fixed wall-clock duration. Progress is shaped by the cubic
//! ease-in-out curve before blending.

use crate::color::ease_in_out_cubic;
use crate::palette::ResolvedPalette;

#[derive(Debug, Clone, Copy)]
struct ActiveFade {
    start_ms: f64,
    from: ResolvedPalette,
    to: ResolvedPalette,
}

/// Crossfade controller.
#[derive(Debug, Clone)]
pub struct Crossfade {
    duration_ms: f64,
    active: Option<ActiveFade>,
}

impl Crossfade {
    pub fn new(duration_ms: f64) -> Self {
        Self { duration_ms, active: None }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start fading. A request while a fade is already running is ignored;
    /// the running fade keeps its source and target.
    pub fn begin(&mut self, now_ms: f64, from: ResolvedPalette, to: ResolvedPalette) {
        if self.active.is_some() {
            return;
        }
        self.active = Some(ActiveFade { start_ms: now_ms, from, to });
    }

    /// Drop any running fade without completing it.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Linear progress of the running fade in `[0, 1]`, or `None` while idle.
    /// A non-positive duration reports instant completion.
    pub fn progress(&self, now_ms: f64) -> Option<f64> {
        self.active.map(|fade| self.linear_progress(&fade, now_ms))
    }

    fn linear_progress(&self, fade: &ActiveFade, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - fade.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// The palette applicable at `now_ms`.
    ///
    /// While fading this is the eased blend of source and target; the state
    /// flips back to idle on the first call where the elapsed time reaches
    /// the duration. While idle it is simply `idle`.
    pub fn palette_at(&mut self, now_ms: f64, idle: ResolvedPalette) -> ResolvedPalette {
        let Some(fade) = self.active else {
            return idle;
        };
        let linear = self.linear_progress(&fade, now_ms);
        let current = fade.from.blend(&fade.to, ease_in_out_cubic(linear));
        if linear >= 1.0 {
            self.active = None;
        }
        current
    }
}
