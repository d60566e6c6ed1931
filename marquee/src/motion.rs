use std::time::Instant;

/// Time constant of the exponential velocity smoothing, in seconds.
/// Velocity closes ~63% of the gap to its target per `SMOOTH_TAU`.
pub const SMOOTH_TAU: f32 = 0.25;

/// Scroll state advanced once per frame.
///
/// `offset` is the horizontal translation of the track and always stays in
/// `[0, sequence_width)`, which is what makes the loop seamless. Velocity
/// never jumps: target changes (hover enter/exit) are reached along an
/// exponential decay, so pausing feels physical rather than snapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Motion {
    offset: f32,
    velocity: f32,
    hovered: bool,
    last_frame: Option<Instant>,
}

impl Motion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current track translation in cells, in `[0, sequence_width)`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Current smoothed velocity in cells/second.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Advance one frame from a wall-clock timestamp.
    ///
    /// The first call only establishes the baseline and performs no
    /// motion. Configuration is read live: `target` already reflects
    /// hover/reduced-motion suppression, `sequence_width` is the latest
    /// measurement.
    pub fn tick(&mut self, now: Instant, target: f32, sequence_width: f32) {
        let Some(prev) = self.last_frame.replace(now) else {
            return;
        };
        let dt = now.saturating_duration_since(prev).as_secs_f32();
        self.advance(dt, target, sequence_width);
    }

    /// One integration step with an explicit `dt` in seconds.
    ///
    /// Smoothing: `alpha = 1 - exp(-dt/tau)`, `velocity += (target -
    /// velocity) * alpha`. The step is exact under partition: splitting an
    /// interval into smaller steps lands on the same velocity.
    ///
    /// Wrap: double modulo keeps `offset` in `[0, w)` even when the
    /// intermediate goes negative (reverse direction). `dt` is clamped at
    /// a floor of 0 but deliberately has no ceiling; a long stall produces
    /// one large, still-wrapped jump.
    pub fn advance(&mut self, dt: f32, target: f32, sequence_width: f32) {
        let dt = dt.max(0.0);

        let alpha = 1.0 - (-dt / SMOOTH_TAU).exp();
        self.velocity += (target - self.velocity) * alpha;

        if sequence_width > 0.0 {
            let next = self.offset + self.velocity * dt;
            self.offset = (next % sequence_width + sequence_width) % sequence_width;
        }
    }

    /// Forget the frame baseline; the next tick re-establishes it.
    ///
    /// Called when motion starts after asset gating so the awaiting time
    /// is not integrated as one giant first step.
    pub fn reset_baseline(&mut self) {
        self.last_frame = None;
    }
}
