use std::time::Instant;

use log::{debug, warn};

use crate::assets::{AssetGate, AssetLoader, AssetStatus};
use crate::buffer::Buffer;
use crate::event::Event;
use crate::layout::{Rect, Track};
use crate::logo::{Logo, LogoArt};
use crate::motion::Motion;
use crate::types::Style;

/// Construction-time configuration. Immutable for the component's
/// lifetime; there is no dynamic reconfiguration API.
#[derive(Debug, Clone)]
pub struct MarqueeOptions {
    pub(crate) logos: Vec<Logo>,
    pub(crate) speed: f32,
    pub(crate) gap: u16,
    pub(crate) item_height: u16,
    pub(crate) pause_on_hover: bool,
    pub(crate) reduced_motion: bool,
    pub(crate) style: Style,
}

impl Default for MarqueeOptions {
    fn default() -> Self {
        Self {
            logos: Vec::new(),
            speed: 12.0,
            gap: 4,
            item_height: 2,
            pause_on_hover: true,
            reduced_motion: false,
            style: Style::default(),
        }
    }
}

impl MarqueeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered item sequence, rendered once per replica.
    pub fn logos(mut self, logos: impl IntoIterator<Item = Logo>) -> Self {
        self.logos = logos.into_iter().collect();
        self
    }

    pub fn logo(mut self, logo: Logo) -> Self {
        self.logos.push(logo);
        self
    }

    /// Cruise velocity in cells/second; sign is direction (positive
    /// scrolls leftward).
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Inter-item spacing in cells.
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Rendered height of each item, in rows.
    pub fn item_height(mut self, rows: u16) -> Self {
        self.item_height = rows.max(1);
        self
    }

    /// Whether hovering the strip ramps velocity toward zero.
    pub fn pause_on_hover(mut self, pause: bool) -> Self {
        self.pause_on_hover = pause;
        self
    }

    /// Accessibility switch: lay out and render, but never animate.
    pub fn reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn build(self) -> Marquee {
        Marquee::new(self)
    }
}

/// Lifecycle phase. `Disposed` is terminal; every operation after it is a
/// no-op. `Running` has no sub-states: pausing is continuous velocity
/// modulation, not a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingAssets,
    Running,
    Disposed,
}

/// The logo marquee: a seamlessly wrapping, width-adaptive scrolling strip.
///
/// Host integration is four calls per frame: [`handle_events`] with the
/// frame's input, [`layout`] with the strip area, [`tick`] with the
/// current timestamp, [`render`] into the frame buffer. [`dispose`]
/// releases everything and is safe to call repeatedly from any state.
///
/// [`handle_events`]: Marquee::handle_events
/// [`layout`]: Marquee::layout
/// [`tick`]: Marquee::tick
/// [`render`]: Marquee::render
/// [`dispose`]: Marquee::dispose
#[derive(Debug)]
pub struct Marquee {
    options: MarqueeOptions,
    statuses: Vec<AssetStatus>,
    gate: AssetGate,
    loader: Option<AssetLoader>,
    track: Track,
    motion: Motion,
    area: Rect,
    phase: Phase,
}

impl Marquee {
    pub fn new(options: MarqueeOptions) -> Self {
        let statuses: Vec<AssetStatus> = options
            .logos
            .iter()
            .map(|logo| {
                if logo.has_image() {
                    AssetStatus::Pending
                } else {
                    AssetStatus::None
                }
            })
            .collect();

        let pending = statuses
            .iter()
            .filter(|s| matches!(s, AssetStatus::Pending))
            .count();

        let loader =
            (pending > 0).then(|| AssetLoader::spawn(&options.logos, options.item_height));

        // Nothing to wait for means motion starts immediately.
        let phase = if pending == 0 {
            Phase::Running
        } else {
            Phase::AwaitingAssets
        };
        debug!(
            "marquee created: {} logos, {} assets pending, phase {:?}",
            options.logos.len(),
            pending,
            phase
        );

        let mut marquee = Self {
            options,
            statuses,
            gate: AssetGate::new(pending),
            loader,
            track: Track::new(),
            motion: Motion::new(),
            area: Rect::default(),
            phase,
        };
        // Build the minimum replica set right away; the container width
        // arrives with the first layout call.
        marquee.reconcile();
        marquee
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    pub fn replica_count(&self) -> usize {
        self.track.replica_count()
    }

    pub fn sequence_width(&self) -> u16 {
        self.track.sequence_width()
    }

    pub fn offset(&self) -> f32 {
        self.motion.offset()
    }

    pub fn velocity(&self) -> f32 {
        self.motion.velocity()
    }

    pub fn hovered(&self) -> bool {
        self.motion.hovered()
    }

    /// Strip height the host should reserve, in rows.
    pub fn preferred_height(&self) -> u16 {
        self.options.item_height
    }

    pub(crate) fn options(&self) -> &MarqueeOptions {
        &self.options
    }

    pub(crate) fn logos(&self) -> &[Logo] {
        &self.options.logos
    }

    pub(crate) fn statuses(&self) -> &[AssetStatus] {
        &self.statuses
    }

    pub(crate) fn track(&self) -> &Track {
        &self.track
    }

    pub(crate) fn area(&self) -> Rect {
        self.area
    }

    /// Consume one frame's worth of input events.
    ///
    /// Pointer moves maintain the hover flag; a terminal resize
    /// reconciles against the new width right away rather than waiting
    /// for the host's next layout call.
    pub fn handle_events(&mut self, events: &[Event]) {
        if self.is_disposed() {
            return;
        }
        for event in events {
            match *event {
                Event::MouseMove { x, y } => {
                    self.motion.set_hovered(self.area.contains(x, y));
                }
                Event::Resize { width, .. } => {
                    self.area.width = width.saturating_sub(self.area.x);
                    self.reconcile();
                }
                Event::Key { .. } => {}
            }
        }
    }

    /// Adopt the strip area for this frame and reconcile replicas to it.
    pub fn layout(&mut self, area: Rect) {
        if self.is_disposed() {
            return;
        }
        self.area = area;
        self.reconcile();
    }

    /// Advance the component by one frame.
    ///
    /// Order matters: asset results are drained first, geometry is
    /// reconciled to any newly known intrinsic sizes, the gate may open,
    /// and only then does the integrator read the (now latest) sequence
    /// width.
    pub fn tick(&mut self, now: Instant) {
        if self.is_disposed() {
            return;
        }

        let settled = self
            .loader
            .as_ref()
            .map(|loader| loader.poll())
            .unwrap_or_default();
        if !settled.is_empty() {
            for (index, result) in settled {
                self.apply_asset(index, result);
            }
            self.reconcile();
        }

        if self.phase == Phase::AwaitingAssets && self.gate.is_complete() {
            // Intrinsic sizes may have just become known: re-measure
            // before the first moving frame.
            self.reconcile();
            self.phase = Phase::Running;
            self.motion.reset_baseline();
            debug!("all assets settled, marquee running");
        }

        if self.phase == Phase::Running {
            let suppressed = self.options.reduced_motion
                || (self.options.pause_on_hover && self.motion.hovered());
            let target = if suppressed { 0.0 } else { self.options.speed };
            self.motion
                .tick(now, target, f32::from(self.track.sequence_width()));
        }
    }

    /// Draw the strip into `buf` at the last laid-out area.
    pub fn render(&self, buf: &mut Buffer) {
        if self.is_disposed() {
            return;
        }
        crate::render::draw(self, buf);
    }

    /// Release every resource: the loader channel (its worker exits at the
    /// next send), all decoded art, and the replica list. Idempotent and
    /// safe from any state.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.loader = None;
        self.statuses.clear();
        self.track.clear();
        self.phase = Phase::Disposed;
        debug!("marquee disposed");
    }

    fn apply_asset(&mut self, index: usize, result: Result<LogoArt, crate::assets::AssetError>) {
        match result {
            Ok(art) => {
                if let Some(status) = self.statuses.get_mut(index) {
                    *status = AssetStatus::Ready(art);
                }
            }
            Err(err) => {
                warn!("logo asset {index} failed, keeping label fallback: {err}");
                if let Some(status) = self.statuses.get_mut(index) {
                    *status = AssetStatus::Failed;
                }
            }
        }
        self.gate.settle();
    }

    fn reconcile(&mut self) {
        let before = self.track.replica_count();
        let changed = self.track.reconcile(
            &self.options.logos,
            &self.statuses,
            self.options.gap,
            self.area.width,
        );
        if changed {
            debug!(
                "track reconciled: {} -> {} replicas, sequence width {}",
                before,
                self.track.replica_count(),
                self.track.sequence_width()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetError;
    use crate::types::Rgb;

    fn art(width: u16, height: u16) -> LogoArt {
        let pixels =
            vec![(Some(Rgb::new(200, 10, 10)), None); width as usize * height as usize];
        LogoArt::new(width, height, pixels)
    }

    fn io_error() -> AssetError {
        AssetError::Io {
            path: "missing.png".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
    }

    fn three_image_marquee() -> Marquee {
        // Sources are never touched: tests feed results through
        // apply_asset instead of the loader channel.
        let mut marquee = MarqueeOptions::new()
            .logos([
                Logo::image("a.png", "Alpha"),
                Logo::image("b.png", "Beta"),
                Logo::image("c.png", "Gamma"),
            ])
            .build();
        marquee.loader = None;
        marquee
    }

    #[test]
    fn gating_requires_all_signals_in_any_order() {
        let mut marquee = three_image_marquee();
        marquee.layout(Rect::from_size(80, 2));
        assert_eq!(marquee.phase(), Phase::AwaitingAssets);

        let now = Instant::now();
        marquee.apply_asset(2, Ok(art(10, 2)));
        marquee.tick(now);
        assert_eq!(marquee.phase(), Phase::AwaitingAssets);

        marquee.apply_asset(0, Ok(art(10, 2)));
        marquee.tick(now);
        assert_eq!(marquee.phase(), Phase::AwaitingAssets);

        marquee.apply_asset(1, Ok(art(10, 2)));
        marquee.tick(now);
        assert_eq!(marquee.phase(), Phase::Running);
    }

    #[test]
    fn one_failure_among_three_still_starts() {
        let mut marquee = three_image_marquee();
        marquee.layout(Rect::from_size(80, 2));

        marquee.apply_asset(0, Ok(art(10, 2)));
        marquee.apply_asset(1, Err(io_error()));
        marquee.apply_asset(2, Ok(art(10, 2)));
        marquee.tick(Instant::now());

        assert_eq!(marquee.phase(), Phase::Running);
        // The failed logo keeps its label width in the measurement.
        assert_eq!(marquee.sequence_width(), (10 + 4) + (4 + 4) + (10 + 4));
    }

    #[test]
    fn no_images_starts_immediately() {
        let marquee = MarqueeOptions::new()
            .logos([Logo::text("Alpha"), Logo::text("Beta")])
            .build();
        assert_eq!(marquee.phase(), Phase::Running);
    }

    #[test]
    fn dispose_is_idempotent_and_terminal() {
        let mut marquee = three_image_marquee();
        marquee.layout(Rect::from_size(80, 2));

        marquee.dispose();
        marquee.dispose();
        assert_eq!(marquee.phase(), Phase::Disposed);
        assert_eq!(marquee.replica_count(), 0);
        assert!(marquee.loader.is_none());

        // Everything after disposal is a no-op.
        marquee.layout(Rect::from_size(120, 2));
        marquee.tick(Instant::now());
        marquee.handle_events(&[Event::MouseMove { x: 1, y: 1 }]);
        assert_eq!(marquee.replica_count(), 0);
        assert!(!marquee.hovered());
    }

    #[test]
    fn hover_tracks_the_strip_area() {
        let mut marquee = MarqueeOptions::new()
            .logos([Logo::text("Alpha")])
            .build();
        marquee.layout(Rect::new(0, 10, 80, 2));

        marquee.handle_events(&[Event::MouseMove { x: 5, y: 11 }]);
        assert!(marquee.hovered());

        marquee.handle_events(&[Event::MouseMove { x: 5, y: 20 }]);
        assert!(!marquee.hovered());
    }

    #[test]
    fn resize_event_reconciles_immediately() {
        let mut marquee = MarqueeOptions::new()
            .logos([Logo::text("abcdefghij")]) // width 10 + gap 4 = 14
            .build();
        marquee.layout(Rect::from_size(14, 2));
        assert_eq!(marquee.replica_count(), 3); // ceil(14/14) + 2

        marquee.handle_events(&[Event::Resize {
            width: 140,
            height: 40,
        }]);
        assert_eq!(marquee.replica_count(), 12); // ceil(140/14) + 2
    }
}
