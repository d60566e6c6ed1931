use crate::assets::AssetStatus;
use crate::logo::Logo;
use crate::text::display_width;

/// Minimum replicas kept alive regardless of container width.
pub const MIN_COPIES: usize = 2;
/// Extra replicas beyond the minimum needed to fill the container,
/// absorbing measurement and rounding slack.
pub const COPY_HEADROOM: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn left(&self) -> u16 {
        self.x
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn top(&self) -> u16 {
        self.y
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Rendered cell width of one item in its current asset state: decoded
/// art if the asset settled successfully, otherwise the label.
pub fn item_width(logo: &Logo, status: &AssetStatus) -> u16 {
    match status.art() {
        Some(art) => art.width(),
        None => display_width(&logo.label).min(u16::MAX as usize) as u16,
    }
}

/// Measured width of one full pass through the sequence.
///
/// The gap is applied after every item, including the last, so the seam
/// between two replicas is spaced exactly like any intra-replica boundary.
/// Returns 0 for an empty sequence.
pub fn measure_sequence(logos: &[Logo], statuses: &[AssetStatus], gap: u16) -> u16 {
    logos
        .iter()
        .zip(statuses)
        .fold(0u16, |acc, (logo, status)| {
            acc.saturating_add(item_width(logo, status))
                .saturating_add(gap)
        })
}

/// Replica count needed to cover `container_width` at every scroll phase.
///
/// Must not be called with `sequence_width == 0`; zero-width sequences are
/// a transient state the caller defers on.
pub fn target_replicas(
    container_width: u16,
    sequence_width: u16,
    min_copies: usize,
    headroom: usize,
) -> usize {
    debug_assert!(sequence_width > 0);
    let needed = (container_width as usize).div_ceil(sequence_width as usize) + headroom;
    needed.max(min_copies)
}

/// One item's place within a replica, in cells relative to the replica
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub item: usize,
    pub x: u16,
    pub width: u16,
}

/// One rendered copy of the sequence.
///
/// Copies past the first are presentational duplicates: they are flagged
/// `decorative` and are never used as the measurement reference.
#[derive(Debug, Clone)]
pub struct Replica {
    pub slots: Vec<Slot>,
    pub decorative: bool,
}

/// The scrolling track: the replica list plus the measured sequence width.
#[derive(Debug, Default)]
pub struct Track {
    replicas: Vec<Replica>,
    sequence_width: u16,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence_width(&self) -> u16 {
        self.sequence_width
    }

    pub fn replica_count(&self) -> usize {
        self.replicas.len()
    }

    pub fn replicas(&self) -> &[Replica] {
        &self.replicas
    }

    /// Re-measure the reference replica and reconcile the replica count
    /// against `container_width`.
    ///
    /// A zero measurement (empty sequence) takes no action; the caller
    /// retries on the next geometry signal. Returns true if the track
    /// changed.
    pub fn reconcile(
        &mut self,
        logos: &[Logo],
        statuses: &[AssetStatus],
        gap: u16,
        container_width: u16,
    ) -> bool {
        let slots = reference_slots(logos, statuses, gap);
        let width = measure_sequence(logos, statuses, gap);
        if width == 0 {
            return false;
        }

        let mut changed = false;

        if width != self.sequence_width
            || self.replicas.first().is_none_or(|r| r.slots != slots)
        {
            self.sequence_width = width;
            for replica in &mut self.replicas {
                replica.slots = slots.clone();
            }
            changed = true;
        }

        let target = target_replicas(container_width, width, MIN_COPIES, COPY_HEADROOM);
        while self.replicas.len() < target {
            self.replicas.push(Replica {
                slots: slots.clone(),
                // only the first replica is the measurement reference
                decorative: !self.replicas.is_empty(),
            });
            changed = true;
        }
        if self.replicas.len() > target {
            self.replicas.truncate(target);
            changed = true;
        }

        changed
    }

    /// Drop all replicas and forget the measurement.
    pub fn clear(&mut self) {
        self.replicas.clear();
        self.sequence_width = 0;
    }
}

fn reference_slots(logos: &[Logo], statuses: &[AssetStatus], gap: u16) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(logos.len());
    let mut x = 0u16;
    for (item, (logo, status)) in logos.iter().zip(statuses).enumerate() {
        let width = item_width(logo, status);
        slots.push(Slot { item, x, width });
        x = x.saturating_add(width).saturating_add(gap);
    }
    slots
}
