use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::timing::Throttle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPosition {
    pub x: u16,
    pub y: u16,
}

/// Latest pointer position, sampled at a bounded rate. Only the decorative
/// background reads it.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    gate: Throttle,
    position: Option<PointerPosition>,
}

impl PointerTracker {
    pub fn new(interval: Duration) -> Self {
        Self { gate: Throttle::new(interval), position: None }
    }

    /// Returns true if the sample was taken.
    pub fn on_move(&mut self, now: Instant, x: u16, y: u16) -> bool {
        self.gate
            .run(now, || self.position = Some(PointerPosition { x, y }))
            .is_some()
    }

    pub fn position(&self) -> Option<PointerPosition> {
        self.position
    }

    /// Offset of a decorative layer towards the pointer, relative to the
    /// centre of `area`. Deeper layers (`depth` closer to 0) move less.
    /// Zero until the pointer has moved at least once.
    pub fn parallax(&self, area: Rect, depth: f32) -> (i16, i16) {
        let Some(pos) = self.position else {
            return (0, 0);
        };
        let cx = area.x as f32 + area.width as f32 / 2.0;
        let cy = area.y as f32 + area.height as f32 / 2.0;
        let dx = (pos.x as f32 - cx) * depth;
        let dy = (pos.y as f32 - cy) * depth;
        (dx.round() as i16, dy.round() as i16)
    }
}
