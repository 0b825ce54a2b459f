//! Scroll position of the page, with eased animation for smooth jumps.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Anything that can be asked to scroll to a row.
pub trait ScrollTarget {
    fn scroll_to(&mut self, offset: u16, behavior: ScrollBehavior);
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: u16,
    to: u16,
    started: Instant,
    duration: Duration,
}

impl Animation {
    fn sample(&self, now: Instant) -> (u16, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        // cubic ease-out
        let eased = 1.0 - (1.0 - t).powi(3);
        let from = self.from as f64;
        let value = from + (self.to as f64 - from) * eased;
        (value.round() as u16, false)
    }
}

#[derive(Debug, Clone)]
pub struct PageScroll {
    offset: u16,
    max_offset: u16,
    smooth_duration: Duration,
    animation: Option<Animation>,
    clock: Instant,
}

impl PageScroll {
    pub fn new(smooth_duration: Duration) -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            smooth_duration,
            animation: None,
            clock: Instant::now(),
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn max_offset(&self) -> u16 {
        self.max_offset
    }

    /// Updates the scrollable range from the document and viewport heights.
    pub fn set_bounds(&mut self, content_height: u16, viewport_height: u16) {
        self.max_offset = content_height.saturating_sub(viewport_height);
        self.offset = self.offset.min(self.max_offset);
        if let Some(anim) = self.animation.as_mut() {
            anim.to = anim.to.min(self.max_offset);
        }
    }

    /// Where the page ends up once any animation finishes.
    pub fn destination(&self) -> u16 {
        self.animation.map(|a| a.to).unwrap_or(self.offset)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Immediate relative scroll; cancels any running animation.
    pub fn scroll_by(&mut self, delta: i32) {
        self.animation = None;
        let next = (self.offset as i32 + delta).clamp(0, self.max_offset as i32);
        self.offset = next as u16;
    }

    pub fn scroll_to_at(&mut self, now: Instant, target: u16, behavior: ScrollBehavior) {
        let target = target.min(self.max_offset);
        match behavior {
            ScrollBehavior::Smooth if target != self.offset && !self.smooth_duration.is_zero() => {
                self.animation = Some(Animation {
                    from: self.offset,
                    to: target,
                    started: now,
                    duration: self.smooth_duration,
                });
            }
            _ => {
                self.animation = None;
                self.offset = target;
            }
        }
    }

    /// Advances the animation. Returns true if the offset changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.clock = now;
        let Some(anim) = self.animation else {
            return false;
        };
        let before = self.offset;
        let (value, done) = anim.sample(now);
        self.offset = value.min(self.max_offset);
        if done {
            self.animation = None;
        }
        before != self.offset
    }
}

impl ScrollTarget for PageScroll {
    fn scroll_to(&mut self, offset: u16, behavior: ScrollBehavior) {
        // animations start from the time of the last tick
        let now = self.clock;
        self.scroll_to_at(now, offset, behavior);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(max: u16) -> PageScroll {
        let mut p = PageScroll::new(Duration::from_millis(300));
        p.set_bounds(max + 20, 20);
        p
    }

    #[test]
    fn scroll_by_clamps() {
        let mut p = page(100);
        p.scroll_by(-5);
        assert_eq!(p.offset(), 0);
        p.scroll_by(150);
        assert_eq!(p.offset(), 100);
    }

    #[test]
    fn instant_jump() {
        let mut p = page(100);
        p.scroll_to(40, ScrollBehavior::Instant);
        assert_eq!(p.offset(), 40);
        assert!(!p.is_animating());
    }

    #[test]
    fn smooth_jump_eases_to_target() {
        let t0 = Instant::now();
        let mut p = page(1000);
        p.tick(t0);
        p.scroll_to(720, ScrollBehavior::Smooth);
        assert!(p.is_animating());
        assert_eq!(p.destination(), 720);
        assert_eq!(p.offset(), 0);

        assert!(p.tick(t0 + Duration::from_millis(150)));
        let mid = p.offset();
        // ease-out covers more than half the distance at the halfway point
        assert!(mid > 360 && mid < 720, "mid = {mid}");

        p.tick(t0 + Duration::from_millis(300));
        assert_eq!(p.offset(), 720);
        assert!(!p.is_animating());
    }

    #[test]
    fn manual_scroll_cancels_animation() {
        let t0 = Instant::now();
        let mut p = page(1000);
        p.scroll_to_at(t0, 500, ScrollBehavior::Smooth);
        p.scroll_by(3);
        assert!(!p.is_animating());
        assert_eq!(p.offset(), 3);
    }

    #[test]
    fn shrinking_bounds_clamps_offset() {
        let mut p = page(100);
        p.scroll_to(90, ScrollBehavior::Instant);
        p.set_bounds(50, 20);
        assert_eq!(p.offset(), 30);
    }
}
