//! One-shot reveal of content blocks as they scroll into view.
//!
//! Every block starts `Unseen` and shows a placeholder. The registry checks
//! each observed block against the viewport (grown by the root margin) and
//! latches it to `Seen` the first time enough of it is visible, after which
//! the block is no longer observed.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use once_cell::sync::Lazy;
use ratatui::layout::Rect;
use regex::Regex;

use crate::error::FolioError;
use crate::regions::RegionId;

static LENGTH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d+(?:\.\d+)?)(px|%)?$").expect("length regex"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginLength {
    Px(i32),
    Percent(f32),
}

impl MarginLength {
    fn resolve(self, basis: u16) -> i64 {
        match self {
            MarginLength::Px(px) => px as i64,
            MarginLength::Percent(p) => (basis as f64 * p as f64 / 100.0).round() as i64,
        }
    }
}

/// Margin around the viewport, CSS order: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl Default for RootMargin {
    fn default() -> Self {
        let px = MarginLength::Px(100);
        Self { top: px, right: px, bottom: px, left: px }
    }
}

impl FromStr for RootMargin {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FolioError::InvalidMargin(s.to_string());
        let mut lengths = Vec::with_capacity(4);
        for token in s.split_whitespace() {
            let caps = LENGTH_REGEX.captures(token).ok_or_else(invalid)?;
            let value: f32 = caps[1].parse().map_err(|_| invalid())?;
            let length = match caps.get(2).map(|m| m.as_str()) {
                Some("%") => MarginLength::Percent(value),
                Some(_) => MarginLength::Px(value.round() as i32),
                // a bare number is only valid as zero
                None if value == 0.0 => MarginLength::Px(0),
                None => return Err(invalid()),
            };
            lengths.push(length);
        }
        let (top, right, bottom, left) = match lengths.as_slice() {
            [a] => (*a, *a, *a, *a),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(invalid()),
        };
        Ok(Self { top, right, bottom, left })
    }
}

/// Minimum visible fraction of a block that counts as seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold(f32);

impl Threshold {
    pub fn new(value: f32) -> Result<Self, FolioError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FolioError::InvalidThreshold(value))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityLatch {
    Unseen,
    Seen,
}

impl VisibilityLatch {
    /// Starts `Seen` when there is nothing to observe with, so content is never stuck hidden.
    pub fn new(observer_available: bool) -> Self {
        if observer_available { Self::Unseen } else { Self::Seen }
    }

    pub fn trigger(&mut self) {
        *self = Self::Seen;
    }

    pub fn is_seen(self) -> bool {
        self == Self::Seen
    }
}

/// A revealable block: the n-th card of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId {
    pub region: RegionId,
    pub index: usize,
}

impl BlockId {
    pub fn new(region: RegionId, index: usize) -> Self {
        Self { region, index }
    }
}

/// Fraction of `block` inside `viewport` grown by `margin`, or `None` when
/// the two do not intersect at all.
pub fn visible_fraction(block: Rect, viewport: Rect, margin: &RootMargin) -> Option<f32> {
    let top = viewport.y as i64 - margin.top.resolve(viewport.height);
    let bottom = viewport.bottom() as i64 + margin.bottom.resolve(viewport.height);
    let left = viewport.x as i64 - margin.left.resolve(viewport.width);
    let right = viewport.right() as i64 + margin.right.resolve(viewport.width);

    let (b_top, b_bottom) = (block.y as i64, block.bottom() as i64);
    let (b_left, b_right) = (block.x as i64, block.right() as i64);

    let area = block.width as i64 * block.height as i64;
    if area == 0 {
        let inside = (top..=bottom).contains(&b_top) && (left..=right).contains(&b_left);
        return inside.then_some(1.0);
    }
    let h = b_bottom.min(bottom) - b_top.max(top);
    let w = b_right.min(right) - b_left.max(left);
    if h <= 0 || w <= 0 {
        return None;
    }
    Some((h * w) as f32 / area as f32)
}

#[derive(Debug)]
pub struct RevealRegistry {
    latches: HashMap<BlockId, VisibilityLatch>,
    observing: HashSet<BlockId>,
    margin: RootMargin,
    threshold: Threshold,
    available: bool,
}

impl RevealRegistry {
    pub fn new(margin: RootMargin, threshold: Threshold, available: bool) -> Self {
        Self {
            latches: HashMap::new(),
            observing: HashSet::new(),
            margin,
            threshold,
            available,
        }
    }

    /// Starts observing `id`. Registering an already known block keeps its latch.
    pub fn register(&mut self, id: BlockId) {
        if self.latches.contains_key(&id) {
            return;
        }
        let latch = VisibilityLatch::new(self.available);
        if !latch.is_seen() {
            self.observing.insert(id);
        }
        self.latches.insert(id, latch);
    }

    pub fn unregister(&mut self, id: BlockId) {
        self.observing.remove(&id);
        self.latches.remove(&id);
    }

    /// Tears down every observation; latches keep their state.
    pub fn disconnect(&mut self) {
        self.observing.clear();
    }

    /// Checks observed blocks against `viewport` and returns how many were revealed.
    pub fn observe(&mut self, viewport: Rect, rects: &HashMap<BlockId, Rect>) -> usize {
        let mut revealed = Vec::new();
        for id in &self.observing {
            let Some(rect) = rects.get(id) else { continue };
            let fraction = visible_fraction(*rect, viewport, &self.margin);
            if fraction.is_some_and(|f| f >= self.threshold.value()) {
                revealed.push(*id);
            }
        }
        for id in &revealed {
            self.observing.remove(id);
            if let Some(latch) = self.latches.get_mut(id) {
                latch.trigger();
            }
            tracing::trace!(region = id.region.as_str(), index = id.index, "block revealed");
        }
        revealed.len()
    }

    /// Blocks that were never registered are treated as visible.
    pub fn is_visible(&self, id: BlockId) -> bool {
        self.latches.get(&id).is_none_or(|latch| latch.is_seen())
    }

    pub fn ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.latches.keys().copied()
    }

    pub fn observed_count(&self) -> usize {
        self.observing.len()
    }
}
