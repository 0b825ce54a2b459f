use crate::regions::{RegionId, RegionMap};

/// Keeps track of which region the navigation bar highlights.
///
/// Region tops must increase in document order; the layout pass guarantees it.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    active: RegionId,
    header_offset: u16,
}

impl SectionTracker {
    pub fn new(header_offset: u16) -> Self {
        Self { active: RegionId::first(), header_offset }
    }

    pub fn active(&self) -> RegionId {
        self.active
    }

    /// Picks the last region whose top is at or above `scroll_y + header_offset`.
    /// Regions missing from `regions` are skipped; with no match the first region wins.
    pub fn on_scroll(&mut self, scroll_y: u16, regions: &RegionMap) -> RegionId {
        let position = scroll_y.saturating_add(self.header_offset);
        let next = regions
            .iter()
            .rev()
            .find(|(_, top)| *top <= position)
            .map(|(id, _)| id)
            .unwrap_or_else(RegionId::first);

        if next != self.active {
            tracing::debug!(from = %self.active, to = %next, scroll_y, "active section changed");
            self.active = next;
        }
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_regions() -> RegionMap {
        [(RegionId::Hero, 0), (RegionId::Skills, 800), (RegionId::Contact, 1600)]
            .into_iter()
            .collect()
    }

    #[test]
    fn starts_on_first_region() {
        assert_eq!(SectionTracker::new(100).active(), RegionId::Hero);
    }

    #[test]
    fn picks_most_recently_passed_boundary() {
        let mut tracker = SectionTracker::new(100);
        assert_eq!(tracker.on_scroll(750, &three_regions()), RegionId::Skills);
        assert_eq!(tracker.on_scroll(1500, &three_regions()), RegionId::Contact);
        assert_eq!(tracker.on_scroll(699, &three_regions()), RegionId::Hero);
    }

    #[test]
    fn above_every_region_falls_back_to_first() {
        let regions: RegionMap = [(RegionId::Hero, 300), (RegionId::About, 900)].into_iter().collect();
        let mut tracker = SectionTracker::new(100);
        tracker.on_scroll(1000, &regions);
        assert_eq!(tracker.active(), RegionId::About);
        assert_eq!(tracker.on_scroll(0, &regions), RegionId::Hero);
    }

    #[test]
    fn missing_regions_are_skipped() {
        let regions: RegionMap = [(RegionId::Hero, 0), (RegionId::Contact, 1600)].into_iter().collect();
        let mut tracker = SectionTracker::new(100);
        assert_eq!(tracker.on_scroll(750, &regions), RegionId::Hero);
        assert_eq!(tracker.on_scroll(750, &RegionMap::new()), RegionId::Hero);
    }

    #[test]
    fn position_saturates_near_the_end() {
        let regions: RegionMap = [(RegionId::Hero, 0), (RegionId::Contact, u16::MAX)].into_iter().collect();
        let mut tracker = SectionTracker::new(100);
        assert_eq!(tracker.on_scroll(u16::MAX - 10, &regions), RegionId::Contact);
    }
}
