use crate::menu::{MenuTrigger, MobileMenu};
use crate::regions::{RegionId, RegionMap};
use crate::scroll::{ScrollBehavior, ScrollTarget};

/// Scrolls the page so a region starts right under the fixed header.
#[derive(Debug, Clone)]
pub struct Navigator {
    header_offset: u16,
    behavior: ScrollBehavior,
}

impl Navigator {
    pub fn new(header_offset: u16, behavior: ScrollBehavior) -> Self {
        Self { header_offset, behavior }
    }

    /// Requests a scroll to `id` and closes the menu if it is open.
    /// Unknown regions are ignored; returns the requested offset otherwise.
    pub fn navigate<T: ScrollTarget>(
        &self,
        id: RegionId,
        regions: &RegionMap,
        target: &mut T,
        menu: &mut MobileMenu,
    ) -> Option<u16> {
        let Some(top) = regions.top(id) else {
            tracing::debug!(region = %id, "navigation target not laid out");
            return None;
        };
        let offset = top.saturating_sub(self.header_offset);
        target.scroll_to(offset, self.behavior);
        if menu.is_open() {
            menu.apply(MenuTrigger::ItemSelected);
        }
        tracing::debug!(region = %id, offset, "navigating");
        Some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(u16, ScrollBehavior)>,
    }

    impl ScrollTarget for Recorder {
        fn scroll_to(&mut self, offset: u16, behavior: ScrollBehavior) {
            self.calls.push((offset, behavior));
        }
    }

    #[test]
    fn scrolls_below_header() {
        let regions: RegionMap = [(RegionId::Hero, 0), (RegionId::Skills, 800)].into_iter().collect();
        let nav = Navigator::new(80, ScrollBehavior::Smooth);
        let mut rec = Recorder::default();
        let mut menu = MobileMenu::new();

        assert_eq!(nav.navigate(RegionId::Skills, &regions, &mut rec, &mut menu), Some(720));
        assert_eq!(rec.calls, vec![(720, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn first_region_clamps_to_top() {
        let regions: RegionMap = [(RegionId::Hero, 0)].into_iter().collect();
        let nav = Navigator::new(80, ScrollBehavior::Instant);
        let mut rec = Recorder::default();
        nav.navigate(RegionId::Hero, &regions, &mut rec, &mut MobileMenu::new());
        assert_eq!(rec.calls, vec![(0, ScrollBehavior::Instant)]);
    }

    #[test]
    fn unknown_region_is_a_no_op() {
        let regions: RegionMap = [(RegionId::Hero, 0)].into_iter().collect();
        let nav = Navigator::new(80, ScrollBehavior::Smooth);
        let mut rec = Recorder::default();
        let mut menu = MobileMenu::new();
        menu.apply(MenuTrigger::Toggle);

        assert_eq!(nav.navigate(RegionId::Projects, &regions, &mut rec, &mut menu), None);
        assert!(rec.calls.is_empty());
        assert!(menu.is_open());
    }

    #[test]
    fn closes_open_menu() {
        let regions: RegionMap = [(RegionId::Contact, 300)].into_iter().collect();
        let nav = Navigator::new(3, ScrollBehavior::Smooth);
        let mut menu = MobileMenu::new();
        menu.apply(MenuTrigger::Toggle);

        nav.navigate(RegionId::Contact, &regions, &mut Recorder::default(), &mut menu);
        assert!(!menu.is_open());
        assert!(!menu.scroll_locked());
    }
}
