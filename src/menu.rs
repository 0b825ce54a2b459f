use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTrigger {
    Toggle,
    ItemSelected,
    OutsideClick,
    Escape,
}

/// Navigation overlay used when the terminal is too narrow for the full bar.
/// While open, page scrolling is locked.
#[derive(Debug, Clone, Default)]
pub struct MobileMenu {
    state: MenuState,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn apply(&mut self, trigger: MenuTrigger) -> MenuState {
        let next = match (trigger, self.state) {
            (MenuTrigger::Toggle, MenuState::Closed) => MenuState::Open,
            (MenuTrigger::Toggle, MenuState::Open) => MenuState::Closed,
            (MenuTrigger::ItemSelected | MenuTrigger::OutsideClick | MenuTrigger::Escape, _) => {
                MenuState::Closed
            }
        };
        if next != self.state {
            tracing::debug!(?trigger, ?next, "menu transition");
        }
        self.state = next;
        next
    }

    /// Closes without a user trigger, e.g. when the layout stops being narrow.
    pub fn close(&mut self) {
        if self.is_open() {
            tracing::debug!("menu closed by layout change");
            self.state = MenuState::Closed;
        }
    }

    /// Closes the menu when a click lands outside every area that belongs to it.
    /// Returns true if that happened.
    pub fn click_outside(&mut self, at: Position, inside: &[Rect]) -> bool {
        if !self.is_open() || inside.iter().any(|area| area.contains(at)) {
            return false;
        }
        self.apply(MenuTrigger::OutsideClick);
        true
    }

    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    /// Value of the toggle's expanded attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.is_open() { "true" } else { "false" }
    }
}
