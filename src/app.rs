use std::time::{Duration, Instant};

use arboard::Clipboard;
use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::config::Settings;
use crate::error::Result;
use crate::layout::{Action, DocumentLayout};
use crate::menu::{MenuTrigger, MobileMenu};
use crate::models::Portfolio;
use crate::navigator::Navigator;
use crate::pointer::PointerTracker;
use crate::regions::RegionId;
use crate::scroll::{PageScroll, ScrollBehavior};
use crate::theme::Theme;
use crate::timing::{Debounce, Throttle};
use crate::tracker::SectionTracker;
use crate::ui::{self, NavLayout};
use crate::visibility::{BlockId, RevealRegistry};

const WHEEL_ROWS: i32 = 3;
const NOTICE_TTL: Duration = Duration::from_secs(2);

/// All ephemeral UI state of one session.
pub struct App {
    pub settings: Settings,
    pub portfolio: Portfolio,
    pub theme: Theme,
    pub size: Rect,
    pub doc: DocumentLayout,
    pub page: PageScroll,
    pub tracker: SectionTracker,
    pub navigator: Navigator,
    pub menu: MobileMenu,
    pub pointer: PointerTracker,
    pub reveal: RevealRegistry,
    pub nav_focus: Option<usize>,
    scroll_gate: Throttle,
    scroll_stale: bool,
    resize: Debounce<(u16, u16)>,
    notice: Option<(String, Instant)>,
    year: i32,
}

impl App {
    pub fn new(settings: Settings, portfolio: Portfolio, size: Rect, now: Instant) -> Result<Self> {
        let reveal = RevealRegistry::new(settings.root_margin()?, settings.threshold()?, settings.reveal_available());
        let behavior = if settings.motion.reduced { ScrollBehavior::Instant } else { ScrollBehavior::Smooth };
        let theme = Theme::default();
        let year = chrono::Local::now().year();
        let doc = DocumentLayout::build(&portfolio, &theme, size.width, size.height, year);

        let mut app = Self {
            page: PageScroll::new(settings.smooth_scroll()),
            tracker: SectionTracker::new(settings.header_offset),
            navigator: Navigator::new(settings.header_offset, behavior),
            menu: MobileMenu::new(),
            pointer: PointerTracker::new(settings.pointer_throttle()),
            scroll_gate: Throttle::new(settings.scroll_throttle()),
            resize: Debounce::new(settings.resize_debounce()),
            scroll_stale: false,
            nav_focus: None,
            notice: None,
            settings,
            portfolio,
            theme,
            size,
            doc,
            reveal,
            year,
        };
        app.page.tick(now);
        app.relayout(size);
        Ok(app)
    }

    pub fn is_mobile(&self) -> bool {
        self.size.width < self.settings.layout.mobile_breakpoint
    }

    pub fn logo(&self) -> String {
        let first = self.portfolio.profile.name.split_whitespace().next().unwrap_or("me");
        format!("<{first} />")
    }

    pub fn nav_layout(&self) -> NavLayout {
        NavLayout::compute(self.page_area(), &self.logo(), self.is_mobile())
    }

    pub fn page_area(&self) -> Rect {
        ui::split(self.size).0
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(text, _)| text.as_str())
    }

    /// Viewport in document coordinates.
    pub fn viewport(&self) -> Rect {
        let area = self.page_area();
        Rect::new(0, self.page.offset(), area.width, area.height)
    }

    fn relayout(&mut self, size: Rect) {
        self.size = size;
        let page = self.page_area();
        self.doc = DocumentLayout::build(&self.portfolio, &self.theme, page.width, page.height, self.year);
        self.page.set_bounds(self.doc.height(), page.height);
        let stale: Vec<BlockId> = self.reveal.ids().filter(|id| !self.doc.blocks.contains_key(id)).collect();
        for id in stale {
            self.reveal.unregister(id);
        }
        for id in self.doc.blocks.keys() {
            self.reveal.register(*id);
        }
        if !self.is_mobile() {
            self.menu.close();
        }
        tracing::debug!(
            width = size.width,
            height = size.height,
            rows = self.doc.height(),
            observing = self.reveal.observed_count(),
            "layout rebuilt"
        );
        self.sync_scroll();
    }

    /// Re-evaluates the active section and reveals without waiting for the throttle.
    fn sync_scroll(&mut self) {
        self.scroll_stale = false;
        let offset = self.page.offset();
        self.tracker.on_scroll(offset, &self.doc.regions);
        let viewport = self.viewport();
        self.reveal.observe(viewport, &self.doc.blocks);
    }

    /// Throttled scroll handler. A dropped call marks the state stale so the
    /// next tick picks up the final offset.
    fn on_scroll(&mut self, now: Instant) {
        if self.scroll_gate.ready(now) {
            self.sync_scroll();
        } else {
            self.scroll_stale = true;
        }
    }

    fn scroll_by(&mut self, delta: i32, now: Instant) {
        if self.menu.scroll_locked() {
            return;
        }
        let before = self.page.offset();
        self.page.scroll_by(delta);
        if self.page.offset() != before {
            self.on_scroll(now);
        }
    }

    pub fn navigate(&mut self, id: RegionId, now: Instant) {
        self.page.tick(now);
        self.navigator.navigate(id, &self.doc.regions, &mut self.page, &mut self.menu);
        self.nav_focus = None;
        self.on_scroll(now);
    }

    pub fn start_at(&mut self, id: RegionId, now: Instant) {
        if let Some(top) = self.doc.regions.top(id) {
            self.page.scroll_to_at(now, top.saturating_sub(self.settings.header_offset), ScrollBehavior::Instant);
            self.sync_scroll();
        }
    }

    fn perform(&mut self, action: Action, now: Instant) {
        match action {
            Action::Navigate(id) => self.navigate(id, now),
            Action::CopyEmail => self.copy_email(now),
        }
    }

    fn copy_email(&mut self, now: Instant) {
        let email = self.portfolio.profile.email.clone();
        let copied = Clipboard::new().and_then(|mut cb| cb.set_text(email.clone()));
        let text = match copied {
            Ok(()) => format!("Copied {email} to clipboard"),
            Err(err) => {
                tracing::warn!(%err, "clipboard unavailable");
                format!("Clipboard unavailable, email: {email}")
            }
        };
        self.notice = Some((text, now));
    }

    fn toggle_menu(&mut self) {
        if !self.is_mobile() {
            return;
        }
        self.menu.apply(MenuTrigger::Toggle);
        self.nav_focus = None;
        tracing::debug!(expanded = self.menu.aria_expanded(), "menu toggled");
    }

    fn move_focus(&mut self, forward: bool) {
        let n = RegionId::ALL.len();
        let current = self.nav_focus.unwrap_or(self.tracker.active().index());
        let next = match (self.nav_focus, forward) {
            (None, _) => current,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        };
        self.nav_focus = Some(next);
    }

    /// Handles a key press. Returns false when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let page_rows = self.page_area().height.saturating_sub(ui::HEADER_HEIGHT).max(1) as i32;
        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Esc => {
                if self.menu.is_open() {
                    self.menu.apply(MenuTrigger::Escape);
                }
                self.nav_focus = None;
            }
            KeyCode::Char('m') => self.toggle_menu(),
            KeyCode::Up | KeyCode::Char('k') if self.menu.is_open() => self.move_focus(false),
            KeyCode::Down | KeyCode::Char('j') if self.menu.is_open() => self.move_focus(true),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1, now),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1, now),
            KeyCode::PageUp => self.scroll_by(-page_rows, now),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page_rows, now),
            KeyCode::End => {
                let max = self.page.max_offset() as i32;
                self.scroll_by(max, now);
            }
            KeyCode::Home | KeyCode::Char('t') => self.navigate(RegionId::first(), now),
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                if let Some(id) = RegionId::from_index(index) {
                    self.navigate(id, now);
                }
            }
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Enter => {
                if let Some(id) = self.nav_focus.and_then(RegionId::from_index) {
                    if self.menu.is_open() {
                        self.menu.apply(MenuTrigger::ItemSelected);
                    }
                    self.navigate(id, now);
                }
            }
            KeyCode::Char('c') => self.copy_email(now),
            _ => {}
        }
        true
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, now: Instant) {
        match event.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS, now),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS, now),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer.on_move(now, event.column, event.row);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.click(Position::new(event.column, event.row), now);
            }
            _ => {}
        }
    }

    fn click(&mut self, at: Position, now: Instant) {
        let nav = self.nav_layout();

        if self.menu.is_open() {
            let overlay = ui::menu_overlay(self.page_area());
            if let Some((id, _)) = ui::menu_items(overlay).into_iter().find(|(_, r)| r.contains(at)) {
                self.navigate(id, now);
                return;
            }
            if self.menu.click_outside(at, &[nav.header, overlay]) {
                return;
            }
        }

        if nav.menu_button.is_some_and(|r| r.contains(at)) {
            self.toggle_menu();
        } else if nav.logo.contains(at) {
            self.navigate(RegionId::first(), now);
        } else if let Some(id) = nav.item_at(at) {
            self.navigate(id, now);
        } else if !nav.header.contains(at) {
            let doc_pos = Position::new(at.x, at.y.saturating_add(self.page.offset()));
            if let Some(action) = self.doc.hotspot_at(doc_pos) {
                self.perform(action, now);
            }
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.resize.push(now, (width, height));
    }

    /// Advances animations and timers. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some((width, height)) = self.resize.poll(now) {
            self.relayout(Rect::new(0, 0, width, height));
            changed = true;
        }
        if self.page.tick(now) {
            self.on_scroll(now);
            changed = true;
        }
        if self.scroll_stale && self.scroll_gate.ready(now) {
            self.sync_scroll();
            changed = true;
        }
        if self.notice.as_ref().is_some_and(|(_, at)| now.saturating_duration_since(*at) >= NOTICE_TTL) {
            self.notice = None;
            changed = true;
        }
        changed
    }

    /// Earliest instant a timer needs servicing, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Drops every observation; called once the UI goes away.
    pub fn shutdown(&mut self) {
        self.reveal.disconnect();
        self.resize.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_PORTFOLIO;
    use crossterm::event::KeyEventKind;
    use ratatui::{Terminal, backend::TestBackend};

    fn app(width: u16, height: u16) -> (App, Instant) {
        let now = Instant::now();
        let settings = Settings::defaults().unwrap();
        let app = App::new(settings, DEFAULT_PORTFOLIO.clone(), Rect::new(0, 0, width, height), now).unwrap();
        (app, now)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn click_at(rect: Rect) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn settle(app: &mut App, from: Instant) -> Instant {
        let end = from + Duration::from_secs(2);
        app.tick(end);
        end
    }

    #[test]
    fn clicking_nav_item_scrolls_smoothly_to_region() {
        let (mut app, now) = app(120, 40);
        let skills = app.nav_layout().items.iter().find(|(id, _)| *id == RegionId::Skills).unwrap().1;

        app.handle_mouse(click_at(skills), now);

        let expected = app.doc.regions.top(RegionId::Skills).unwrap() - app.settings.header_offset;
        assert!(app.page.is_animating());
        assert_eq!(app.page.destination(), expected);

        settle(&mut app, now);
        assert_eq!(app.page.offset(), expected);
        assert_eq!(app.tracker.active(), RegionId::Skills);
    }

    #[test]
    fn menu_selection_navigates_and_closes() {
        let (mut app, now) = app(60, 30);
        assert!(app.is_mobile());
        let button = app.nav_layout().menu_button.unwrap();
        app.handle_mouse(click_at(button), now);
        assert!(app.menu.is_open());
        assert!(app.menu.scroll_locked());

        // page is locked while the menu is open
        app.handle_key(key(KeyCode::PageDown), now);
        assert_eq!(app.page.offset(), 0);

        let overlay = ui::menu_overlay(app.page_area());
        let (_, contact) = ui::menu_items(overlay).into_iter().find(|(id, _)| *id == RegionId::Contact).unwrap();
        app.handle_mouse(click_at(contact), now);
        assert!(!app.menu.is_open());
        assert!(!app.menu.scroll_locked());

        settle(&mut app, now);
        assert_eq!(app.tracker.active(), RegionId::Contact);
    }

    #[test]
    fn outside_click_and_escape_close_menu() {
        let (mut app, now) = app(60, 30);
        app.handle_key(key(KeyCode::Char('m')), now);
        assert!(app.menu.is_open());
        app.handle_mouse(click_at(Rect::new(2, 20, 1, 1)), now);
        assert!(!app.menu.is_open());

        app.handle_key(key(KeyCode::Char('m')), now);
        app.handle_key(key(KeyCode::Esc), now);
        assert!(!app.menu.is_open());
    }

    #[test]
    fn menu_is_desktop_only() {
        let (mut app, now) = app(120, 40);
        app.handle_key(key(KeyCode::Char('m')), now);
        assert!(!app.menu.is_open());
    }

    #[test]
    fn resize_is_debounced_and_closes_menu_on_desktop() {
        let (mut app, now) = app(60, 30);
        app.handle_key(key(KeyCode::Char('m')), now);
        app.handle_resize(100, 30, now);
        app.handle_resize(130, 40, now + Duration::from_millis(50));
        assert!(!app.tick(now + Duration::from_millis(100)));
        assert_eq!(app.size.width, 60);

        assert!(app.tick(now + Duration::from_millis(250)));
        assert_eq!(app.size, Rect::new(0, 0, 130, 40));
        assert!(!app.menu.is_open());
    }

    #[test]
    fn throttled_scroll_catches_up_on_tick() {
        let (mut app, now) = app(120, 40);
        let about = app.doc.regions.top(RegionId::About).unwrap();

        // first scroll passes the throttle, the rest are dropped
        app.handle_key(key(KeyCode::Down), now);
        let rows = about as i32;
        for i in 0..rows {
            app.handle_key(key(KeyCode::Down), now + Duration::from_millis(i as u64));
        }
        assert_eq!(app.tracker.active(), RegionId::Hero);

        app.tick(now + Duration::from_millis(200));
        assert_eq!(app.tracker.active(), RegionId::About);
    }

    #[test]
    fn number_keys_jump_and_logo_returns_home() {
        let (mut app, now) = app(120, 40);
        app.handle_key(key(KeyCode::Char('4')), now);
        let t = settle(&mut app, now);
        assert_eq!(app.tracker.active(), RegionId::Projects);

        let logo = app.nav_layout().logo;
        app.handle_mouse(click_at(logo), t);
        settle(&mut app, t);
        assert_eq!(app.page.offset(), 0);
        assert_eq!(app.tracker.active(), RegionId::Hero);
    }

    #[test]
    fn tab_focus_then_enter_navigates() {
        let (mut app, now) = app(120, 40);
        app.handle_key(key(KeyCode::Tab), now);
        assert_eq!(app.nav_focus, Some(0));
        app.handle_key(key(KeyCode::Tab), now);
        app.handle_key(key(KeyCode::Tab), now);
        app.handle_key(key(KeyCode::Enter), now);
        settle(&mut app, now);
        assert_eq!(app.tracker.active(), RegionId::Skills);
        assert_eq!(app.nav_focus, None);
    }

    #[test]
    fn hero_button_navigates() {
        let (mut app, now) = app(120, 40);
        let button = app
            .doc
            .hotspots
            .iter()
            .find(|h| h.action == Action::Navigate(RegionId::Contact))
            .unwrap()
            .area;
        app.handle_mouse(click_at(button), now);
        let top = app.doc.regions.top(RegionId::Contact).unwrap();
        assert_eq!(
            app.page.destination(),
            (top - app.settings.header_offset).min(app.page.max_offset())
        );
    }

    #[test]
    fn blocks_reveal_as_they_scroll_in() {
        let now = Instant::now();
        let mut settings = Settings::defaults().unwrap();
        settings.reveal.root_margin = "0px".into();
        let mut app = App::new(settings, DEFAULT_PORTFOLIO.clone(), Rect::new(0, 0, 120, 40), now).unwrap();
        let first_project = BlockId::new(RegionId::Projects, 0);
        assert!(!app.reveal.is_visible(first_project));

        app.navigate(RegionId::Projects, now);
        settle(&mut app, now);
        assert!(app.reveal.is_visible(first_project));

        app.navigate(RegionId::Hero, now);
        settle(&mut app, now + Duration::from_secs(3));
        assert!(app.reveal.is_visible(first_project));
    }

    #[test]
    fn reduced_motion_jumps_and_shows_everything() {
        let now = Instant::now();
        let mut settings = Settings::defaults().unwrap();
        settings.motion.reduced = true;
        let mut app = App::new(settings, DEFAULT_PORTFOLIO.clone(), Rect::new(0, 0, 120, 40), now).unwrap();

        assert!(app.reveal.is_visible(BlockId::new(RegionId::Contact, 0)));
        app.navigate(RegionId::Skills, now);
        assert!(!app.page.is_animating());
        let top = app.doc.regions.top(RegionId::Skills).unwrap();
        assert_eq!(app.page.offset(), top - app.settings.header_offset);
    }

    #[test]
    fn renders_header_and_revealed_sections() {
        let (mut app, now) = app(100, 30);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::render(f, &app)).unwrap();
        let screen = format!("{:?}", terminal.backend().buffer());
        assert!(screen.contains("<Alex />"));
        assert!(screen.contains("Hi, I'm Alex Morgan"));

        app.navigate(RegionId::Skills, now);
        settle(&mut app, now);
        terminal.draw(|f| ui::render(f, &app)).unwrap();
        let screen = format!("{:?}", terminal.backend().buffer());
        assert!(screen.contains("SKILLS"));
        assert!(screen.contains("Rust"));
    }
}
