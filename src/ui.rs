use ratatui::{
    prelude::*,
    layout::Position,
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::app::App;
use crate::regions::RegionId;

pub use crate::layout::HEADER_ROWS as HEADER_HEIGHT;
const MENU_WIDTH: u16 = 20;
const MENU_LABEL_OPEN: &str = "[x] Close";
const MENU_LABEL_CLOSED: &str = "[=] Menu";

/// Clickable areas of the fixed header, in screen coordinates.
#[derive(Debug, Clone)]
pub struct NavLayout {
    pub header: Rect,
    pub logo: Rect,
    pub items: Vec<(RegionId, Rect)>,
    pub menu_button: Option<Rect>,
}

impl NavLayout {
    pub fn compute(area: Rect, logo: &str, mobile: bool) -> Self {
        let header = Rect::new(area.x, area.y, area.width, HEADER_HEIGHT.min(area.height));
        let y = header.y + 1;
        let logo_width = (logo.chars().count() as u16).min(header.width.saturating_sub(4));
        let logo_rect = Rect::new(header.x + 2, y, logo_width, 1);
        let right = header.right().saturating_sub(2);

        if mobile {
            let w = MENU_LABEL_CLOSED.chars().count().max(MENU_LABEL_OPEN.chars().count()) as u16;
            let button = Rect::new(right.saturating_sub(w), y, w, 1);
            return Self { header, logo: logo_rect, items: Vec::new(), menu_button: Some(button) };
        }

        let total: u16 = RegionId::ALL.iter().map(|id| id.label().len() as u16 + 2).sum::<u16>() - 2;
        let mut x = right.saturating_sub(total);
        let items = RegionId::ALL
            .iter()
            .map(|id| {
                let w = id.label().len() as u16;
                let rect = Rect::new(x, y, w, 1);
                x += w + 2;
                (*id, rect)
            })
            .collect();
        Self { header, logo: logo_rect, items, menu_button: None }
    }

    pub fn item_at(&self, at: Position) -> Option<RegionId> {
        self.items.iter().find(|(_, r)| r.contains(at)).map(|(id, _)| *id)
    }
}

/// The dropdown shown under the header when the menu is open.
pub fn menu_overlay(area: Rect) -> Rect {
    let width = MENU_WIDTH.min(area.width);
    let height = (RegionId::ALL.len() as u16 + 2).min(area.height.saturating_sub(HEADER_HEIGHT));
    Rect::new(area.right().saturating_sub(width + 1), area.y + HEADER_HEIGHT, width, height)
}

pub fn menu_items(overlay: Rect) -> Vec<(RegionId, Rect)> {
    RegionId::ALL
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, Rect::new(overlay.x + 1, overlay.y + 1 + i as u16, overlay.width.saturating_sub(2), 1)))
        .filter(|(_, r)| r.bottom() < overlay.bottom())
        .collect()
}

/// Splits the terminal into the scrolling page and the status line.
pub fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn render(f: &mut Frame, app: &App) {
    let (page_area, status_area) = split(f.area());

    render_background(f, app, page_area);
    render_page(f, app, page_area);
    render_header(f, app);
    if app.menu.is_open() {
        render_menu(f, app, page_area);
    }
    render_status(f, app, status_area);
}

fn render_background(f: &mut Frame, app: &App, area: Rect) {
    const ORBS: [(f32, f32, f32, &str); 3] = [
        (0.15, 0.25, 0.04, "·  ·  ·"),
        (0.80, 0.55, 0.08, "∙ ∘ ∙"),
        (0.45, 0.85, 0.12, "· ∘ ·"),
    ];
    for (fx, fy, depth, glyphs) in ORBS {
        let (dx, dy) = app.pointer.parallax(area, depth);
        let x = (area.x as f32 + area.width as f32 * fx) as i32 + dx as i32;
        let y = (area.y as f32 + area.height as f32 * fy) as i32 + dy as i32;
        let w = glyphs.chars().count() as u16;
        if x < area.x as i32 || y < area.y as i32 {
            continue;
        }
        let rect = Rect::new(x as u16, y as u16, w, 1).intersection(area);
        if !rect.is_empty() {
            f.render_widget(Paragraph::new(glyphs).style(app.theme.background_glyph), rect);
        }
    }
    // faint glow under the pointer
    if let Some(pos) = app.pointer.position() {
        let rect = Rect::new(pos.x.saturating_sub(1), pos.y, 3, 1).intersection(area);
        if !rect.is_empty() {
            f.render_widget(Paragraph::new("·∘·").style(app.theme.background_glyph), rect);
        }
    }
}

fn render_page(f: &mut Frame, app: &App, area: Rect) {
    let doc = &app.doc;
    let offset = app.page.offset() as usize;
    let lines: Vec<Line> = doc
        .rows
        .iter()
        .skip(offset)
        .take(area.height as usize)
        .map(|row| match row.block {
            Some(id) if !app.reveal.is_visible(id) => placeholder(row.line.width(), app),
            _ => row.line.clone(),
        })
        .collect();

    let column = Rect::new(doc.column.x, area.y, doc.column.width, area.height).intersection(area);
    f.render_widget(Paragraph::new(lines), column);

    let mut state = ScrollbarState::default()
        .content_length(app.page.max_offset() as usize)
        .position(offset);
    f.render_stateful_widget(
        Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight),
        area,
        &mut state,
    );
}

fn placeholder(width: usize, app: &App) -> Line<'static> {
    if width == 0 {
        return Line::default();
    }
    Line::styled("░".repeat(width), app.theme.placeholder)
}

fn render_header(f: &mut Frame, app: &App) {
    let nav = app.nav_layout();
    f.render_widget(Clear, nav.header);
    f.render_widget(Block::default().borders(Borders::BOTTOM).border_style(app.theme.footer), nav.header);

    f.render_widget(Paragraph::new(app.logo()).style(app.theme.logo), nav.logo);

    for (i, (id, rect)) in nav.items.iter().enumerate() {
        let style = if app.nav_focus == Some(i) {
            app.theme.nav_focus
        } else if *id == app.tracker.active() {
            app.theme.nav_active
        } else {
            app.theme.nav_item
        };
        f.render_widget(Paragraph::new(id.label()).style(style), *rect);
    }

    if let Some(rect) = nav.menu_button {
        let label = if app.menu.is_open() { MENU_LABEL_OPEN } else { MENU_LABEL_CLOSED };
        f.render_widget(Paragraph::new(label).style(app.theme.button), rect);
    }
}

fn render_menu(f: &mut Frame, app: &App, area: Rect) {
    let overlay = menu_overlay(area);
    f.render_widget(Clear, overlay);
    f.render_widget(
        Block::default().title("Navigate").borders(Borders::ALL).style(app.theme.menu_border),
        overlay,
    );
    for (i, (id, rect)) in menu_items(overlay).into_iter().enumerate() {
        let marker = if id == app.tracker.active() { "› " } else { "  " };
        let style = if app.nav_focus == Some(i) {
            app.theme.nav_focus
        } else if id == app.tracker.active() {
            app.theme.nav_active
        } else {
            app.theme.nav_item
        };
        f.render_widget(Paragraph::new(format!("{marker}{}", id.label())).style(style), rect);
    }
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.notice() {
        Some(notice) => Line::styled(notice.to_string(), app.theme.notice),
        None => Line::styled(
            "↑/↓ scroll | 1-6 jump | Tab/Enter nav | m menu | t top | c copy email | q quit",
            app.theme.footer,
        ),
    };
    f.render_widget(Paragraph::new(text), area);
}
