//! Lays the portfolio out as one tall document of pre-wrapped rows.
//!
//! Coordinates are document coordinates: row 0 is the top of the page, and
//! x is relative to the left edge of the terminal. The layout records where
//! each region starts, where each revealable block sits and which spans are
//! clickable. Placeholders occupy exactly the rows of the content they stand
//! in for, so revealing a block never moves anything.

use std::collections::HashMap;

use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};

use crate::models::Portfolio;
use crate::regions::{RegionId, RegionMap};
use crate::theme::Theme;
use crate::visibility::BlockId;

/// Rows covered by the fixed navigation header.
pub const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 4;
const MAX_COLUMN_WIDTH: u16 = 96;
const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(RegionId),
    CopyEmail,
}

#[derive(Debug, Clone)]
pub struct Hotspot {
    pub area: Rect,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub struct Row {
    pub line: Line<'static>,
    pub block: Option<BlockId>,
}

#[derive(Debug, Clone)]
pub struct DocumentLayout {
    pub column: Rect,
    pub rows: Vec<Row>,
    pub regions: RegionMap,
    pub blocks: HashMap<BlockId, Rect>,
    pub hotspots: Vec<Hotspot>,
}

impl DocumentLayout {
    pub fn height(&self) -> u16 {
        u16::try_from(self.rows.len()).unwrap_or(u16::MAX)
    }

    /// Action under a point in document coordinates.
    pub fn hotspot_at(&self, at: Position) -> Option<Action> {
        self.hotspots.iter().find(|h| h.area.contains(at)).map(|h| h.action)
    }

    pub fn build(portfolio: &Portfolio, theme: &Theme, width: u16, viewport_height: u16, year: i32) -> Self {
        let column_width = width.saturating_sub(4).min(MAX_COLUMN_WIDTH).max(10);
        let column_x = width.saturating_sub(column_width) / 2;
        let mut doc = DocBuilder::new(column_x, column_width);

        // the fixed header covers the first rows of the page
        doc.blank(HEADER_ROWS as usize);
        hero(&mut doc, portfolio, theme, viewport_height);
        about(&mut doc, portfolio, theme);
        skills(&mut doc, portfolio, theme);
        projects(&mut doc, portfolio, theme);
        content(&mut doc, portfolio, theme);
        contact(&mut doc, portfolio, theme, viewport_height);
        footer(&mut doc, portfolio, theme, year);

        doc.finish()
    }
}

struct DocBuilder {
    x: u16,
    width: u16,
    rows: Vec<Row>,
    regions: RegionMap,
    blocks: HashMap<BlockId, Rect>,
    hotspots: Vec<Hotspot>,
    current: Option<(BlockId, u16)>,
}

impl DocBuilder {
    fn new(x: u16, width: u16) -> Self {
        Self {
            x,
            width,
            rows: Vec::new(),
            regions: RegionMap::new(),
            blocks: HashMap::new(),
            hotspots: Vec::new(),
            current: None,
        }
    }

    /// Index of the next row; documents past `u16::MAX` rows pin to the end.
    fn row(&self) -> u16 {
        u16::try_from(self.rows.len()).unwrap_or(u16::MAX)
    }

    fn line(&mut self, line: Line<'static>) {
        let block = self.current.map(|(id, _)| id);
        self.rows.push(Row { line, block });
    }

    fn blank(&mut self, n: usize) {
        for _ in 0..n {
            self.line(Line::default());
        }
    }

    fn wrapped(&mut self, text: &str, style: ratatui::style::Style, indent: usize) {
        let width = (self.width as usize).saturating_sub(indent).max(1);
        for piece in wrap(text, width) {
            self.line(Line::from(vec![Span::raw(" ".repeat(indent)), Span::styled(piece, style)]));
        }
    }

    fn region(&mut self, id: RegionId, title: &str, theme: &Theme) {
        self.blank(1);
        let top = self.row();
        self.regions.insert(id, top);
        self.line(Line::styled(title.to_uppercase(), theme.heading));
        self.line(Line::styled("─".repeat(title.chars().count().max(3)), theme.heading));
        self.blank(1);
    }

    fn begin_block(&mut self, id: BlockId) {
        self.end_block();
        self.current = Some((id, self.row()));
    }

    fn end_block(&mut self) {
        if let Some((id, top)) = self.current.take() {
            let height = self.row().saturating_sub(top);
            self.blocks.insert(id, Rect::new(self.x, top, self.width, height));
        }
    }

    /// A row of buttons; each label becomes a clickable area.
    fn buttons(&mut self, buttons: &[(&str, Action)], theme: &Theme) {
        let y = self.row();
        let mut spans = Vec::new();
        let mut x = self.x;
        for (label, action) in buttons {
            let text = format!(" {label} ");
            let w = text.chars().count() as u16;
            self.hotspots.push(Hotspot { area: Rect::new(x, y, w, 1), action: *action });
            spans.push(Span::styled(text, theme.button));
            spans.push(Span::raw("  "));
            x += w + 2;
        }
        self.line(Line::from(spans));
    }

    fn finish(mut self) -> DocumentLayout {
        self.end_block();
        DocumentLayout {
            column: Rect::new(self.x, 0, self.width, self.row()),
            rows: self.rows,
            regions: self.regions,
            blocks: self.blocks,
            hotspots: self.hotspots,
        }
    }
}

/// Greedy word wrap by character count; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if len > 0 {
                lines.push(std::mem::take(&mut current));
                len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if len == 0 { word.len() } else { len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            len = 0;
        }
        if len > 0 {
            current.push(' ');
            len += 1;
        }
        current.extend(word.iter());
        len += word.len();
    }
    if len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn level_bar(level: u8) -> (String, String) {
    let filled = (level.min(100) as usize * BAR_WIDTH).div_ceil(100);
    ("█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn hero(doc: &mut DocBuilder, portfolio: &Portfolio, theme: &Theme, viewport_height: u16) {
    let profile = &portfolio.profile;
    let top = doc.row();
    doc.regions.insert(RegionId::Hero, top);
    doc.blank(2);
    doc.line(Line::styled(format!("Hi, I'm {}", profile.name), theme.name));
    doc.line(Line::styled(profile.role.clone(), theme.role));
    doc.blank(1);
    doc.wrapped(&profile.tagline, theme.body, 0);
    if let Some(url) = &profile.resume_url {
        doc.line(Line::from(vec![
            Span::styled("Résumé  ", theme.muted),
            Span::styled(url.clone(), theme.link),
        ]));
    }
    doc.blank(1);
    doc.buttons(
        &[
            ("View projects", Action::Navigate(RegionId::Projects)),
            ("Get in touch", Action::Navigate(RegionId::Contact)),
        ],
        theme,
    );
    // fill the first screen, header rows excluded
    let min_height = viewport_height.saturating_sub(HEADER_ROWS);
    let used = doc.row().saturating_sub(top);
    if used < min_height {
        doc.blank((min_height - used) as usize);
    }
}

fn about(doc: &mut DocBuilder, portfolio: &Portfolio, theme: &Theme) {
    doc.region(RegionId::About, "About", theme);
    doc.begin_block(BlockId::new(RegionId::About, 0));
    for paragraph in &portfolio.profile.bio {
        doc.wrapped(paragraph, theme.body, 0);
        doc.blank(1);
    }
    doc.line(Line::from(vec![
        Span::styled(format!("{} ", crate::models::Icon::Location.glyph()), theme.muted),
        Span::styled(portfolio.profile.location.clone(), theme.muted),
    ]));
    doc.end_block();

    for (i, achievement) in portfolio.achievements.iter().enumerate() {
        doc.blank(1);
        doc.begin_block(BlockId::new(RegionId::About, i + 1));
        doc.line(Line::from(vec![
            Span::styled(format!("{} ", crate::models::Icon::Trophy.glyph()), theme.tag),
            Span::styled(achievement.title.clone(), theme.name),
            Span::styled(format!("  ({})", achievement.year), theme.muted),
        ]));
        doc.wrapped(&achievement.detail, theme.muted, 2);
        doc.end_block();
    }
}

fn skills(doc: &mut DocBuilder, portfolio: &Portfolio, theme: &Theme) {
    doc.region(RegionId::Skills, "Skills", theme);
    for (i, category) in portfolio.skills.iter().enumerate() {
        if i > 0 {
            doc.blank(1);
        }
        doc.begin_block(BlockId::new(RegionId::Skills, i));
        doc.line(Line::from(vec![
            Span::styled(format!("{} ", category.icon.glyph()), theme.tag),
            Span::styled(category.title.clone(), theme.name),
        ]));
        let name_width = category.skills.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);
        for skill in &category.skills {
            let (filled, empty) = level_bar(skill.level);
            doc.line(Line::from(vec![
                Span::styled(format!("  {:<name_width$}  ", skill.name), theme.body),
                Span::styled(filled, theme.bar_filled),
                Span::styled(empty, theme.bar_empty),
                Span::styled(format!(" {:>3}%", skill.level), theme.muted),
            ]));
        }
        doc.end_block();
    }
}

fn projects(doc: &mut DocBuilder, portfolio: &Portfolio, theme: &Theme) {
    doc.region(RegionId::Projects, "Projects", theme);
    for (i, project) in portfolio.projects_by_feature().into_iter().enumerate() {
        if i > 0 {
            doc.blank(1);
        }
        doc.begin_block(BlockId::new(RegionId::Projects, i));
        let mut title = vec![
            Span::styled(format!("{} ", project.icon.glyph()), theme.tag),
            Span::styled(project.title.clone(), theme.name),
        ];
        if project.featured {
            title.push(Span::styled("  ★ featured", theme.tag));
        }
        doc.line(Line::from(title));
        doc.wrapped(&project.description, theme.body, 2);
        if !project.tech.is_empty() {
            doc.wrapped(&project.tech.join(" · "), theme.tag, 2);
        }
        for (label, url) in [("code", &project.repo_url), ("live", &project.live_url)] {
            if let Some(url) = url {
                doc.line(Line::from(vec![
                    Span::styled(format!("  {label}: "), theme.muted),
                    Span::styled(url.clone(), theme.link),
                ]));
            }
        }
        doc.end_block();
    }
}

fn content(doc: &mut DocBuilder, portfolio: &Portfolio, theme: &Theme) {
    doc.region(RegionId::Content, "Content", theme);
    for (i, platform) in portfolio.platforms.iter().enumerate() {
        if i > 0 {
            doc.blank(1);
        }
        doc.begin_block(BlockId::new(RegionId::Content, i));
        let mut title = vec![
            Span::styled(format!("{} ", platform.icon.glyph()), theme.tag),
            Span::styled(platform.name.clone(), theme.name),
        ];
        if let Some(stat) = &platform.stat {
            title.push(Span::styled(format!("  {stat}"), theme.muted));
        }
        doc.line(Line::from(title));
        doc.wrapped(&platform.description, theme.body, 2);
        doc.line(Line::from(vec![Span::raw("  "), Span::styled(platform.url.clone(), theme.link)]));
        doc.end_block();
    }
}

fn contact(doc: &mut DocBuilder, portfolio: &Portfolio, theme: &Theme, viewport_height: u16) {
    doc.region(RegionId::Contact, "Contact", theme);
    let top = doc.regions.top(RegionId::Contact).unwrap_or(doc.row());
    doc.begin_block(BlockId::new(RegionId::Contact, 0));
    doc.wrapped(
        "Have a project in mind or just want to say hi? My inbox is always open.",
        theme.body,
        0,
    );
    doc.blank(1);
    let label_width = portfolio.contacts.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
    for link in &portfolio.contacts {
        let mut spans = vec![
            Span::styled(format!("{:>3} ", link.icon.glyph()), theme.tag),
            Span::styled(format!("{:<label_width$}  ", link.label), theme.muted),
            Span::styled(link.value.clone(), theme.body),
        ];
        if let Some(url) = link.url.as_ref().filter(|url| !url.starts_with("mailto:")) {
            spans.push(Span::styled(format!("  {url}"), theme.link));
        }
        doc.line(Line::from(spans));
    }
    doc.blank(1);
    doc.buttons(&[("Copy email", Action::CopyEmail)], theme);
    doc.end_block();
    doc.blank(2);
    // with the footer, the last region must be tall enough to scroll up under the header
    let min_height = viewport_height.saturating_sub(HEADER_ROWS + FOOTER_ROWS);
    let used = doc.row().saturating_sub(top);
    if used < min_height {
        doc.blank((min_height - used) as usize);
    }
}

fn footer(doc: &mut DocBuilder, portfolio: &Portfolio, theme: &Theme, year: i32) {
    let rule = "─".repeat(doc.width as usize);
    doc.line(Line::styled(rule, theme.footer));
    let y = doc.row();
    let mut spans = Vec::new();
    let mut x = doc.x;
    for id in RegionId::ALL {
        let label = id.label();
        let w = label.chars().count() as u16;
        doc.hotspots.push(Hotspot { area: Rect::new(x, y, w, 1), action: Action::Navigate(id) });
        spans.push(Span::styled(label, theme.link));
        spans.push(Span::raw("   "));
        x += w + 3;
    }
    doc.line(Line::from(spans));
    doc.line(Line::styled(format!("© {year} {}. All rights reserved.", portfolio.profile.name), theme.footer));
    doc.blank(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_PORTFOLIO;

    fn layout(width: u16) -> DocumentLayout {
        DocumentLayout::build(&DEFAULT_PORTFOLIO, &Theme::default(), width, 30, 2026)
    }

    #[test]
    fn wrap_respects_width() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert!(wrap("the quick brown fox jumps", 7).iter().all(|l| l.chars().count() <= 7));
    }

    #[test]
    fn every_region_is_laid_out_in_order() {
        let doc = layout(100);
        let tops: Vec<u16> = RegionId::ALL.iter().map(|id| doc.regions.top(*id).unwrap()).collect();
        assert!(tops.windows(2).all(|w| w[0] < w[1]), "{tops:?}");
    }

    #[test]
    fn oversized_content_pins_to_the_last_row() {
        let mut portfolio = DEFAULT_PORTFOLIO.clone();
        portfolio.profile.bio = vec!["x".to_string(); 40_000];
        let doc = DocumentLayout::build(&portfolio, &Theme::default(), 80, 30, 2026);

        assert_eq!(doc.height(), u16::MAX);
        let tops: Vec<u16> = RegionId::ALL.iter().map(|id| doc.regions.top(*id).unwrap()).collect();
        assert!(tops.windows(2).all(|w| w[0] <= w[1]), "{tops:?}");
        assert_eq!(doc.regions.top(RegionId::Contact), Some(u16::MAX));
    }

    #[test]
    fn hero_fills_first_screen() {
        let doc = layout(100);
        assert!(doc.regions.top(RegionId::About).unwrap() >= 30);
    }

    #[test]
    fn last_region_can_reach_the_header() {
        let doc = layout(100);
        let contact = doc.regions.top(RegionId::Contact).unwrap();
        assert!(doc.height() >= contact - HEADER_ROWS + 30);
    }

    #[test]
    fn blocks_sit_inside_their_region() {
        let doc = layout(80);
        for (id, rect) in &doc.blocks {
            let top = doc.regions.top(id.region).unwrap();
            assert!(rect.y > top, "{id:?} starts above its region");
            assert!(rect.height > 0);
            let rows = &doc.rows[rect.y as usize..(rect.y + rect.height) as usize];
            assert!(rows.iter().all(|r| r.block == Some(*id)));
        }
    }

    #[test]
    fn hero_buttons_are_clickable() {
        let doc = layout(100);
        let button = doc
            .hotspots
            .iter()
            .find(|h| h.action == Action::Navigate(RegionId::Projects))
            .unwrap();
        let at = Position::new(button.area.x + 1, button.area.y);
        assert_eq!(doc.hotspot_at(at), Some(Action::Navigate(RegionId::Projects)));
        assert_eq!(doc.hotspot_at(Position::new(0, 0)), None);
    }

    #[test]
    fn narrow_terminals_still_lay_out() {
        let doc = layout(12);
        assert!(doc.height() > 0);
        assert!(doc.column.width >= 10);
    }
}
