use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub nav_item: Style,
    pub nav_active: Style,
    pub nav_focus: Style,
    pub logo: Style,
    pub heading: Style,
    pub name: Style,
    pub role: Style,
    pub body: Style,
    pub muted: Style,
    pub button: Style,
    pub tag: Style,
    pub link: Style,
    pub bar_filled: Style,
    pub bar_empty: Style,
    pub placeholder: Style,
    pub background_glyph: Style,
    pub footer: Style,
    pub notice: Style,
    pub menu_border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            nav_item: Style::default().fg(Color::Gray),
            nav_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            nav_focus: Style::default().fg(Color::Black).bg(Color::Cyan),
            logo: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            heading: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            name: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            role: Style::default().fg(Color::Magenta),
            body: Style::default().fg(Color::White),
            muted: Style::default().fg(Color::Gray),
            button: Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            tag: Style::default().fg(Color::Yellow),
            link: Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            bar_filled: Style::default().fg(Color::Green),
            bar_empty: Style::default().fg(Color::DarkGray),
            placeholder: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            background_glyph: Style::default().fg(Color::Rgb(40, 40, 60)),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            notice: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            menu_border: Style::default().fg(Color::Magenta).bg(Color::Black),
        }
    }
}
