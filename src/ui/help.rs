//! Help overlay widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::{Theme, centered};

/// Help overlay widget
pub struct HelpWidget<'a> {
    theme: &'a Theme,
}

impl<'a> HelpWidget<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn render_keybinding(&self, key: &'static str, desc: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("{:>12} ", key),
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc, Style::default().fg(self.theme.fg)),
        ])
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered(area, 50, 16);

        // Clear the area behind the popup
        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.secondary))
            .title(Span::styled(
                " Keyboard Shortcuts ",
                Style::default()
                    .fg(self.theme.secondary)
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let lines = vec![
            Line::from(Span::styled(" Navigation", Style::default().fg(self.theme.secondary).add_modifier(Modifier::BOLD))),
            self.render_keybinding("↑ / ↓", "Move through branches"),
            self.render_keybinding("k / j", "Move through branches"),
            self.render_keybinding("Home / End", "First / last branch"),
            Line::raw(""),
            Line::from(Span::styled(" Actions", Style::default().fg(self.theme.secondary).add_modifier(Modifier::BOLD))),
            self.render_keybinding("Enter", "Check out branch"),
            Line::raw(""),
            Line::from(Span::styled(" Views", Style::default().fg(self.theme.secondary).add_modifier(Modifier::BOLD))),
            self.render_keybinding("?", "Toggle this help"),
            self.render_keybinding("q / Esc", "Quit"),
        ];

        let paragraph = Paragraph::new(lines);
        paragraph.render(inner, buf);
    }
}

