//! Masked single-line input for the access token

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::Theme;

const PLACEHOLDER: &str = "ghp_12kxo8ak9...";

/// Text typed or pasted so far
#[derive(Debug, Clone, Default)]
pub struct TokenInputState {
    value: String,
}

impl TokenInputState {
    /// Append typed or pasted text, dropping whitespace and control characters
    pub fn insert(&mut self, text: &str) {
        self.value
            .extend(text.chars().filter(|c| !c.is_whitespace() && !c.is_control()));
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Take the entered token, leaving the input empty
    pub fn take(&mut self) -> Option<String> {
        if self.value.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.value))
        }
    }

    /// What to show on screen: the first four characters, the rest masked
    pub fn masked(&self) -> String {
        self.value
            .chars()
            .enumerate()
            .map(|(i, c)| if i < 4 { c } else { '•' })
            .collect()
    }
}

/// Renders a [`TokenInputState`]
pub struct TokenInputWidget<'a> {
    state: &'a TokenInputState,
    theme: &'a Theme,
}

impl<'a> TokenInputWidget<'a> {
    pub fn new(state: &'a TokenInputState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for TokenInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content = if self.state.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(self.theme.muted))
        } else {
            Span::styled(
                self.state.masked(),
                Style::default().fg(self.theme.fg).add_modifier(Modifier::BOLD),
            )
        };

        let line = Line::from(vec![
            Span::styled("› ", Style::default().fg(self.theme.primary)),
            content,
            Span::styled("█", Style::default().fg(self.theme.primary)),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.primary));

        Paragraph::new(line).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_strips_whitespace() {
        let mut input = TokenInputState::default();
        input.insert(" ghp_abc\n");
        input.insert("def\t");
        assert_eq!(input.take().as_deref(), Some("ghp_abcdef"));
        assert!(input.is_empty());
    }

    #[test]
    fn test_take_empty_is_none() {
        let mut input = TokenInputState::default();
        input.insert("   ");
        assert_eq!(input.take(), None);
    }

    #[test]
    fn test_masked_shows_prefix_only() {
        let mut input = TokenInputState::default();
        input.insert("ghp_secret");
        assert_eq!(input.masked(), "ghp_••••••");

        input.backspace();
        assert_eq!(input.masked(), "ghp_•••••");
    }
}
