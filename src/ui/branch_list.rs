//! Branch list widget

use chrono::Utc;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget},
};

use super::{Theme, format_relative};
use crate::catalog::BranchEntry;

/// Branch list widget state
pub struct BranchListState {
    pub list_state: ListState,
    pub items: Vec<BranchEntry>,
}

impl BranchListState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            items: Vec::new(),
        }
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(self.items.len() - 1));
        }
    }

    pub fn selected(&self) -> Option<&BranchEntry> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    /// Branch name of the highlighted entry
    pub fn selected_branch(&self) -> Option<String> {
        self.selected().map(|entry| entry.value.clone())
    }

    /// Replace the entries, highlighting the first one
    pub fn set_items(&mut self, items: Vec<BranchEntry>) {
        self.items = items;
        self.list_state
            .select(if self.items.is_empty() { None } else { Some(0) });
    }
}

impl Default for BranchListState {
    fn default() -> Self {
        Self::new()
    }
}

/// The branch list widget
pub struct BranchListWidget<'a> {
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> BranchListWidget<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self { title, theme }
    }
}

impl StatefulWidget for BranchListWidget<'_> {
    type State = BranchListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let now = Utc::now();

        let items: Vec<ListItem> = state
            .items
            .iter()
            .map(|entry| {
                let (indicator, indicator_style) = if entry.is_default() {
                    ("●", Style::default().fg(self.theme.success))
                } else {
                    ("○", Style::default().fg(self.theme.muted))
                };

                let label_style = if entry.is_default() {
                    Style::default()
                        .fg(self.theme.highlight)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.fg)
                };

                let updated = match entry.updated_at {
                    Some(at) => Span::styled(
                        format!("  updated {}", format_relative(at, now)),
                        Style::default().fg(self.theme.muted),
                    ),
                    None => Span::raw(""),
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", indicator), indicator_style),
                    Span::styled(&entry.label, label_style),
                    updated,
                ]))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.primary))
            .title(Span::styled(
                self.title,
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(self.theme.primary)
                    .fg(self.theme.bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        StatefulWidget::render(list, area, buf, &mut state.list_state);
    }
}
