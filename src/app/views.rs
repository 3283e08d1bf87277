//! View rendering functions

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::App;
use super::state::{ViewMode, busy_caption};
use crate::browser::TOKEN_URL;
use crate::ui::{
    BranchListWidget, HelpWidget, SPINNER_FRAMES, StatusWidget, TokenInputWidget, centered,
};
use crate::workflow::WorkflowState;

const ISSUES_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/issues");

impl App {
    /// Render the screen for the current workflow state
    pub(super) fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(5),    // State view
                Constraint::Length(1), // Keybindings hint
            ])
            .split(area);

        frame.render_widget(StatusWidget::new(&self.status, &self.theme), chunks[0]);

        let state = self.workflow.state();
        match state {
            WorkflowState::CheckingRepository
            | WorkflowState::CheckingCredential
            | WorkflowState::SavingCredential
            | WorkflowState::LoadingBranches
            | WorkflowState::BranchSelected => self.render_busy(frame, chunks[1], state),
            WorkflowState::CreatingCredential => self.render_message(
                frame,
                chunks[1],
                " Access Token ",
                vec![
                    "This CLI requires a personal access token for your GitHub account."
                        .to_string(),
                    "It is used to list the pull requests you opened in this repository."
                        .to_string(),
                    String::new(),
                    "Press Enter to create it.".to_string(),
                ],
            ),
            WorkflowState::InvalidCredential => self.render_message(
                frame,
                chunks[1],
                " Access Token ",
                vec![
                    "Your personal access token is either revoked, expired or invalid."
                        .to_string(),
                    String::new(),
                    "Press Enter to create a new one.".to_string(),
                ],
            ),
            WorkflowState::AskingCredential => self.render_token_prompt(frame, chunks[1]),
            WorkflowState::ListingBranches => {
                frame.render_stateful_widget(
                    BranchListWidget::new(" Your branches ", &self.theme),
                    chunks[1],
                    &mut self.branch_list_state,
                );
            }
            WorkflowState::MissingRepository => {
                let lines = vec![Line::styled(
                    "✗ This directory is not a git repository",
                    Style::default()
                        .fg(self.theme.error)
                        .add_modifier(Modifier::BOLD),
                )];
                frame.render_widget(
                    Paragraph::new(lines).alignment(Alignment::Center),
                    vertical_center(chunks[1], 1),
                );
            }
            WorkflowState::Crashed => {
                let error = self
                    .workflow
                    .context()
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown error".to_string());
                self.render_error(frame, area, &error);
            }
        }

        self.render_hint(frame, chunks[2], state);

        if self.view_mode == ViewMode::Help {
            frame.render_widget(HelpWidget::new(&self.theme), area);
        }
    }

    fn render_busy(&self, frame: &mut Frame, area: Rect, state: WorkflowState) {
        let spinner = SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()];
        let selected = self.workflow.context().selected_branch.as_deref();

        let line = Line::from(vec![
            Span::styled(spinner, Style::default().fg(self.theme.primary)),
            Span::raw(" "),
            Span::styled(
                busy_caption(state, selected),
                Style::default().fg(self.theme.fg),
            ),
        ]);

        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center),
            vertical_center(area, 1),
        );
    }

    /// A bordered block of explanatory text with the token page URL below it
    fn render_message(&self, frame: &mut Frame, area: Rect, title: &str, text: Vec<String>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.warning))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            ));

        let mut lines: Vec<Line> = vec![Line::raw("")];
        lines.extend(
            text.into_iter()
                .map(|l| Line::styled(l, Style::default().fg(self.theme.fg))),
        );
        lines.push(Line::raw(""));
        lines.push(Line::styled(TOKEN_URL, Style::default().fg(self.theme.muted)));

        if let Some(notice) = &self.status.last_notice {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                notice.as_str(),
                Style::default().fg(self.theme.warning),
            ));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false }),
            area,
        );
    }

    fn render_token_prompt(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Instructions
                Constraint::Length(3), // Input
                Constraint::Min(0),
            ])
            .split(area);

        let instructions = vec![
            Line::raw(""),
            Line::styled(
                "Paste your personal access token and press Enter",
                Style::default().fg(self.theme.fg),
            ),
            Line::styled(TOKEN_URL, Style::default().fg(self.theme.muted)),
        ];
        frame.render_widget(
            Paragraph::new(instructions).alignment(Alignment::Center),
            chunks[0],
        );

        let input_area = centered(chunks[1], 60, 3);
        let input_area = Rect {
            y: chunks[1].y,
            height: chunks[1].height,
            ..input_area
        };
        frame.render_widget(TokenInputWidget::new(&self.token_input, &self.theme), input_area);
    }

    /// Render error view
    fn render_error(&self, frame: &mut Frame, area: Rect, error_msg: &str) {
        let popup_area = centered(area, 60, 15);

        // Clear background
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error))
            .title(Span::styled(
                " ⚠ Error ",
                Style::default()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = vec![Line::raw("")];
        for line in error_msg.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(self.theme.fg),
            )));
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "If this keeps happening, please report it at",
            Style::default().fg(self.theme.muted),
        ));
        lines.push(Line::styled(ISSUES_URL, Style::default().fg(self.theme.secondary)));

        frame.render_widget(block, popup_area);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn render_hint(&self, frame: &mut Frame, area: Rect, state: WorkflowState) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(self.theme.primary));
        let label = |l: &'static str| Span::styled(l, Style::default().fg(self.theme.muted));

        let hint = match state {
            WorkflowState::CreatingCredential | WorkflowState::InvalidCredential => {
                vec![key(" Enter"), label(" create token "), key("q"), label(" quit")]
            }
            WorkflowState::AskingCredential => {
                vec![key(" Enter"), label(" submit "), key("Esc"), label(" quit")]
            }
            WorkflowState::ListingBranches => vec![
                key(" ↑/↓"),
                label(" nav "),
                key("Enter"),
                label(" checkout "),
                key("?"),
                label(" help "),
                key("q"),
                label(" quit"),
            ],
            WorkflowState::MissingRepository | WorkflowState::Crashed => {
                vec![key(" r"), label(" retry "), key("q"), label(" quit")]
            }
            _ => vec![key(" q"), label(" quit")],
        };

        frame.render_widget(Paragraph::new(Line::from(hint)), area);
    }
}

/// A `height`-row strip in the vertical middle of `area`
fn vertical_center(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_center() {
        let area = Rect::new(0, 3, 80, 11);
        assert_eq!(vertical_center(area, 1), Rect::new(0, 8, 80, 1));
        assert_eq!(vertical_center(Rect::new(0, 0, 80, 0), 1).height, 0);
    }
}
