//! Status bar widget

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::Theme;

/// What the status bar shows
#[derive(Debug, Clone, Default)]
pub struct AppStatus {
    /// Working directory the tool runs in
    pub location: String,
    /// Number of branches offered
    pub branch_count: usize,
    /// Last non-fatal problem (e.g., the browser didn't open)
    pub last_notice: Option<String>,
}

/// Status widget
pub struct StatusWidget<'a> {
    status: &'a AppStatus,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(status: &'a AppStatus, theme: &'a Theme) -> Self {
        Self { status, theme }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            format!("◉ {} ", self.status.location),
            Style::default().fg(self.theme.muted),
        )];

        spans.push(Span::styled(
            format!("│ Branches: {} ", self.status.branch_count),
            Style::default().fg(self.theme.secondary),
        ));

        if let Some(ref notice) = self.status.last_notice {
            spans.push(Span::styled(
                format!("│ ⚠ {} ", truncate_str(notice, 60)),
                Style::default().fg(self.theme.warning),
            ));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted))
            .title(Span::styled(
                " switch-branch ",
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}

/// "12s ago", "5m ago", "3h ago", "2d ago"
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(then);

    if duration.num_seconds() < 60 {
        format!("{}s ago", duration.num_seconds().max(0))
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 48 {
        format!("{}h ago", duration.num_hours())
    } else {
        format!("{}d ago", duration.num_days())
    }
}

fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_relative() {
        let now = Utc::now();
        assert_eq!(format_relative(now - Duration::seconds(12), now), "12s ago");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative(now - Duration::days(9), now), "9d ago");
        // Clock skew never shows a negative age
        assert_eq!(format_relative(now + Duration::seconds(30), now), "0s ago");
    }

    #[test]
    fn test_truncate_str_is_char_safe() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("ééééééé", 4), "ééé…");
    }
}
