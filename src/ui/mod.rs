//! TUI components for switch-branch

mod branch_list;
mod help;
mod status;
mod token_input;

pub use branch_list::{BranchListState, BranchListWidget};
pub use help::HelpWidget;
pub use status::{AppStatus, StatusWidget, format_relative};
pub use token_input::{TokenInputState, TokenInputWidget};

use ratatui::layout::Rect;
use ratatui::style::Color;

/// Braille spinner frames, advanced once per UI tick
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Color scheme for the application
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub highlight: Color,
    pub bg: Color,
    pub fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(138, 180, 248),    // Soft blue
            secondary: Color::Rgb(187, 154, 247),  // Lavender
            success: Color::Rgb(166, 218, 149),    // Soft green
            warning: Color::Rgb(238, 190, 111),    // Amber
            error: Color::Rgb(237, 135, 150),      // Coral red
            muted: Color::Rgb(108, 112, 134),      // Gray
            highlight: Color::Rgb(245, 224, 220),  // Cream
            bg: Color::Rgb(30, 30, 46),            // Dark base
            fg: Color::Rgb(205, 214, 244),         // Light text
        }
    }
}

/// A `width` x `height` popup centered in `area`, shrunk to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));

    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered(area, 60, 10);
        assert_eq!(popup, Rect::new(20, 15, 60, 10));
    }

    #[test]
    fn test_centered_shrinks_on_small_terminals() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered(area, 60, 10);
        assert_eq!(popup.width, 26);
        assert_eq!(popup.height, 4);
        assert!(popup.x + popup.width <= area.width);
    }
}
