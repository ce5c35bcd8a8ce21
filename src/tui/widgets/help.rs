//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the help popup
const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 15;

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let title = format!(" activity-heatmap v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Calendar header
            Constraint::Length(1), // [2] Separator
            Constraint::Length(1), // [3] Left/Right
            Constraint::Length(1), // [4] Up/Down
            Constraint::Length(1), // [5] Space
            Constraint::Length(1), // [6] t
            Constraint::Length(1), // [7] Padding
            Constraint::Length(1), // [8] General header
            Constraint::Length(1), // [9] Separator
            Constraint::Length(1), // [10] q/Esc
            Constraint::Length(1), // [11] ?
            Constraint::Min(0),    // Remaining
        ])
        .split(inner);

        let sep = "─".repeat(inner.width as usize);
        let header_style = Style::default()
            .fg(self.theme.date())
            .add_modifier(Modifier::BOLD);

        Paragraph::new(Line::from(Span::styled("Calendar", header_style))).render(chunks[1], buf);
        buf.set_string(
            chunks[2].x,
            chunks[2].y,
            &sep,
            Style::default().fg(self.theme.muted()),
        );

        render_keybinding(chunks[3], buf, "Left/Right or h/l", "Previous/next week", self.theme);
        render_keybinding(chunks[4], buf, "Up/Down or k/j", "Previous/next day", self.theme);
        render_keybinding(chunks[5], buf, "Space / Enter", "Toggle day", self.theme);
        render_keybinding(chunks[6], buf, "t", "Jump to today", self.theme);

        Paragraph::new(Line::from(Span::styled("General", header_style))).render(chunks[8], buf);
        buf.set_string(
            chunks[9].x,
            chunks[9].y,
            &sep,
            Style::default().fg(self.theme.muted()),
        );

        render_keybinding(chunks[10], buf, "q / Esc", "Quit", self.theme);
        render_keybinding(chunks[11], buf, "?", "Toggle help", self.theme);
    }
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {:<20}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc, Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}
