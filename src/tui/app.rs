//! Application state and event loop

use std::time::Duration;

use activity_heatmap::ActivityHeatmap;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};
use tracing::info;

use super::theme::Theme;
use super::widgets::{heatmap::HeatmapView, help::HelpPopup, legend::Legend};

/// Main application
pub struct App {
    heatmap: ActivityHeatmap,
    theme: Theme,
    /// Day index of the selected cell
    selected: usize,
    show_help: bool,
    should_quit: bool,
}

impl App {
    /// Start with today (the last day) selected
    pub fn new(heatmap: ActivityHeatmap, theme: Theme) -> Self {
        let selected = heatmap.day_count().saturating_sub(1);
        Self {
            heatmap,
            theme,
            selected,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn heatmap(&self) -> &ActivityHeatmap {
        &self.heatmap
    }

    pub fn into_heatmap(self) -> ActivityHeatmap {
        self.heatmap
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.heatmap.calendar().window().date_at(self.selected)
    }

    /// Move the selection by `delta` days, clamped to the window
    pub fn move_selection(&mut self, delta: isize) {
        let last = self.heatmap.day_count().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(date) = self.selected_date() {
            self.heatmap.toggle(date);
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-7),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(7),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('t') => self.selected = self.heatmap.day_count().saturating_sub(1),
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn status_line(&self) -> Line<'_> {
        let Some(date) = self.selected_date() else {
            return Line::default();
        };
        let active = self.heatmap.calendar().is_active(date);
        let state = if active {
            Span::styled(
                "active",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("inactive", Style::default().fg(self.theme.muted()))
        };

        Line::from(vec![
            Span::styled(
                date.format("%Y-%m-%d (%a)").to_string(),
                Style::default().fg(self.theme.date()),
            ),
            Span::styled("  ", Style::default()),
            state,
            Span::styled(
                format!(
                    "  |  {} of {} days active  |  ? for help",
                    self.heatmap.calendar().active_count(),
                    self.heatmap.day_count()
                ),
                Style::default().fg(self.theme.muted()),
            ),
        ])
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([
            Constraint::Length(1),                  // [0] Title
            Constraint::Length(1),                  // [1] Padding
            Constraint::Length(HeatmapView::HEIGHT), // [2] Heatmap
            Constraint::Length(1),                  // [3] Legend
            Constraint::Length(1),                  // [4] Padding
            Constraint::Length(1),                  // [5] Status
            Constraint::Min(0),                     // Remaining
        ])
        .split(area);

        let title = format!(
            " Activity {} to {}",
            self.heatmap.range_start(),
            self.heatmap.range_end()
        );
        buf.set_string(
            chunks[0].x,
            chunks[0].y,
            title,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );

        if area.width < HeatmapView::min_width() {
            let message = format!(
                "Terminal too narrow: need {} columns",
                HeatmapView::min_width()
            );
            buf.set_string(
                chunks[2].x,
                chunks[2].y,
                message,
                Style::default().fg(self.theme.muted()),
            );
        } else {
            HeatmapView::new(&self.heatmap, self.theme)
                .selected(Some(self.selected))
                .render(chunks[2], buf);
            Legend::new(self.heatmap.style(), self.theme).render(chunks[3], buf);
        }

        Paragraph::new(self.status_line()).render(chunks[5], buf);

        if self.show_help {
            HelpPopup::new(self.theme).render(HelpPopup::centered_area(area), buf);
        }
    }
}

/// Run the TUI application; returns the heatmap with the user's edits
pub fn run(heatmap: ActivityHeatmap, theme: Theme) -> anyhow::Result<ActivityHeatmap> {
    let mut terminal = ratatui::init();
    let mut app = App::new(heatmap, theme);
    let result = run_app(&mut terminal, &mut app);
    ratatui::restore();
    result?;

    info!(
        active = app.heatmap().calendar().active_count(),
        "tui closed"
    );
    Ok(app.into_heatmap())
}

fn run_app(terminal: &mut DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        if event::poll(Duration::from_millis(250))? {
            app.handle_event(event::read()?);
        }
    }
    Ok(())
}
