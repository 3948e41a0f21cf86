//! Terminal user interface components.
//!
//! The view layer for the fretboard: the grid panel, a status bar, and the
//! help overlay. Rendering records the measured layout back into the app so
//! mouse hit testing and scroll resolution use the geometry actually drawn.

mod board;
mod help;

use crate::app::{App, LayoutRegions};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub use board::{clip_segments, glow_color, render_fretboard, BoardLayout, CELL_WIDTH};
pub use help::render_help;

/// Renders the status bar: the latest status message, or a hint.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some((message, _)) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::Yellow),
        )),
        None => {
            let key_style = Style::default().fg(Color::Yellow);
            let desc_style = Style::default().fg(Color::DarkGray);
            let mut spans = vec![
                Span::styled(" [", desc_style),
                Span::styled("m", key_style),
                Span::styled("]Mode [", desc_style),
                Span::styled("r", key_style),
                Span::styled("]Root [", desc_style),
                Span::styled("h/l", key_style),
                Span::styled("]Scroll [", desc_style),
                Span::styled("?", key_style),
                Span::styled("]Help [", desc_style),
                Span::styled("q", key_style),
                Span::styled("]Quit", desc_style),
            ];
            if let Some(click) = &app.last_click {
                spans.push(Span::styled(
                    format!("   Last: {} ({})", click.note, click.midi),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Calculates the panel and status bar regions for the terminal size.
///
/// The panel is sized to the grid: one row per string, an optional fret
/// number row, and borders.
fn calculate_layout(size: Rect, app: &App) -> [Rect; 2] {
    let number_rows = u16::from(app.fretboard.options.show_fret_numbers);
    let panel_height = (app.fretboard.string_count() as u16)
        .saturating_add(number_rows)
        .saturating_add(2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(panel_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    [chunks[0], chunks[2]]
}

/// Renders the complete UI and updates the app's layout regions.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [panel, status_bar] = calculate_layout(frame.area(), app);

    let board = render_fretboard(frame, panel, app);
    app.update_layout(LayoutRegions {
        fretboard: panel,
        grid: board.grid,
        geometry: board.geometry,
    });

    render_status_bar(frame, status_bar, app);

    if app.show_help {
        render_help(frame, app.help_scroll);
    }
}

/// Helper function to center a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FretboardConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_records_layout() {
        let mut app = App::new(FretboardConfig::demo().into_fretboard());
        let mut terminal = Terminal::new(TestBackend::new(50, 12)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let layout = app.layout;
        // Borders, then a two-column label ("E" plus padding)
        assert_eq!(layout.grid.x, 3);
        assert_eq!(layout.grid.y, 1);
        assert_eq!(layout.grid.height, 6);
        assert_eq!(layout.geometry.viewport_width, 50 - 2 - 2);
        assert_eq!(layout.geometry.column_count, 13);
        assert_eq!(layout.geometry.cell_width, CELL_WIDTH as u32);

        let text = buffer_text(&terminal);
        assert!(text.contains("Fretboard - Notes, root C"));
    }

    #[test]
    fn test_render_then_click_active_cell() {
        let mut app = App::new(FretboardConfig::demo().into_fretboard());
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        // String 4 (B), fret 1
        let x = app.layout.grid.x + CELL_WIDTH + 1;
        let y = app.layout.grid.y + 4;
        assert!(app.handle_mouse_click(x, y));
        assert_eq!(app.last_click.as_ref().unwrap().note, "C");
    }

    #[test]
    fn test_render_survives_reversed_range_and_tiny_terminal() {
        let mut app = App::new(FretboardConfig::demo().into_fretboard());
        app.fretboard.options.start_fret = 20;
        let mut terminal = Terminal::new(TestBackend::new(6, 3)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        assert_eq!(app.layout.geometry.column_count, 0);
        assert_eq!(app.layout.geometry.max_scroll(), 0);
    }
}
