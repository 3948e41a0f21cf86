//! Fretboard grid rendering.
//!
//! Draws one row per string with a fixed-width cell per fret. Active cells
//! show their label on a background coloured by glow category; the grid
//! scrolls horizontally when it is wider than the panel.

use crate::app::App;
use crate::fretboard::{Cell, GlowCategory, Grid, GridGeometry};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Width of one fret column: the cell body plus the fret wire after it.
pub const CELL_WIDTH: u16 = 5;

/// Width of the cell body, where the note marker is drawn.
const BODY_WIDTH: usize = CELL_WIDTH as usize - 1;

/// Regions measured while drawing the fretboard panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardLayout {
    /// The visible part of the fret cells.
    pub grid: Rect,
    pub geometry: GridGeometry,
}

/// Highlight colour for each glow category.
pub fn glow_color(glow: GlowCategory) -> Color {
    match glow {
        GlowCategory::Root => Color::Red,
        GlowCategory::Third => Color::Yellow,
        GlowCategory::Fifth => Color::Green,
        GlowCategory::Seventh => Color::Magenta,
        GlowCategory::Extension => Color::Cyan,
        GlowCategory::Other => Color::Blue,
    }
}

/// Centres `text` in `width` columns, filling the sides with `fill`.
/// Text longer than `width` is cut.
fn center_in(text: &str, width: usize, fill: char) -> String {
    let text: String = text.chars().take(width).collect();
    let len = text.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat(fill).take(left));
    out.push_str(&text);
    out.extend(std::iter::repeat(fill).take(right));
    out
}

/// Builds the segments for one cell: the body and the fret wire.
fn cell_segments(cell: &Cell) -> [(String, Style); 2] {
    let string_style = Style::default().fg(Color::Gray);
    let wire_style = Style::default().fg(Color::DarkGray);

    let body = if cell.is_active {
        let mut style = Style::default()
            .fg(Color::Black)
            .bg(glow_color(cell.glow));
        if cell.is_root {
            style = style.add_modifier(Modifier::BOLD);
        }
        (center_in(&cell.display_text, BODY_WIDTH, ' '), style)
    } else {
        ("\u{2500}".repeat(BODY_WIDTH), string_style)
    };

    // The open-string column ends at the nut
    let wire = if cell.is_open { "\u{2551}" } else { "\u{2502}" };
    [body, (wire.to_string(), wire_style)]
}

/// Keeps the characters of `segments` in `[skip, skip + width)`.
///
/// Segments are laid end to end; partially visible segments are cut so the
/// output lines up with a horizontally scrolled viewport.
pub fn clip_segments(segments: &[(String, Style)], skip: usize, width: usize) -> Vec<Span<'static>> {
    let end = skip + width;
    let mut spans = Vec::new();
    let mut col = 0usize;

    for (text, style) in segments {
        let len = text.chars().count();
        let seg_start = col;
        let seg_end = col + len;
        col = seg_end;

        if seg_end <= skip {
            continue;
        }
        if seg_start >= end {
            break;
        }
        let from = skip.saturating_sub(seg_start);
        let to = len.min(end - seg_start);
        let visible: String = text.chars().skip(from).take(to - from).collect();
        spans.push(Span::styled(visible, *style));
    }

    spans
}

/// Builds the title suffix showing which sides have scrolled-off columns.
fn build_scroll_indicator(scroll_x: u32, geometry: &GridGeometry) -> String {
    let left = scroll_x > 0;
    let right = scroll_x < geometry.max_scroll();
    match (left, right) {
        (false, false) => String::new(),
        (true, false) => "[<]".to_string(),
        (false, true) => "[>]".to_string(),
        (true, true) => "[<>]".to_string(),
    }
}

/// Renders the fretboard panel.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `area` - The area to render in
/// * `app` - Application state
///
/// # Returns
///
/// The measured grid region and column geometry for hit testing and
/// scroll resolution
pub fn render_fretboard(frame: &mut Frame, area: Rect, app: &App) -> BoardLayout {
    let fretboard = &app.fretboard;
    let options = &fretboard.options;
    let grid: Grid = fretboard.grid();

    let label_width = (0..fretboard.string_count())
        .map(|s| fretboard.string_name(s).chars().count())
        .max()
        .unwrap_or(0)
        .max(1) as u16
        + 1;

    // Geometry is known before drawing; the title needs it for indicators
    let viewport_width = area.width.saturating_sub(2 + label_width);
    let geometry = GridGeometry {
        start_fret: options.start_fret,
        column_count: grid.column_count() as u32,
        cell_width: CELL_WIDTH as u32,
        viewport_width: viewport_width as u32,
    };
    let scroll_x = app.scroll_x.min(geometry.max_scroll());

    let root = match options.root() {
        Some(root) => format!(", root {}", root),
        None => String::new(),
    };
    let title = format!(
        " Fretboard - {}{} (frets {}-{}) {}",
        options.display_mode.name(),
        root,
        options.start_fret,
        options.last_fret(),
        build_scroll_indicator(scroll_x, &geometry)
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid_area = Rect {
        x: inner.x + label_width,
        y: inner.y,
        width: viewport_width,
        height: (grid.string_count() as u16).min(inner.height),
    };
    let layout = BoardLayout {
        grid: grid_area,
        geometry,
    };

    if inner.width <= label_width || inner.height == 0 {
        return layout;
    }

    let label_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let skip = scroll_x as usize;
    let width = viewport_width as usize;

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(grid.string_count() + 1);
    for (string_index, row) in grid.rows().enumerate() {
        let name = fretboard.string_name(string_index);
        let mut spans = vec![Span::styled(
            format!("{:<width$}", name, width = label_width as usize),
            label_style,
        )];
        let segments: Vec<(String, Style)> = row.iter().flat_map(cell_segments).collect();
        spans.extend(clip_segments(&segments, skip, width));
        lines.push(Line::from(spans));
    }

    if options.show_fret_numbers {
        let number_style = Style::default().fg(Color::DarkGray);
        let segments: Vec<(String, Style)> = grid
            .frets()
            .map(|fret| {
                (
                    format!("{} ", center_in(&fret.to_string(), BODY_WIDTH, ' ')),
                    number_style,
                )
            })
            .collect();
        let mut spans = vec![Span::raw(" ".repeat(label_width as usize))];
        spans.extend(clip_segments(&segments, skip, width));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_center_in() {
        assert_eq!(center_in("C", 4, ' '), " C  ");
        assert_eq!(center_in("C#", 4, ' '), " C# ");
        assert_eq!(center_in("\u{266D}3", 4, '-'), "-\u{266D}3-");
        assert_eq!(center_in("toolong", 4, ' '), "tool");
        assert_eq!(center_in("", 2, '.'), "..");
    }

    #[test]
    fn test_clip_segments() {
        let style = Style::default();
        let segments = vec![
            ("abcd".to_string(), style),
            ("|".to_string(), style),
            ("efgh".to_string(), style),
            ("|".to_string(), style),
        ];
        assert_eq!(text_of(&clip_segments(&segments, 0, 10)), "abcd|efgh|");
        assert_eq!(text_of(&clip_segments(&segments, 2, 5)), "cd|ef");
        assert_eq!(text_of(&clip_segments(&segments, 5, 2)), "ef");
        assert_eq!(text_of(&clip_segments(&segments, 9, 5)), "|");
        assert!(clip_segments(&segments, 20, 5).is_empty());
        assert!(clip_segments(&segments, 0, 0).is_empty());
    }

    #[test]
    fn test_scroll_indicator() {
        let geometry = GridGeometry {
            start_fret: 0,
            column_count: 13,
            cell_width: CELL_WIDTH as u32,
            viewport_width: 30,
        };
        assert_eq!(build_scroll_indicator(0, &geometry), "[>]");
        assert_eq!(build_scroll_indicator(10, &geometry), "[<>]");
        assert_eq!(build_scroll_indicator(geometry.max_scroll(), &geometry), "[<]");
        let wide = GridGeometry {
            viewport_width: 200,
            ..geometry
        };
        assert_eq!(build_scroll_indicator(0, &wide), "");
    }

    #[test]
    fn test_glow_colors_are_distinct() {
        let glows = [
            GlowCategory::Root,
            GlowCategory::Third,
            GlowCategory::Fifth,
            GlowCategory::Seventh,
            GlowCategory::Extension,
            GlowCategory::Other,
        ];
        for (i, a) in glows.iter().enumerate() {
            for b in &glows[i + 1..] {
                assert_ne!(glow_color(*a), glow_color(*b));
            }
        }
    }
}
