//! Help overlay rendering.
//!
//! Lists keyboard and mouse controls in a scrollable modal.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

/// Key binding entry for the help display.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
}

const GENERAL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "?",
        description: "Toggle this help",
    },
    KeyBinding {
        key: "q / Esc",
        description: "Quit",
    },
    KeyBinding {
        key: "Ctrl+C",
        description: "Force quit",
    },
];

const DISPLAY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "m",
        description: "Toggle note names / intervals",
    },
    KeyBinding {
        key: "r / R",
        description: "Next / previous root note",
    },
    KeyBinding {
        key: "n",
        description: "Toggle fret numbers",
    },
    KeyBinding {
        key: "[ / ]",
        description: "Lower / raise the first fret shown",
    },
    KeyBinding {
        key: "{ / }",
        description: "Lower / raise the last fret shown",
    },
];

const SCROLL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "h / Left",
        description: "Centre the previous fret",
    },
    KeyBinding {
        key: "l / Right",
        description: "Centre the next fret",
    },
    KeyBinding {
        key: "Home / End",
        description: "Centre the first / last fret",
    },
];

const MOUSE_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "Left click",
        description: "Select a placed note",
    },
    KeyBinding {
        key: "Wheel",
        description: "Scroll the fretboard sideways",
    },
];

fn add_section(
    lines: &mut Vec<Line<'static>>,
    title: &'static str,
    bindings: &[KeyBinding],
    section_style: Style,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(Span::styled(title, section_style)));
    for binding in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("{:15}", binding.key), key_style),
            Span::styled(binding.description, desc_style),
        ]));
    }
    lines.push(Line::from(""));
}

/// Renders the help overlay.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `scroll` - Vertical scroll offset
pub fn render_help(frame: &mut Frame, scroll: u16) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for (title, bindings) in [
        ("General", GENERAL_BINDINGS),
        ("Display", DISPLAY_BINDINGS),
        ("Scrolling", SCROLL_BINDINGS),
        ("Mouse", MOUSE_BINDINGS),
    ] {
        add_section(
            &mut lines,
            title,
            bindings,
            section_style,
            key_style,
            desc_style,
        );
    }

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Scroll: Up/Down/j/k  |  Close: ?/Esc/Click",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(footer, chunks[1]);
}
