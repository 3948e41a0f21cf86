//! fretui - An interactive fretboard diagram in the terminal.
//!
//! Shows a stringed-instrument fretboard with placed notes labelled by name
//! or by interval from a root note. Click a placed note to inspect it, and
//! move the scroll fret to centre any part of the neck.
//!
//! # Usage
//!
//! ```bash
//! cargo run                                 # Built-in demo (C major chord)
//! cargo run -- chord.json                   # Load a fretboard description
//! cargo run -- chord.json --intervals --root A
//! ```
//!
//! Press `?` for help with keyboard shortcuts.

use fretui::config::{parse_fret, ConfigOverrides, FretboardConfig};
use fretui::fretboard::DisplayMode;
use fretui::{ui, App};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Command-line options for the application.
struct CliOptions {
    /// Fretboard description to load instead of the demo.
    config_path: Option<PathBuf>,
    /// Option values that override the description.
    overrides: ConfigOverrides,
}

impl CliOptions {
    /// Parses command-line arguments.
    ///
    /// Supports:
    /// - `<path>`: Load a fretboard description (JSON)
    /// - `--intervals` / `--notes`: Label placed notes by interval or name
    /// - `--root <note>`: Root note for intervals and root highlighting
    /// - `--start-fret <n>` / `--max-frets <n>`: Fret window
    /// - `--scroll-to <n>`: Fret to centre on startup
    /// - `--no-fret-numbers`: Hide the fret number row
    /// - `--help` or `-h`: Print help and exit
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut config_path = None;
        let mut overrides = ConfigOverrides::default();
        let mut i = 1;

        // Returns the value following a flag
        fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
            *i += 1;
            args.get(*i)
                .map(String::as_str)
                .with_context(|| format!("{} requires a value", flag))
        }

        while i < args.len() {
            match args[i].as_str() {
                "--intervals" | "-i" => overrides.display_mode = Some(DisplayMode::Intervals),
                "--notes" => overrides.display_mode = Some(DisplayMode::Notes),
                "--root" | "-r" => {
                    overrides.root_note = Some(value(&args, &mut i, "--root")?.to_string());
                }
                "--start-fret" => {
                    overrides.start_fret =
                        Some(parse_fret("--start-fret", value(&args, &mut i, "--start-fret")?)?);
                }
                "--max-frets" => {
                    overrides.max_frets =
                        Some(parse_fret("--max-frets", value(&args, &mut i, "--max-frets")?)?);
                }
                "--scroll-to" => {
                    overrides.scroll_to_fret =
                        Some(parse_fret("--scroll-to", value(&args, &mut i, "--scroll-to")?)?);
                }
                "--no-fret-numbers" => overrides.hide_fret_numbers = true,
                "--help" | "-h" => {
                    eprintln!("fretui - Terminal fretboard diagram");
                    eprintln!();
                    eprintln!(
                        "Usage: {} [OPTIONS] [FRETBOARD.json]",
                        args.first().map(String::as_str).unwrap_or("fretui")
                    );
                    eprintln!();
                    eprintln!("Options:");
                    eprintln!("  -i, --intervals        Label notes by interval from the root");
                    eprintln!("      --notes            Label notes by name");
                    eprintln!("  -r, --root NOTE        Root note (e.g. C, F#, Bb)");
                    eprintln!("      --start-fret N     First fret shown");
                    eprintln!("      --max-frets N      Last fret shown");
                    eprintln!("      --scroll-to N      Fret to centre on startup");
                    eprintln!("      --no-fret-numbers  Hide the fret number row");
                    eprintln!("  -h, --help             Print this help message");
                    eprintln!();
                    eprintln!("Without a file, a C major chord in standard tuning is shown.");
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    eprintln!("Unknown option: {}", other);
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
                path => config_path = Some(PathBuf::from(path)),
            }
            i += 1;
        }

        Ok(Self {
            config_path,
            overrides,
        })
    }
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = CliOptions::parse()?;

    // Initialize logging (optional, for debugging)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config_path {
        Some(path) => FretboardConfig::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => FretboardConfig::demo(),
    };
    cli.overrides.apply(&mut config.options);

    let mut app = App::new(config.into_fretboard());

    let mut terminal = setup_terminal().context("Failed to setup terminal")?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    result
}

/// Sets up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.clear_expired_status();
        app.update_scroll_animation(Instant::now());
        app.observe_scroll_request();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Layout for this frame is committed; a pending scroll can now be measured
        app.after_layout(Instant::now());

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.show_help {
                        handle_help_key(app, key.code);
                        continue;
                    }
                    if handle_key(app, key.code, key.modifiers) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Handles keys while the help overlay is visible.
fn handle_help_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        _ => {}
    }
}

/// Handles mouse events.
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    if app.show_help {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            app.show_help = false;
            app.help_scroll = 0;
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.handle_mouse_click(x, y);
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            app.handle_mouse_scroll(x, y, -1);
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            app.handle_mouse_scroll(x, y, 1);
        }
        _ => {}
    }
}

/// Handles a key press event.
///
/// # Returns
///
/// `true` if the application should quit
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('m') => app.toggle_display_mode(),
        KeyCode::Char('r') => app.cycle_root_note(1),
        KeyCode::Char('R') => app.cycle_root_note(-1),
        KeyCode::Char('n') => app.toggle_fret_numbers(),
        KeyCode::Char('[') => app.adjust_start_fret(-1),
        KeyCode::Char(']') => app.adjust_start_fret(1),
        KeyCode::Char('{') => app.adjust_max_frets(-1),
        KeyCode::Char('}') => app.adjust_max_frets(1),
        KeyCode::Left | KeyCode::Char('h') => app.move_scroll_fret(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_scroll_fret(1),
        KeyCode::Home => app.move_scroll_fret(i32::MIN),
        KeyCode::End => app.move_scroll_fret(i32::MAX),
        _ => {}
    }
    false
}
