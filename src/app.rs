//! Application state and event handling.
//!
//! This module owns the fretboard being displayed and the view state around
//! it: the horizontal scroll position, the layout recorded by the last draw,
//! status messages, and clicks received from the fretboard.

use crate::fretboard::{
    DisplayMode, Fretboard, GridGeometry, NoteClickInfo, ScrollAnimation, ScrollRequest,
    MAX_FRET_LIMIT,
};
use crate::pitch::{pitch_class_of, NOTE_NAMES};
use ratatui::layout::Rect;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// How long a status message stays visible.
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Fret columns scrolled per mouse wheel step.
const WHEEL_SCROLL_FRETS: i32 = 1;

/// Screen regions recorded during the last draw, used for hit testing and
/// scroll resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutRegions {
    /// The bordered fretboard panel.
    pub fretboard: Rect,
    /// The visible part of the fret cells (one row per string).
    pub grid: Rect,
    /// Column geometry of the fret cells.
    pub geometry: GridGeometry,
}

impl LayoutRegions {
    /// Checks if a point is within a rectangle.
    fn contains(rect: Rect, x: u16, y: u16) -> bool {
        x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
    }

    pub fn is_in_fretboard(&self, x: u16, y: u16) -> bool {
        Self::contains(self.fretboard, x, y)
    }

    /// Converts screen coordinates to (string_index, fret).
    ///
    /// # Arguments
    ///
    /// * `x` - Screen X coordinate
    /// * `y` - Screen Y coordinate
    /// * `scroll_x` - Current horizontal scroll offset of the grid
    ///
    /// # Returns
    ///
    /// The cell under the point, or None if the point is outside the grid
    pub fn cell_at(&self, x: u16, y: u16, scroll_x: u32) -> Option<(usize, u32)> {
        if !Self::contains(self.grid, x, y) {
            return None;
        }
        let string_index = (y - self.grid.y) as usize;
        let content_x = (x - self.grid.x) as u32 + scroll_x;
        let column = self.geometry.column_at(content_x)?;
        Some((string_index, self.geometry.start_fret + column))
    }
}

/// Main application state.
pub struct App {
    /// The fretboard being displayed.
    pub fretboard: Fretboard,

    /// Clicks delivered by the fretboard's click handler.
    clicks: Receiver<NoteClickInfo>,

    /// Most recent click, shown in the status bar.
    pub last_click: Option<NoteClickInfo>,

    /// Layout recorded by the last draw.
    pub layout: LayoutRegions,

    /// Horizontal scroll offset of the fret cells, in terminal cells.
    pub scroll_x: u32,

    scroll_request: ScrollRequest,
    scroll_animation: Option<ScrollAnimation>,

    /// Temporary status message and when it was set.
    pub status_message: Option<(String, Instant)>,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Scroll offset of the help overlay.
    pub help_scroll: u16,
}

impl App {
    /// Creates the application around a fretboard and registers its click
    /// handler.
    pub fn new(mut fretboard: Fretboard) -> Self {
        let (sender, clicks) = mpsc::channel();
        fretboard.set_on_note_click(move |info| {
            // The receiver lives as long as the App, which owns the fretboard
            let _ = sender.send(info.clone());
        });

        Self {
            fretboard,
            clicks,
            last_click: None,
            layout: LayoutRegions::default(),
            scroll_x: 0,
            scroll_request: ScrollRequest::default(),
            scroll_animation: None,
            status_message: None,
            show_help: false,
            help_scroll: 0,
        }
    }

    /// Updates the layout regions. Called by the UI module during rendering.
    pub fn update_layout(&mut self, layout: LayoutRegions) {
        self.layout = layout;
        self.scroll_x = self.scroll_x.min(layout.geometry.max_scroll());
    }

    /// Sets a status message to display temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clears expired status messages.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > STATUS_DURATION {
                self.status_message = None;
            }
        }
    }

    // ========== SCROLLING ==========

    /// Notes the currently requested scroll fret before a draw.
    ///
    /// A changed request is only resolved by [`App::after_layout`], once the
    /// draw has measured the grid.
    pub fn observe_scroll_request(&mut self) {
        let requested = self.fretboard.options.scroll_to_fret;
        if self.scroll_request.observe(requested) {
            tracing::debug!(fret = ?requested, "scroll scheduled");
        }
    }

    /// Resolves a pending scroll against the layout of the last draw.
    ///
    /// Must run after the frame has been drawn, since the target offset
    /// depends on the measured cell geometry.
    pub fn after_layout(&mut self, now: Instant) {
        let Some(fret) = self.scroll_request.take_pending() else {
            return;
        };
        let geometry = self.layout.geometry;
        let Some(target) = geometry.scroll_target(fret) else {
            tracing::debug!(fret, "requested fret is not rendered; scroll skipped");
            return;
        };
        // The view cannot scroll past the end of the content
        let target = target.min(geometry.max_scroll());
        if self.scroll_animation.is_some_and(|a| a.target() == target) {
            return;
        }
        tracing::debug!(fret, from = self.scroll_x, to = target, "scrolling to fret");
        self.scroll_animation = Some(ScrollAnimation::new(self.scroll_x, target, now));
    }

    /// Advances the smooth scroll animation, if one is running.
    pub fn update_scroll_animation(&mut self, now: Instant) {
        if let Some(animation) = self.scroll_animation {
            self.scroll_x = animation.offset_at(now);
            if animation.is_finished(now) {
                self.scroll_animation = None;
            }
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll_animation.is_some()
    }

    /// Scrolls the grid by a number of terminal cells, cancelling any
    /// animation.
    pub fn scroll_by(&mut self, cells: i32) {
        self.scroll_animation = None;
        let max = self.layout.geometry.max_scroll();
        self.scroll_x = self.scroll_x.saturating_add_signed(cells).min(max);
    }

    /// Moves the requested scroll fret by `delta`, staying inside the grid.
    pub fn move_scroll_fret(&mut self, delta: i32) {
        let options = &mut self.fretboard.options;
        let last = options.last_fret();
        if options.start_fret > last {
            return;
        }
        let current = options.scroll_to_fret.unwrap_or(options.start_fret);
        let fret = current
            .saturating_add_signed(delta)
            .clamp(options.start_fret, last);
        options.scroll_to_fret = Some(fret);
        self.set_status(format!("Scroll to fret {}", fret));
    }

    // ========== DISPLAY OPTIONS ==========

    pub fn toggle_display_mode(&mut self) {
        let options = &mut self.fretboard.options;
        options.display_mode = options.display_mode.toggled();
        let mode = options.display_mode;
        if mode == DisplayMode::Intervals && options.root().is_none() {
            self.set_status("Intervals need a root note (press r)");
        } else {
            self.set_status(format!("Showing {}", mode.name().to_lowercase()));
        }
    }

    /// Steps the root note through no root and the twelve canonical names.
    pub fn cycle_root_note(&mut self, delta: i32) {
        // Slot 0 is "no root", slots 1-12 are NOTE_NAMES
        let slots = NOTE_NAMES.len() as i32 + 1;
        let options = &mut self.fretboard.options;
        let current = options
            .root()
            .and_then(pitch_class_of)
            .map(|pc| pc as i32 + 1)
            .unwrap_or(0);
        let next = (current + delta).rem_euclid(slots);

        options.root_note = (next > 0).then(|| NOTE_NAMES[(next - 1) as usize].to_string());
        let message = match &options.root_note {
            Some(root) => format!("Root: {}", root),
            None => "Root: none".to_string(),
        };
        self.set_status(message);
    }

    pub fn toggle_fret_numbers(&mut self) {
        let options = &mut self.fretboard.options;
        options.show_fret_numbers = !options.show_fret_numbers;
        let shown = options.show_fret_numbers;
        self.set_status(if shown {
            "Fret numbers shown"
        } else {
            "Fret numbers hidden"
        });
    }

    /// Adjusts the first fret shown. May exceed the max fret, which leaves
    /// the grid empty.
    pub fn adjust_start_fret(&mut self, delta: i32) {
        let options = &mut self.fretboard.options;
        options.start_fret = options
            .start_fret
            .saturating_add_signed(delta)
            .min(MAX_FRET_LIMIT);
        let (start, max) = (options.start_fret, options.max_frets);
        self.set_status(format!("Frets {}-{}", start, max));
    }

    pub fn adjust_max_frets(&mut self, delta: i32) {
        let options = &mut self.fretboard.options;
        options.max_frets = options
            .max_frets
            .saturating_add_signed(delta)
            .min(MAX_FRET_LIMIT);
        let (start, max) = (options.start_fret, options.max_frets);
        self.set_status(format!("Frets {}-{}", start, max));
    }

    // ========== MOUSE HANDLING ==========

    /// Handles a left click.
    ///
    /// # Returns
    ///
    /// true if the click landed on an active cell
    pub fn handle_mouse_click(&mut self, x: u16, y: u16) -> bool {
        let Some((string_index, fret)) = self.layout.cell_at(x, y, self.scroll_x) else {
            return false;
        };
        let handled = self.fretboard.click(string_index, fret).is_some();
        self.drain_clicks();
        handled
    }

    /// Handles a wheel event over the fretboard. Each step moves whole
    /// fret columns.
    pub fn handle_mouse_scroll(&mut self, x: u16, y: u16, delta: i32) {
        if self.layout.is_in_fretboard(x, y) {
            let cell_width = i32::try_from(self.layout.geometry.cell_width).unwrap_or(i32::MAX);
            self.scroll_by(
                delta
                    .saturating_mul(WHEEL_SCROLL_FRETS)
                    .saturating_mul(cell_width),
            );
        }
    }

    /// Moves clicks delivered by the handler into the view state.
    pub fn drain_clicks(&mut self) {
        while let Ok(info) = self.clicks.try_recv() {
            let category = info
                .category
                .as_ref()
                .map(|c| format!(" [{}]", c))
                .unwrap_or_default();
            self.set_status(format!(
                "Clicked {} (MIDI {}) on string {} fret {}{}",
                info.note,
                info.midi,
                info.string_index + 1,
                info.fret,
                category
            ));
            self.last_click = Some(info);
        }
    }
}
