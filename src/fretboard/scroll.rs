//! Scrolling a requested fret into view.
//!
//! Scrolling happens in two phases. [`ScrollRequest`] notices when the
//! requested fret changes and holds it until the view has laid out the grid.
//! Once geometry exists, [`GridGeometry::scroll_target`] computes the offset
//! that centres the fret, and [`ScrollAnimation`] eases the view there.

use std::time::{Duration, Instant};

/// How long a smooth scroll takes.
pub const SCROLL_ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// Offset that centres a cell in the viewport, clamped at the left edge.
///
/// # Arguments
///
/// * `cell_left` - Distance from the start of the scrollable content to the cell
/// * `cell_width` - Width of the cell
/// * `viewport_width` - Visible width of the scrollable area
///
/// # Examples
///
/// ```
/// use fretui::fretboard::centered_scroll_offset;
///
/// assert_eq!(centered_scroll_offset(100, 10, 40), 85);
/// // Centring the first cell would scroll past the left edge
/// assert_eq!(centered_scroll_offset(0, 10, 40), 0);
/// ```
pub fn centered_scroll_offset(cell_left: u32, cell_width: u32, viewport_width: u32) -> u32 {
    let cell_center = cell_left.saturating_add(cell_width / 2);
    cell_center.saturating_sub(viewport_width / 2)
}

/// Measured layout of the fret columns, recorded by the view while drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridGeometry {
    /// Fret shown in the first column.
    pub start_fret: u32,
    pub column_count: u32,
    /// Width of one fret column.
    pub cell_width: u32,
    /// Visible width of the scrollable fret area.
    pub viewport_width: u32,
}

impl GridGeometry {
    /// Total width of all fret columns.
    pub fn content_width(&self) -> u32 {
        self.column_count.saturating_mul(self.cell_width)
    }

    /// Largest useful scroll offset.
    pub fn max_scroll(&self) -> u32 {
        self.content_width().saturating_sub(self.viewport_width)
    }

    /// Left edge of the column showing `fret`, if it is rendered.
    pub fn cell_left(&self, fret: u32) -> Option<u32> {
        let column = fret.checked_sub(self.start_fret)?;
        (column < self.column_count).then(|| column.saturating_mul(self.cell_width))
    }

    /// Column index under a horizontal position in content coordinates.
    pub fn column_at(&self, content_x: u32) -> Option<u32> {
        if self.cell_width == 0 {
            return None;
        }
        let column = content_x / self.cell_width;
        (column < self.column_count).then_some(column)
    }

    /// Offset that centres `fret` in the viewport.
    ///
    /// Returns None when the fret has no rendered column.
    pub fn scroll_target(&self, fret: u32) -> Option<u32> {
        let left = self.cell_left(fret)?;
        Some(centered_scroll_offset(
            left,
            self.cell_width,
            self.viewport_width,
        ))
    }
}

/// Tracks the requested scroll fret between renders.
///
/// A scroll is scheduled whenever the requested value differs from the one
/// seen on the previous render, including the first render when a value is
/// supplied. The pending fret is only consumed after layout; if the request
/// changes again before then, the later value replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct ScrollRequest {
    last_seen: Option<u32>,
    pending: Option<u32>,
}

impl ScrollRequest {
    /// Records the current requested fret.
    ///
    /// # Returns
    ///
    /// true if a new scroll was scheduled
    pub fn observe(&mut self, requested: Option<u32>) -> bool {
        if requested == self.last_seen {
            return false;
        }
        self.last_seen = requested;
        match requested {
            Some(fret) => {
                self.pending = Some(fret);
                true
            }
            None => false,
        }
    }

    /// Whether a scroll is waiting for layout.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending fret. Call only once layout has been committed.
    pub fn take_pending(&mut self) -> Option<u32> {
        self.pending.take()
    }
}

/// A smooth scroll from one offset to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAnimation {
    from: u32,
    to: u32,
    started: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: u32, to: u32, started: Instant) -> Self {
        Self::with_duration(from, to, started, SCROLL_ANIMATION_DURATION)
    }

    pub fn with_duration(from: u32, to: u32, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    /// Final offset of the animation.
    pub fn target(&self) -> u32 {
        self.to
    }

    /// Offset at time `now`, eased out (fast start, slow finish).
    pub fn offset_at(&self, now: Instant) -> u32 {
        if self.is_finished(now) {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        let from = self.from as f64;
        let to = self.to as f64;
        (from + (to - from) * eased).round() as u32
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.duration.is_zero() || now.saturating_duration_since(self.started) >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        GridGeometry {
            start_fret: 0,
            column_count: 13,
            cell_width: 6,
            viewport_width: 30,
        }
    }

    #[test]
    fn test_centered_offset() {
        assert_eq!(centered_scroll_offset(60, 6, 30), 48);
        assert_eq!(centered_scroll_offset(12, 6, 30), 0);
        assert_eq!(centered_scroll_offset(0, 0, 0), 0);
    }

    #[test]
    fn test_scroll_target_clamps_left() {
        let geometry = geometry();
        assert_eq!(geometry.scroll_target(0), Some(0));
        assert_eq!(geometry.scroll_target(2), Some(0));
        // Fret 10: left 60, centre 63, minus half the viewport
        assert_eq!(geometry.scroll_target(10), Some(48));
    }

    #[test]
    fn test_scroll_target_outside_grid() {
        let geometry = GridGeometry {
            start_fret: 5,
            column_count: 4,
            ..geometry()
        };
        assert_eq!(geometry.scroll_target(4), None);
        assert_eq!(geometry.scroll_target(9), None);
        assert_eq!(geometry.scroll_target(5), Some(0));
    }

    #[test]
    fn test_geometry_bounds() {
        let geometry = geometry();
        assert_eq!(geometry.content_width(), 78);
        assert_eq!(geometry.max_scroll(), 48);
        assert_eq!(geometry.column_at(0), Some(0));
        assert_eq!(geometry.column_at(13), Some(2));
        assert_eq!(geometry.column_at(78), None);
        assert_eq!(GridGeometry::default().column_at(0), None);
    }

    #[test]
    fn test_request_fires_on_change_only() {
        let mut request = ScrollRequest::default();

        // Mounting without a value schedules nothing
        assert!(!request.observe(None));
        assert!(!request.is_pending());

        assert!(request.observe(Some(7)));
        assert!(!request.observe(Some(7)));
        assert_eq!(request.take_pending(), Some(7));
        assert_eq!(request.take_pending(), None);

        // Re-rendering with the same value does not scroll again
        assert!(!request.observe(Some(7)));
        assert!(!request.is_pending());
    }

    #[test]
    fn test_request_on_first_mount_with_value() {
        let mut request = ScrollRequest::default();
        assert!(request.observe(Some(3)));
        assert_eq!(request.take_pending(), Some(3));
    }

    #[test]
    fn test_later_request_wins() {
        let mut request = ScrollRequest::default();
        request.observe(Some(3));
        request.observe(Some(9));
        assert_eq!(request.take_pending(), Some(9));
    }

    #[test]
    fn test_clearing_then_repeating_value_scrolls_again() {
        let mut request = ScrollRequest::default();
        request.observe(Some(5));
        request.take_pending();
        assert!(!request.observe(None));
        assert!(request.observe(Some(5)));
    }

    #[test]
    fn test_animation_progress() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        let animation = ScrollAnimation::with_duration(0, 100, start, duration);

        assert_eq!(animation.offset_at(start), 0);
        let midway = animation.offset_at(start + Duration::from_millis(100));
        assert!(midway > 50 && midway < 100, "eased midpoint {midway}");
        assert!(!animation.is_finished(start + Duration::from_millis(100)));
        assert_eq!(animation.offset_at(start + duration), 100);
        assert!(animation.is_finished(start + duration));
    }

    #[test]
    fn test_animation_backwards_and_instant() {
        let start = Instant::now();
        let animation = ScrollAnimation::with_duration(80, 20, start, Duration::from_millis(100));
        let midway = animation.offset_at(start + Duration::from_millis(50));
        assert!(midway < 80 && midway > 20);

        let instant = ScrollAnimation::with_duration(0, 40, start, Duration::ZERO);
        assert!(instant.is_finished(start));
        assert_eq!(instant.offset_at(start), 40);
    }
}
