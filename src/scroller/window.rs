//! The window arithmetic behind every scroller.
//!
//! A [`ScrollWindow`] owns the effective text (the source text, optionally
//! padded with `width` filler characters on both sides) split into grapheme
//! clusters, and a position marking the left edge of the visible window.
//! Stepping moves the position by one and wraps at either end; it is a loop,
//! never a bounce.
//!
//! ```rust
//! use bubbletea_marquee::scroller::{Bounds, Direction, Orientation, ScrollWindow};
//!
//! let mut w = ScrollWindow::new(10, "Hi", Orientation::Left, Bounds::Window, true, ' ').unwrap();
//! assert_eq!(w.effective_len(), 22);
//! assert_eq!(w.window(), "          ");
//! for _ in 0..10 {
//!     w.step(Direction::Forward);
//! }
//! assert_eq!(w.window(), "Hi        ");
//! ```

use crate::error::{Error, Result};
use std::num::NonZeroUsize;
use unicode_segmentation::UnicodeSegmentation;

/// Which way the text appears to travel by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Text enters on the right and travels left. Position grows.
    #[default]
    Left,
    /// Text enters on the left and travels right. Position shrinks.
    Right,
}

impl Orientation {
    /// The raw step applied by [`Direction::Forward`] for this orientation.
    fn forward_delta(self) -> isize {
        match self {
            Orientation::Left => 1,
            Orientation::Right => -1,
        }
    }
}

/// Step direction relative to the orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The orientation's default direction.
    Forward,
    /// The reverse of the orientation's default direction.
    Backward,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Range of valid positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    /// Positions `0..=len - width`: the window never runs past the end of
    /// the effective text.
    #[default]
    Window,
    /// Positions `0..len`: the window runs off the end and is padded with
    /// filler, so one cycle is exactly `len` steps.
    Modulo,
}

/// Fixed-width window over a padded text.
#[derive(Debug, Clone)]
pub struct ScrollWindow {
    cells: Vec<String>,
    width: usize,
    filler: String,
    orientation: Orientation,
    bounds: Bounds,
    padded: bool,
    include_first: bool,
    position: usize,
}

impl ScrollWindow {
    /// Creates a window positioned at the orientation's initial edge.
    ///
    /// When `include_last` is set the text is padded with `width` copies of
    /// `filler` on both sides so it slides fully on and off screen.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of characters visible at once
    /// * `text` - The text to scroll, split into grapheme clusters
    /// * `orientation` - Default travel direction; picks the starting edge
    /// * `bounds` - Range of valid positions
    /// * `include_last` - Pad both sides so the text slides fully off screen
    /// * `filler` - Padding character
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_marquee::scroller::{Bounds, Orientation, ScrollWindow};
    ///
    /// let w = ScrollWindow::new(3, "ab", Orientation::Right, Bounds::Window, true, '.').unwrap();
    /// assert_eq!(w.effective_text(), "...ab...");
    /// assert_eq!(w.position(), 5);
    /// assert_eq!(w.window(), "...");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `width` is zero.
    pub fn new(
        width: usize,
        text: &str,
        orientation: Orientation,
        bounds: Bounds,
        include_last: bool,
        filler: char,
    ) -> Result<Self> {
        let width = NonZeroUsize::new(width).ok_or_else(|| {
            Error::InvalidConfiguration("window width must be greater than zero".to_string())
        })?;
        Ok(Self::build(width, text, orientation, bounds, include_last, filler))
    }

    pub(crate) fn build(
        width: NonZeroUsize,
        text: &str,
        orientation: Orientation,
        bounds: Bounds,
        include_last: bool,
        filler: char,
    ) -> Self {
        let width = width.get();
        let filler = filler.to_string();
        let pad = if include_last { width } else { 0 };
        let mut cells: Vec<String> = Vec::new();
        cells.extend(std::iter::repeat(filler.clone()).take(pad));
        cells.extend(text.graphemes(true).map(str::to_string));
        cells.extend(std::iter::repeat(filler.clone()).take(pad));

        let mut window = Self {
            cells,
            width,
            filler,
            orientation,
            bounds,
            padded: pad > 0,
            include_first: true,
            position: 0,
        };
        window.reset();
        window
    }

    /// Keeps or skips the all-filler frame the text enters from.
    ///
    /// With `include_first` unset and padding on, the window starts one step
    /// past the blank entry frame and wraps back there, so each cycle shows
    /// a single blank frame (on exit) instead of two. Without padding there
    /// is no blank entry frame and the setting has no effect. Resets the
    /// position.
    ///
    /// # Arguments
    ///
    /// * `include_first` - `false` to skip the blank entry frame
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_marquee::scroller::{Bounds, Orientation, ScrollWindow};
    ///
    /// let w = ScrollWindow::new(3, "ab", Orientation::Left, Bounds::Window, true, ' ')
    ///     .unwrap()
    ///     .with_include_first(false);
    /// assert_eq!(w.position(), 1);
    /// assert_eq!(w.window(), "  a");
    /// assert_eq!(w.cycle_len(), 5);
    /// ```
    pub fn with_include_first(mut self, include_first: bool) -> Self {
        self.include_first = include_first;
        self.reset();
        self
    }

    /// Number of characters visible at once.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Length of the effective (padded) text in characters.
    pub fn effective_len(&self) -> usize {
        self.cells.len()
    }

    /// The effective text as a string.
    pub fn effective_text(&self) -> String {
        self.cells.concat()
    }

    /// The orientation this window was built with.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The bounds policy this window was built with.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Current left edge of the window.
    pub fn position(&self) -> usize {
        self.position
    }

    fn skips_entry_frame(&self) -> bool {
        self.padded && !self.include_first
    }

    fn bounds_end(&self) -> usize {
        match self.bounds {
            Bounds::Window => self.cells.len().saturating_sub(self.width),
            Bounds::Modulo => self.cells.len().saturating_sub(1),
        }
    }

    /// Lowest valid position.
    pub fn first_position(&self) -> usize {
        match self.orientation {
            Orientation::Left if self.skips_entry_frame() => 1,
            _ => 0,
        }
    }

    /// Highest valid position.
    pub fn last_position(&self) -> usize {
        match self.orientation {
            Orientation::Right if self.skips_entry_frame() => self.bounds_end().saturating_sub(1),
            _ => self.bounds_end(),
        }
    }

    /// Number of steps in one full traversal.
    pub fn cycle_len(&self) -> usize {
        self.last_position().saturating_sub(self.first_position()) + 1
    }

    /// Position a fresh window starts at: the near edge moving left, the far
    /// edge moving right.
    pub fn initial_position(&self) -> usize {
        match self.orientation {
            Orientation::Left => self.first_position(),
            Orientation::Right => self.last_position(),
        }
    }

    /// Moves back to the initial position.
    pub fn reset(&mut self) {
        self.position = self.initial_position();
    }

    /// The visible characters at the current position.
    ///
    /// Anything past the end of the effective text is filled with the
    /// filler, so the result always holds exactly `width` characters.
    pub fn window(&self) -> String {
        let visible = self.visible_cells();
        let mut out = visible.concat();
        for _ in visible.len()..self.width {
            out.push_str(&self.filler);
        }
        out
    }

    fn visible_cells(&self) -> &[String] {
        let start = self.position.min(self.cells.len());
        let end = self.position.saturating_add(self.width).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Moves one position in `direction`, wrapping at either end.
    ///
    /// Returns `true` when the step wrapped around.
    pub fn step(&mut self, direction: Direction) -> bool {
        let delta = match direction {
            Direction::Forward => self.orientation.forward_delta(),
            Direction::Backward => -self.orientation.forward_delta(),
        };
        let first = self.first_position();
        let last = self.last_position();

        if delta > 0 {
            if self.position >= last {
                self.position = first;
                return true;
            }
            self.position += 1;
        } else {
            if self.position <= first {
                self.position = last;
                return true;
            }
            self.position -= 1;
        }
        false
    }
}
