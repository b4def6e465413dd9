//! The scroller model: window state, formatting, timing and drivers.

use super::keymap::ScrollerKeyMap;
use super::render::{render_line, LineEnd, RenderOptions};
use super::window::{Bounds, Direction, Orientation, ScrollWindow};
use crate::error::{Error, Result};
use crate::runeutil::Sanitizer;
use crate::Component;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;
use std::fmt;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicI64, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace, warn};

// Internal ID management for scroller instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const DEFAULT_WIDTH: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(width) => width,
    None => panic!("default width must be non-zero"),
};

/// Turns a raw window into the string that is displayed.
///
/// Must be `Send` so the scroller can live inside a bubbletea-rs program.
pub type FormatFunc = Box<dyn Fn(&str) -> String + Send>;

/// Whether the scroller is producing frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Constructed or finished; position at rest.
    #[default]
    Idle,
    /// Producing frames, on a timer or from external steps.
    Running,
}

/// How many full cycles a driver runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Exactly this many cycles.
    Finite(usize),
    /// Until cancelled.
    #[default]
    Infinite,
}

impl Repeat {
    /// Total number of steps for a cycle of `cycle_len` steps, or `None` when unbounded.
    pub fn total_steps(self, cycle_len: usize) -> Option<usize> {
        match self {
            Repeat::Finite(n) => Some(n.saturating_mul(cycle_len)),
            Repeat::Infinite => None,
        }
    }
}

/// Message that advances a timer-driven scroller by one step.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The scroller this tick belongs to. Zero is accepted by every scroller.
    pub id: i64,
    tag: i64,
}

/// Configuration options applied in order by [`new`].
pub enum ScrollerOption {
    /// Sets the default travel direction.
    WithOrientation(Orientation),
    /// Sets the range of valid positions.
    WithBounds(Bounds),
    /// Pads the text so it slides fully on and off screen.
    WithIncludeLast(bool),
    /// Keeps or skips the blank frame the text enters from.
    WithIncludeFirst(bool),
    /// Sets the padding character.
    WithFiller(char),
    /// Sets the delay between timed steps.
    WithDelay(Duration),
    /// Sets the window formatter.
    WithFormatter(FormatFunc),
    /// Sets the style applied by `view()`.
    WithStyle(Box<Style>),
    /// Limits timer-driven scrolling to a number of cycles.
    WithRepeat(Repeat),
    /// Replaces the key bindings.
    WithKeyMap(ScrollerKeyMap),
}

impl ScrollerOption {
    fn apply(self, m: &mut Model) {
        match self {
            ScrollerOption::WithOrientation(orientation) => m.orientation = orientation,
            ScrollerOption::WithBounds(bounds) => m.bounds = bounds,
            ScrollerOption::WithIncludeLast(include_last) => m.include_last = include_last,
            ScrollerOption::WithIncludeFirst(include_first) => m.include_first = include_first,
            ScrollerOption::WithFiller(filler) => m.filler = filler,
            ScrollerOption::WithDelay(delay) => m.delay = delay,
            ScrollerOption::WithFormatter(formatter) => m.formatter = Some(formatter),
            ScrollerOption::WithStyle(style) => m.style = Some(*style),
            ScrollerOption::WithRepeat(repeat) => m.repeat = repeat,
            ScrollerOption::WithKeyMap(keymap) => m.keymap = keymap,
        }
    }
}

/// Sets the default travel direction.
pub fn with_orientation(orientation: Orientation) -> ScrollerOption {
    ScrollerOption::WithOrientation(orientation)
}

/// Sets the range of valid positions.
pub fn with_bounds(bounds: Bounds) -> ScrollerOption {
    ScrollerOption::WithBounds(bounds)
}

/// Pads the text so it slides fully on and off screen.
pub fn with_include_last(include_last: bool) -> ScrollerOption {
    ScrollerOption::WithIncludeLast(include_last)
}

/// Keeps or skips the blank frame the text enters from.
pub fn with_include_first(include_first: bool) -> ScrollerOption {
    ScrollerOption::WithIncludeFirst(include_first)
}

/// Sets the padding character.
pub fn with_filler(filler: char) -> ScrollerOption {
    ScrollerOption::WithFiller(filler)
}

/// Sets the delay between timed steps.
pub fn with_delay(delay: Duration) -> ScrollerOption {
    ScrollerOption::WithDelay(delay)
}

/// Sets the window formatter.
pub fn with_formatter<F>(formatter: F) -> ScrollerOption
where
    F: Fn(&str) -> String + Send + 'static,
{
    ScrollerOption::WithFormatter(Box::new(formatter))
}

/// Sets the style applied by `view()`.
pub fn with_style(style: Style) -> ScrollerOption {
    ScrollerOption::WithStyle(Box::new(style))
}

/// Limits timer-driven scrolling to a number of cycles.
pub fn with_repeat(repeat: Repeat) -> ScrollerOption {
    ScrollerOption::WithRepeat(repeat)
}

/// Replaces the key bindings.
pub fn with_key_map(keymap: ScrollerKeyMap) -> ScrollerOption {
    ScrollerOption::WithKeyMap(keymap)
}

/// Converts seconds to a delay, clamping negative or unrepresentable values to zero.
pub fn delay_from_secs(secs: f64) -> Duration {
    match Duration::try_from_secs_f64(secs) {
        Ok(delay) => delay,
        Err(_) => {
            warn!(secs, "delay is negative or not representable, using zero");
            Duration::ZERO
        }
    }
}

/// A scrolling text (marquee) component.
///
/// The model shows `width` characters of its text at a time and moves the
/// window one character per step. Steps come from a timer (`delay > 0`),
/// from the blocking drivers ([`Model::run_to`], [`Model::repeat_to`]), or
/// from the host calling [`Model::step_forward`] / [`Model::step_backward`].
///
/// # Examples
///
/// ```rust
/// use bubbletea_marquee::scroller::Model;
///
/// let mut scroller = Model::new(4, "abc").unwrap();
/// let frames: Vec<String> = scroller.by_ref().take(5).collect();
/// assert_eq!(frames, vec!["    ", "   a", "  ab", " abc", "abc "]);
/// ```
pub struct Model {
    text: String,
    width: NonZeroUsize,
    orientation: Orientation,
    bounds: Bounds,
    include_last: bool,
    include_first: bool,
    filler: char,
    window: ScrollWindow,

    /// Delay between timed steps. Zero disables the timer.
    delay: Duration,
    formatter: Option<FormatFunc>,
    style: Option<Style>,
    repeat: Repeat,

    /// Key bindings used when the scroller is focused.
    pub keymap: ScrollerKeyMap,

    state: State,
    steps: usize,
    ticks: usize,
    focus: bool,
    id: i64,
    tag: i64,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("text", &self.text)
            .field("window", &self.window)
            .field("delay", &self.delay)
            .field("repeat", &self.repeat)
            .field("state", &self.state)
            .field("steps", &self.steps)
            .field("ticks", &self.ticks)
            .field("focus", &self.focus)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Creates a left-scrolling, padded scroller with no delay.
    ///
    /// Control characters in `text` are flattened so the frame stays on one line.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of characters visible at once, at least 1
    /// * `text` - The text to scroll
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_marquee::scroller::{Model, State};
    ///
    /// let scroller = Model::new(10, "Hi").unwrap();
    /// assert_eq!(scroller.state(), State::Idle);
    /// assert_eq!(scroller.window().effective_len(), 22);
    /// assert_eq!(scroller.cycle_len(), 13);
    ///
    /// assert!(Model::new(0, "Hi").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `width` is zero.
    pub fn new(width: usize, text: impl Into<String>) -> Result<Self> {
        let width = NonZeroUsize::new(width).ok_or_else(|| {
            Error::InvalidConfiguration("window width must be greater than zero".to_string())
        })?;
        Ok(Self::build(width, text.into()))
    }

    /// Creates a scroller and applies `opts` in order.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of characters visible at once, at least 1
    /// * `text` - The text to scroll
    /// * `opts` - Options applied in order; later options win
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_marquee::scroller::{with_include_last, with_orientation, Model, Orientation};
    ///
    /// let scroller = Model::new_with_options(
    ///     3,
    ///     "abcde",
    ///     vec![with_orientation(Orientation::Right), with_include_last(false)],
    /// )
    /// .unwrap();
    /// assert_eq!(scroller.frame(), "cde");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `width` is zero.
    pub fn new_with_options(
        width: usize,
        text: impl Into<String>,
        opts: Vec<ScrollerOption>,
    ) -> Result<Self> {
        let mut m = Self::new(width, text)?;
        for opt in opts {
            opt.apply(&mut m);
        }
        m.rebuild();
        Ok(m)
    }

    fn build(width: NonZeroUsize, text: String) -> Self {
        let text = Sanitizer::default().sanitize_str(&text);
        let orientation = Orientation::default();
        let bounds = Bounds::default();
        let window = ScrollWindow::build(width, &text, orientation, bounds, true, ' ');
        Self {
            text,
            width,
            orientation,
            bounds,
            include_last: true,
            include_first: true,
            filler: ' ',
            window,
            delay: Duration::ZERO,
            formatter: None,
            style: None,
            repeat: Repeat::Infinite,
            keymap: ScrollerKeyMap::default(),
            state: State::Idle,
            steps: 0,
            ticks: 0,
            focus: false,
            id: next_id(),
            tag: 0,
        }
    }

    /// Recreates the window from the current settings. Position goes back to
    /// the initial edge.
    fn rebuild(&mut self) {
        self.window = ScrollWindow::build(
            self.width,
            &self.text,
            self.orientation,
            self.bounds,
            self.include_last,
            self.filler,
        )
        .with_include_first(self.include_first);
    }

    /// Sets the default travel direction.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self.rebuild();
        self
    }

    /// Sets the range of valid positions.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self.rebuild();
        self
    }

    /// Pads the text so it slides fully on and off screen.
    pub fn with_include_last(mut self, include_last: bool) -> Self {
        self.include_last = include_last;
        self.rebuild();
        self
    }

    /// Keeps or skips the blank frame the text enters from.
    ///
    /// Only matters when the text is padded. Skipping it starts the first
    /// cycle with the text already entering the window.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_marquee::scroller::Model;
    ///
    /// let mut scroller = Model::new(3, "ab").unwrap().with_include_first(false);
    /// let frames: Vec<String> = scroller.by_ref().take(6).collect();
    /// assert_eq!(frames, vec!["  a", " ab", "ab ", "b  ", "   ", "  a"]);
    /// ```
    pub fn with_include_first(mut self, include_first: bool) -> Self {
        self.include_first = include_first;
        self.rebuild();
        self
    }

    /// Sets the padding character.
    pub fn with_filler(mut self, filler: char) -> Self {
        self.filler = filler;
        self.rebuild();
        self
    }

    /// Sets the delay between timed steps.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the delay in seconds. Negative values are treated as zero.
    pub fn with_delay_secs(self, secs: f64) -> Self {
        self.with_delay(delay_from_secs(secs))
    }

    /// Sets the window formatter.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str) -> String + Send + 'static,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Sets the style applied by `view()`.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Limits timer-driven scrolling to a number of cycles.
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Replaces the key bindings.
    pub fn with_key_map(mut self, keymap: ScrollerKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Unique identifier used to route tick messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The sanitized source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The underlying window.
    pub fn window(&self) -> &ScrollWindow {
        &self.window
    }

    /// Current left edge of the window.
    pub fn position(&self) -> usize {
        self.window.position()
    }

    /// Number of steps in one full traversal.
    pub fn cycle_len(&self) -> usize {
        self.window.cycle_len()
    }

    /// Delay between timed steps.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the delay between timed steps.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the scroller is running.
    pub fn running(&self) -> bool {
        self.state == State::Running
    }

    /// Steps taken since the scroller was last started or restarted.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Timer steps taken since the scroller was last started or restarted.
    ///
    /// Only these count toward the [`Repeat`] limit; key-driven steps do not.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    fn repeat_finished(&self) -> bool {
        self.repeat
            .total_steps(self.cycle_len())
            .is_some_and(|total| self.ticks >= total)
    }

    /// The current window passed through the formatter.
    pub fn frame(&self) -> String {
        let raw = self.window.window();
        match &self.formatter {
            Some(format) => format(&raw),
            None => raw,
        }
    }

    /// Returns the current frame, then steps in the orientation's direction.
    pub fn advance(&mut self) -> String {
        self.advance_in(Direction::Forward)
    }

    /// Returns the current frame, then steps in the orientation's direction.
    ///
    /// Intended for external event sources; never sleeps.
    pub fn step_forward(&mut self) -> String {
        self.advance_in(Direction::Forward)
    }

    /// Returns the current frame, then steps against the orientation's direction.
    ///
    /// Intended for external event sources; never sleeps.
    pub fn step_backward(&mut self) -> String {
        self.advance_in(Direction::Backward)
    }

    fn advance_in(&mut self, direction: Direction) -> String {
        let frame = self.frame();
        self.state = State::Running;
        self.steps += 1;
        if self.window.step(direction) {
            trace!(id = self.id, steps = self.steps, "scroller wrapped");
        }
        frame
    }

    /// Moves back to the initial edge and returns to idle.
    pub fn restart(&mut self) {
        self.window.reset();
        self.state = State::Idle;
        self.steps = 0;
        self.ticks = 0;
        self.tag += 1;
        debug!(id = self.id, "scroller restarted");
    }

    /// Enters the running state.
    ///
    /// Returns the first tick command when a delay is set. With a zero delay
    /// the scroller only moves through `step_forward` / `step_backward`.
    /// A `Repeat::Finite(0)` limit has nothing to run: the scroller stays idle
    /// and no command is returned.
    pub fn start(&mut self) -> Option<Cmd> {
        self.steps = 0;
        self.ticks = 0;
        self.tag += 1;
        if self.repeat_finished() {
            self.state = State::Idle;
            debug!(id = self.id, "scroller has no cycles to run");
            return None;
        }
        self.state = State::Running;
        debug!(id = self.id, delay = ?self.delay, "scroller started");
        if self.delay.is_zero() {
            None
        } else {
            Some(self.tick())
        }
    }

    /// Returns to idle. Pending ticks are ignored.
    pub fn stop(&mut self) {
        self.state = State::Idle;
        self.tag += 1;
        debug!(id = self.id, steps = self.steps, "scroller stopped");
    }

    /// Starts an idle scroller or stops a running one.
    pub fn toggle(&mut self) -> Option<Cmd> {
        if self.running() {
            self.stop();
            None
        } else {
            self.start()
        }
    }

    /// A tick message addressed to this scroller's current tick cycle.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.delay, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Starts timed scrolling. Equivalent to [`Model::start`].
    pub fn init(&mut self) -> Option<Cmd> {
        self.start()
    }

    /// Handles tick and key messages.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }

        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if !self.running() || (tick_msg.id != 0 && tick_msg.id != self.id) {
                return None;
            }

            // A stale tag means a newer tick cycle has replaced this one.
            if tick_msg.tag > 0 && tick_msg.tag != self.tag {
                return None;
            }

            if !self.repeat_finished() {
                self.advance();
                self.ticks += 1;
            }

            if self.repeat_finished() {
                self.state = State::Idle;
                debug!(id = self.id, ticks = self.ticks, "scroller finished");
                return None;
            }

            self.tag += 1;
            return Some(self.tick());
        }

        None
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        if self.keymap.forward.matches(key_msg) {
            self.step_forward();
            None
        } else if self.keymap.backward.matches(key_msg) {
            self.step_backward();
            None
        } else if self.keymap.toggle.matches(key_msg) {
            self.toggle()
        } else {
            None
        }
    }

    /// The current frame with the style applied.
    pub fn view(&self) -> String {
        let frame = self.frame();
        match &self.style {
            Some(style) => style.render(&frame),
            None => frame,
        }
    }

    /// Renders frames to `out` forever, sleeping `delay` between them.
    ///
    /// Only returns if writing fails.
    ///
    /// # Arguments
    ///
    /// * `out` - Where frames are drawn
    /// * `opts` - Prefix, suffix and line end for each frame
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use bubbletea_marquee::scroller::{Model, RenderOptions};
    ///
    /// let mut scroller = Model::new(12, "breaking news").unwrap().with_delay_secs(0.1);
    /// let mut out = std::io::stderr();
    /// scroller.run_to(&mut out, &RenderOptions::new()).unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when a frame cannot be written.
    pub fn run_to<W: Write>(&mut self, out: &mut W, opts: &RenderOptions) -> Result<()> {
        self.repeat_to(out, Repeat::Infinite, opts)
    }

    /// Renders `times` full cycles to `out`, sleeping `delay` between frames.
    ///
    /// A finite run leaves the scroller idle. When frames are drawn in place
    /// the line is terminated once at the end.
    ///
    /// # Arguments
    ///
    /// * `out` - Where frames are drawn
    /// * `times` - Number of full cycles, or [`Repeat::Infinite`] to behave like [`Model::run_to`]
    /// * `opts` - Prefix, suffix and line end for each frame
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_marquee::scroller::{LineEnd, Model, RenderOptions, Repeat};
    ///
    /// let mut scroller = Model::new(2, "a").unwrap();
    /// let mut out = Vec::new();
    /// let opts = RenderOptions::new().with_line_end(LineEnd::Newline);
    /// scroller.repeat_to(&mut out, Repeat::Finite(2), &opts).unwrap();
    /// assert_eq!(scroller.steps(), 2 * scroller.cycle_len());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when a frame cannot be written.
    pub fn repeat_to<W: Write>(
        &mut self,
        out: &mut W,
        times: Repeat,
        opts: &RenderOptions,
    ) -> Result<()> {
        let total = times.total_steps(self.cycle_len());
        self.state = State::Running;
        self.steps = 0;
        debug!(id = self.id, ?times, "scroller driver started");

        while total.map_or(true, |total| self.steps < total) {
            let frame = self.advance();
            render_line(out, &frame, opts)?;
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        if opts.line_end == LineEnd::InPlace && self.steps > 0 {
            writeln!(out)?;
            out.flush()?;
        }
        self.state = State::Idle;
        debug!(id = self.id, steps = self.steps, "scroller driver finished");
        Ok(())
    }

    /// [`Model::run_to`] against stdout.
    pub fn run(&mut self, opts: &RenderOptions) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out, opts)
    }

    /// [`Model::repeat_to`] against stdout.
    pub fn repeat(&mut self, times: Repeat, opts: &RenderOptions) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.repeat_to(&mut out, times, opts)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::build(DEFAULT_WIDTH, String::new())
    }
}

impl Iterator for Model {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.advance())
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Self::default();
        let cmd = model.init();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

/// Creates a scroller and applies `opts` in order.
///
/// The option-list counterpart of [`Model::new`], in the style of the other
/// bubbletea widgets.
///
/// # Examples
///
/// ```rust
/// use bubbletea_marquee::scroller::{new, with_delay, with_repeat, Repeat};
/// use std::time::Duration;
///
/// let mut scroller = new(
///     8,
///     "ticker",
///     vec![with_delay(Duration::from_millis(120)), with_repeat(Repeat::Finite(3))],
/// )
/// .unwrap();
/// assert!(scroller.init().is_some());
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] when `width` is zero.
pub fn new(width: usize, text: impl Into<String>, opts: Vec<ScrollerOption>) -> Result<Model> {
    Model::new_with_options(width, text, opts)
}
