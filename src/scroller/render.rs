//! Writing frames to a terminal-like output stream.

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// What to write after each rendered frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LineEnd {
    /// Nothing: the next frame overwrites this one on the same line.
    #[default]
    InPlace,
    /// A newline, leaving every frame on its own line.
    Newline,
    /// A caller-supplied terminator.
    Custom(String),
}

impl LineEnd {
    fn as_str(&self) -> &str {
        match self {
            LineEnd::InPlace => "",
            LineEnd::Newline => "\n",
            LineEnd::Custom(s) => s,
        }
    }
}

/// Decoration and line handling for [`render_line`].
///
/// ```rust
/// use bubbletea_marquee::scroller::{LineEnd, RenderOptions};
///
/// let opts = RenderOptions::new()
///     .with_prefix("|")
///     .with_suffix("|")
///     .with_line_end(LineEnd::Newline);
/// assert_eq!(opts.decorate("abc"), "|abc|");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Literal text written before the frame.
    pub prefix: String,
    /// Literal text written after the frame.
    pub suffix: String,
    /// Terminator written after the suffix.
    pub line_end: LineEnd,
}

impl RenderOptions {
    /// In-place rendering with no decoration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the line terminator.
    pub fn with_line_end(mut self, line_end: LineEnd) -> Self {
        self.line_end = line_end;
        self
    }

    /// The frame wrapped in prefix and suffix.
    pub fn decorate(&self, frame: &str) -> String {
        format!("{}{}{}", self.prefix, frame, self.suffix)
    }
}

/// Returns the cursor to the start of the line, clears it, and writes the
/// decorated frame followed by the configured line end.
///
/// # Arguments
///
/// * `out` - The terminal (or any writer) to draw on; flushed after the frame
/// * `frame` - The formatted window
/// * `opts` - Prefix, suffix and line end
///
/// # Examples
///
/// ```rust
/// use bubbletea_marquee::scroller::{render_line, LineEnd, RenderOptions};
///
/// let mut out = Vec::new();
/// let opts = RenderOptions::new().with_prefix("[").with_suffix("]").with_line_end(LineEnd::Newline);
/// render_line(&mut out, "  Hi", &opts).unwrap();
/// assert!(String::from_utf8(out).unwrap().ends_with("[  Hi]\n"));
/// ```
///
/// # Errors
///
/// Returns the writer's error when the frame cannot be written or flushed.
pub fn render_line<W: Write>(out: &mut W, frame: &str, opts: &RenderOptions) -> io::Result<()> {
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(opts.decorate(frame)),
        Print(opts.line_end.as_str())
    )?;
    out.flush()
}
