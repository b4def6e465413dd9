//! Text sanitization for scroll text.
//!
//! A marquee is a single terminal line, so newlines, tabs and other control
//! characters in the source text would tear the animation apart. The
//! [`Sanitizer`] flattens them before the text is split into characters.
//!
//! ```rust
//! use bubbletea_marquee::runeutil::{new_sanitizer, replace_newlines};
//!
//! let sanitizer = new_sanitizer(vec![replace_newlines(" | ")]);
//! assert_eq!(sanitizer.sanitize_str("one\ntwo\x07"), "one | two");
//! ```

/// Replaces newlines and tabs and removes other control characters.
///
/// Defaults flatten both newlines and tabs to a single space, which is what
/// the scroller uses for its text.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    replace_newline: String,
    replace_tab: String,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            replace_newline: " ".to_string(),
            replace_tab: " ".to_string(),
        }
    }
}

/// Configuration closure applied by [`new_sanitizer`].
pub type SanitizerOpt = Box<dyn FnOnce(&mut Sanitizer)>;

/// Builds a sanitizer from the defaults plus the given options.
///
/// # Arguments
///
/// * `opts` - Options applied in order on top of [`Sanitizer::default`]
///
/// # Examples
///
/// ```rust
/// use bubbletea_marquee::runeutil::{new_sanitizer, replace_tabs};
///
/// let sanitizer = new_sanitizer(vec![replace_tabs("    ")]);
/// assert_eq!(sanitizer.sanitize_str("a\tb\nc"), "a    b c");
/// ```
pub fn new_sanitizer(opts: Vec<SanitizerOpt>) -> Sanitizer {
    let mut s = Sanitizer::default();
    for opt in opts {
        opt(&mut s);
    }
    s
}

/// Sets the replacement for tab characters.
pub fn replace_tabs(tab_repl: &str) -> SanitizerOpt {
    let repl = tab_repl.to_string();
    Box::new(move |s: &mut Sanitizer| s.replace_tab = repl)
}

/// Sets the replacement for `\n` and `\r`.
pub fn replace_newlines(nl_repl: &str) -> SanitizerOpt {
    let repl = nl_repl.to_string();
    Box::new(move |s: &mut Sanitizer| s.replace_newline = repl)
}

impl Sanitizer {
    /// Returns `input` with control characters replaced or removed.
    ///
    /// A `\r\n` pair counts as one line break.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_marquee::runeutil::Sanitizer;
    ///
    /// let sanitizer = Sanitizer::default();
    /// assert_eq!(sanitizer.sanitize_str("now\r\nplaying\x1b"), "now playing");
    /// ```
    pub fn sanitize_str(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    out.push_str(&self.replace_newline);
                }
                '\n' => out.push_str(&self.replace_newline),
                '\t' => out.push_str(&self.replace_tab),
                c if c.is_control() => {}
                c => out.push(c),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flattens_whitespace() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize_str("a\tb\nc"), "a b c");
    }

    #[test]
    fn test_crlf_is_one_break() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize_str("a\r\nb\rc"), "a b c");
    }

    #[test]
    fn test_control_chars_removed() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize_str("\x1b[31mred\x00"), "[31mred");
    }

    #[test]
    fn test_custom_replacements() {
        let s = new_sanitizer(vec![replace_tabs("    "), replace_newlines("")]);
        assert_eq!(s.sanitize_str("x\ty\nz"), "x    yz");
    }

    #[test]
    fn test_unicode_preserved() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize_str("héllo 🌍"), "héllo 🌍");
    }
}
