//! Key bindings used to drive a scroller from keyboard events.
//!
//! A [`Binding`] groups one or more key presses under a help label. Hosts that
//! are not built on bubbletea-rs can still match raw crossterm events with
//! [`Binding::matches_event`] and call the scroller's step methods directly.
//!
//! ```rust
//! use bubbletea_marquee::key::{Binding, KeyPress};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let faster = Binding::new(vec![
//!     KeyPress::from(KeyCode::Char('+')),
//!     KeyPress::from((KeyCode::Char('f'), KeyModifiers::CONTROL)),
//! ])
//! .with_help("+", "faster");
//!
//! assert_eq!(faster.help().key, "+");
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"→/l"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of key presses that trigger the same action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding for the given key presses.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            enabled: true,
        }
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the binding is enabled and has at least one key.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// The key presses in this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns true if a bubbletea key message matches this binding.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.matches_press(key_msg.key, key_msg.modifiers)
    }

    /// Returns true if a raw crossterm key event matches this binding.
    pub fn matches_event(&self, key_event: &KeyEvent) -> bool {
        self.matches_press(key_event.code, key_event.modifiers)
    }

    fn matches_press(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.enabled()
            && self
                .keys
                .iter()
                .any(|k| k.code == code && k.modifiers == modifiers)
    }
}

/// Implemented by key maps so help views can list their bindings.
pub trait KeyMap {
    /// Bindings shown in the compact help line.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
