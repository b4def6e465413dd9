//! Default key bindings for a key-driven scroller.

use crate::key::{self, Binding};
use crossterm::event::KeyCode;
use once_cell::sync::Lazy;

/// Keys that step a focused scroller or pause its timer.
#[derive(Debug, Clone)]
pub struct ScrollerKeyMap {
    /// Step in the orientation's direction. Default: `→`, `l`.
    pub forward: Binding,
    /// Step against the orientation's direction. Default: `←`, `h`.
    pub backward: Binding,
    /// Start or stop timed scrolling. Default: space, `p`.
    pub toggle: Binding,
}

static DEFAULT_KEY_MAP: Lazy<ScrollerKeyMap> = Lazy::new(|| ScrollerKeyMap {
    forward: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')]).with_help("→/l", "step forward"),
    backward: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')]).with_help("←/h", "step back"),
    toggle: Binding::new(vec![KeyCode::Char(' '), KeyCode::Char('p')]).with_help("space/p", "pause"),
});

impl Default for ScrollerKeyMap {
    fn default() -> Self {
        DEFAULT_KEY_MAP.clone()
    }
}

impl key::KeyMap for ScrollerKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.backward, &self.forward, &self.toggle]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.backward, &self.forward], vec![&self.toggle]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyMap;
    use bubbletea_rs::KeyMsg;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_default_bindings() {
        let km = ScrollerKeyMap::default();
        let right = KeyMsg {
            key: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
        };
        assert!(km.forward.matches(&right));
        assert!(!km.backward.matches(&right));
        assert_eq!(km.toggle.help().key, "space/p");
    }

    #[test]
    fn test_help_layout() {
        let km = ScrollerKeyMap::default();
        assert_eq!(km.short_help().len(), 3);
        assert_eq!(km.full_help().len(), 2);
    }
}
