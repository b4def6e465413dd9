//! Scrolling text (marquee) component for Bubble Tea applications.
//!
//! A scroller shows a fixed-width window over a line of text and moves that
//! window one character per step, wrapping around at the end. It can be
//! driven by a bubbletea-rs tick, by key presses, or by the blocking drivers
//! that write straight to a terminal.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_marquee::scroller::{new, with_formatter, with_orientation, Orientation};
//!
//! let mut scroller = new(
//!     8,
//!     "hello",
//!     vec![
//!         with_orientation(Orientation::Left),
//!         with_formatter(|s| format!("[{}]", s)),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(scroller.advance(), "[        ]");
//! assert_eq!(scroller.advance(), "[       h]");
//! ```
//!
//! # Plain terminal output
//!
//! ```rust,no_run
//! use bubbletea_marquee::scroller::{Model, RenderOptions, Repeat};
//!
//! let mut scroller = Model::new(10, "https://example.com")
//!     .unwrap()
//!     .with_delay_secs(0.3);
//! let opts = RenderOptions::new().with_prefix("|").with_suffix("|");
//! scroller.repeat(Repeat::Finite(2), &opts).unwrap();
//! ```
//!
//! # Key-driven stepping
//!
//! With a zero delay the scroller never moves on its own. Focus it and
//! forward key messages, or call [`Model::step_forward`] and
//! [`Model::step_backward`] from any event source.
//!
//! ```rust
//! use bubbletea_marquee::prelude::*;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut scroller = Scroller::new(3, "ab").unwrap();
//! scroller.focus();
//! scroller.update(Box::new(KeyMsg { key: KeyCode::Right, modifiers: KeyModifiers::NONE }));
//! assert_eq!(scroller.position(), 1);
//! ```

pub mod keymap;
pub mod model;
pub mod render;
pub mod window;

#[cfg(test)]
mod tests;

pub use keymap::ScrollerKeyMap;
pub use model::{
    delay_from_secs, new, with_bounds, with_delay, with_filler, with_formatter, with_include_first,
    with_include_last, with_key_map, with_orientation, with_repeat, with_style, FormatFunc, Model,
    Repeat, ScrollerOption, State, TickMsg,
};
pub use render::{render_line, LineEnd, RenderOptions};
pub use window::{Bounds, Direction, Orientation, ScrollWindow};
