#![warn(missing_docs)]

//! # bubbletea-marquee
//!
//! A scrolling text (marquee) component for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs), usable on its own
//! as a plain command-line animation as well.
//!
//! ## Overview
//!
//! The scroller shows a fixed-width window over a line of text and moves the
//! window one character per step. Text scrolls left or right, wraps around
//! forever or for a fixed number of cycles, and each frame can be decorated by
//! a formatter before it is displayed. Like the other bubbletea widgets the
//! model follows the Elm Architecture with `init()`, `update()` and `view()`.
//!
//! ## Driving the scroller
//!
//! - **Timer**: give it a delay and forward its `TickMsg`s through `update()`.
//! - **Keys**: focus it and forward `KeyMsg`s, or call `step_forward()` /
//!   `step_backward()` from any event source.
//! - **Blocking**: `run()` / `repeat()` draw frames in place on stdout.
//!
//! ```rust
//! use bubbletea_marquee::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//! use std::time::Duration;
//!
//! struct App {
//!     banner: Scroller,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut banner = Scroller::new(20, "Now playing: something loud")
//!             .unwrap()
//!             .with_delay(Duration::from_millis(150));
//!         let cmd = banner.init();
//!         (Self { banner }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.banner.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("|{}|", self.banner.view())
//!     }
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_marquee::scroller::Model;
//!
//! let mut scroller = Model::new(10, "Hi").unwrap();
//! assert_eq!(scroller.advance(), "          ");
//! ```

pub mod error;
pub mod key;
pub mod runeutil;
pub mod scroller;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused scroller reacts to its key bindings; a blurred one ignores key
/// messages but keeps scrolling on its timer.
///
/// ```rust
/// use bubbletea_marquee::prelude::*;
///
/// let mut scroller = Scroller::new(5, "text").unwrap();
/// assert!(!scroller.focused());
///
/// scroller.focus();
/// assert!(scroller.focused());
///
/// scroller.blur();
/// assert!(!scroller.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for focus-related initialization.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use error::{Error, Result};
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use scroller::{
    new as scroller_new, Bounds, Direction, LineEnd, Model as Scroller, Orientation,
    RenderOptions, Repeat, ScrollWindow, ScrollerKeyMap, ScrollerOption, State,
    TickMsg as ScrollerTickMsg,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_marquee::prelude::*;
///
/// let scroller = Scroller::new(8, "hello")
///     .unwrap()
///     .with_orientation(Orientation::Right);
/// assert_eq!(scroller.state(), State::Idle);
/// ```
pub mod prelude {
    pub use crate::key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
    pub use crate::scroller::{
        new as scroller_new, with_bounds, with_delay, with_filler, with_formatter,
        with_include_first, with_include_last, with_key_map, with_orientation, with_repeat,
        with_style, Bounds, Direction, LineEnd, Model as Scroller, Orientation, RenderOptions,
        Repeat, ScrollWindow, ScrollerKeyMap, ScrollerOption, State, TickMsg as ScrollerTickMsg,
    };
    pub use crate::Component;
}
