//! Tests for the scroller model and its drivers.

use super::*;
use crate::error::Error;
use crate::Component;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use unicode_segmentation::UnicodeSegmentation;

fn key(code: KeyCode) -> KeyMsg {
    KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    }
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

/// Accepts `limit` frames, then fails every write.
struct ClosingSink {
    frames: usize,
    limit: usize,
}

impl ClosingSink {
    fn new(limit: usize) -> Self {
        Self { frames: 0, limit }
    }
}

impl Write for ClosingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.frames >= self.limit {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"));
        }
        Ok(buf.len())
    }

    // render_line flushes once per frame.
    fn flush(&mut self) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }
}

#[test]
fn test_zero_width_is_invalid() {
    let err = Model::new(0, "text").unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(_)));

    let err = new(0, "text", vec![with_delay(Duration::from_millis(10))]).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}

#[test]
fn test_new_defaults() {
    let scroller = Model::new(10, "Hi").unwrap();
    assert_eq!(scroller.state(), State::Idle);
    assert_eq!(scroller.position(), 0);
    assert_eq!(scroller.delay(), Duration::ZERO);
    assert_eq!(scroller.window().effective_len(), 22);
    assert_eq!(scroller.window().orientation(), Orientation::Left);
    assert!(!scroller.focused());
    assert!(scroller.id() > 0);
}

#[test]
fn test_unique_ids() {
    let a = Model::default();
    let b = Model::default();
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_worked_example_frames() {
    let mut scroller = Model::new(10, "Hi").unwrap();
    let frames: Vec<String> = scroller.by_ref().take(11).collect();
    assert_eq!(frames[0], " ".repeat(10));
    assert_eq!(frames[7], "   Hi     ");
    assert_eq!(frames[10], "Hi        ");
    assert_eq!(scroller.position(), 11);
    assert_eq!(scroller.state(), State::Running);
}

#[test]
fn test_advance_returns_then_steps() {
    let mut scroller = Model::new(3, "ab").unwrap();
    assert_eq!(scroller.frame(), "   ");
    assert_eq!(scroller.advance(), "   ");
    assert_eq!(scroller.frame(), "  a");
    assert_eq!(scroller.steps(), 1);
}

#[test]
fn test_text_is_sanitized() {
    let scroller = Model::new(4, "one\ntwo\tthree\x07").unwrap();
    assert_eq!(scroller.text(), "one two three");
}

#[test]
fn test_frames_have_exact_width() {
    let mut scroller = Model::new(7, "marquee ✨ text").unwrap();
    for _ in 0..scroller.cycle_len() * 2 {
        assert_eq!(scroller.advance().graphemes(true).count(), 7);
    }
}

#[test]
fn test_full_cycle_returns_to_start() {
    let mut scroller = Model::new(5, "cycle").unwrap().with_orientation(Orientation::Right);
    let start = scroller.position();
    let cycle = scroller.cycle_len();
    let first: Vec<String> = scroller.by_ref().take(cycle).collect();
    assert_eq!(scroller.position(), start);
    let second: Vec<String> = scroller.by_ref().take(first.len()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_formatter_does_not_change_progression() {
    let mut plain = Model::new(4, "abc").unwrap();
    let mut decorated = Model::new(4, "abc")
        .unwrap()
        .with_formatter(|s| format!("<{}>", s.to_uppercase()));

    for _ in 0..plain.cycle_len() + 3 {
        let p = plain.advance();
        let d = decorated.advance();
        assert_eq!(d, format!("<{}>", p.to_uppercase()));
        assert_eq!(plain.position(), decorated.position());
    }
}

#[test]
fn test_options_apply_in_order() {
    let scroller = new(
        4,
        "abc",
        vec![
            with_orientation(Orientation::Right),
            with_bounds(Bounds::Modulo),
            with_include_last(false),
            with_filler('.'),
            with_delay(Duration::from_millis(5)),
            with_repeat(Repeat::Finite(2)),
        ],
    )
    .unwrap();

    assert_eq!(scroller.window().effective_len(), 3);
    assert_eq!(scroller.cycle_len(), 3);
    assert_eq!(scroller.position(), 2);
    assert_eq!(scroller.frame(), "c...");
    assert_eq!(scroller.delay(), Duration::from_millis(5));
}

#[test]
fn test_negative_delay_clamps_to_zero() {
    let scroller = Model::new(3, "x").unwrap().with_delay_secs(-1.5);
    assert_eq!(scroller.delay(), Duration::ZERO);
    assert_eq!(delay_from_secs(f64::NAN), Duration::ZERO);
    assert_eq!(delay_from_secs(0.25), Duration::from_millis(250));
}

#[test]
fn test_step_backward_wraps_from_zero() {
    let mut scroller = Model::new(10, "Hi").unwrap();
    scroller.step_backward();
    assert_eq!(scroller.position(), 22 - 10);
    scroller.step_forward();
    assert_eq!(scroller.position(), 0);
}

#[test]
fn test_step_backward_on_right_scroller_moves_up() {
    let mut scroller = Model::new(3, "ab").unwrap().with_orientation(Orientation::Right);
    let last = scroller.window().last_position();
    assert_eq!(scroller.position(), last);
    scroller.step_backward();
    assert_eq!(scroller.position(), 0);
    scroller.step_backward();
    assert_eq!(scroller.position(), 1);
}

#[test]
fn test_zero_delay_steps_do_not_block() {
    let mut scroller = Model::new(4, "fast").unwrap();
    assert!(scroller.start().is_none());
    let started = Instant::now();
    for _ in 0..1000 {
        scroller.step_forward();
        scroller.step_backward();
    }
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(scroller.position(), 0);
}

#[test]
fn test_restart_resets_to_idle() {
    let mut scroller = Model::new(4, "abc").unwrap().with_orientation(Orientation::Right);
    let initial = scroller.position();
    scroller.advance();
    scroller.advance();
    assert_eq!(scroller.state(), State::Running);
    scroller.restart();
    assert_eq!(scroller.state(), State::Idle);
    assert_eq!(scroller.position(), initial);
    assert_eq!(scroller.steps(), 0);
}

#[test]
fn test_start_stop_toggle() {
    let mut scroller = Model::new(4, "abc").unwrap().with_delay(Duration::from_millis(10));
    assert!(scroller.start().is_some());
    assert!(scroller.running());
    scroller.stop();
    assert_eq!(scroller.state(), State::Idle);
    assert!(scroller.toggle().is_some());
    assert!(scroller.running());
    assert!(scroller.toggle().is_none());
    assert!(!scroller.running());
}

#[test]
fn test_tick_advances_running_scroller() {
    let mut scroller = Model::new(3, "ab").unwrap().with_delay(Duration::from_millis(10));
    scroller.start();
    let cmd = scroller.update(Box::new(scroller.tick_msg()));
    assert!(cmd.is_some());
    assert_eq!(scroller.position(), 1);
    assert_eq!(scroller.view(), "  a");
}

#[test]
fn test_tick_ignored_when_idle() {
    let mut scroller = Model::new(3, "ab").unwrap().with_delay(Duration::from_millis(10));
    let cmd = scroller.update(Box::new(scroller.tick_msg()));
    assert!(cmd.is_none());
    assert_eq!(scroller.position(), 0);
}

#[test]
fn test_tick_with_wrong_id_rejected() {
    let mut scroller = Model::new(3, "ab").unwrap().with_delay(Duration::from_millis(10));
    scroller.start();
    let mut tick = scroller.tick_msg();
    tick.id = scroller.id() + 999;
    assert!(scroller.update(Box::new(tick)).is_none());
    assert_eq!(scroller.position(), 0);
}

#[test]
fn test_stale_tick_rejected() {
    let mut scroller = Model::new(3, "ab").unwrap().with_delay(Duration::from_millis(10));
    scroller.start();
    let stale = scroller.tick_msg();
    assert!(scroller.update(Box::new(stale.clone())).is_some());
    assert!(scroller.update(Box::new(stale)).is_none());
    assert_eq!(scroller.position(), 1);
}

#[test]
fn test_finite_repeat_stops_ticking() {
    let mut scroller = Model::new(2, "a")
        .unwrap()
        .with_delay(Duration::from_millis(10))
        .with_repeat(Repeat::Finite(1));
    let cycle = scroller.cycle_len();
    scroller.start();
    for _ in 0..cycle - 1 {
        assert!(scroller.update(Box::new(scroller.tick_msg())).is_some());
    }
    assert!(scroller.update(Box::new(scroller.tick_msg())).is_none());
    assert_eq!(scroller.state(), State::Idle);
    assert_eq!(scroller.steps(), cycle);
    assert_eq!(scroller.ticks(), cycle);
    assert_eq!(scroller.position(), 0);
}

#[test]
fn test_zero_repeat_takes_no_ticks() {
    let mut scroller = Model::new(2, "a")
        .unwrap()
        .with_delay(Duration::from_millis(10))
        .with_repeat(Repeat::Finite(0));
    assert!(scroller.init().is_none());
    assert_eq!(scroller.state(), State::Idle);
    assert!(scroller.update(Box::new(scroller.tick_msg())).is_none());
    assert_eq!(scroller.position(), 0);
    assert_eq!(scroller.steps(), 0);

    // A key step makes it running, but a tick still has no cycles to spend.
    scroller.step_forward();
    assert!(scroller.running());
    assert!(scroller.update(Box::new(scroller.tick_msg())).is_none());
    assert_eq!(scroller.position(), 1);
    assert_eq!(scroller.ticks(), 0);
    assert_eq!(scroller.state(), State::Idle);
}

#[test]
fn test_key_steps_do_not_shorten_timed_repeat() {
    let mut scroller = Model::new(2, "a")
        .unwrap()
        .with_delay(Duration::from_millis(10))
        .with_repeat(Repeat::Finite(1));
    let cycle = scroller.cycle_len();
    assert_eq!(cycle, 4);

    assert!(scroller.start().is_some());
    scroller.step_forward();
    scroller.step_backward();
    assert_eq!(scroller.steps(), 2);

    let mut ticks = 0;
    loop {
        ticks += 1;
        if scroller.update(Box::new(scroller.tick_msg())).is_none() {
            break;
        }
    }
    assert_eq!(ticks, cycle);
    assert_eq!(scroller.ticks(), cycle);
    assert_eq!(scroller.steps(), cycle + 2);
    assert_eq!(scroller.position(), 0);
    assert_eq!(scroller.state(), State::Idle);
}

#[test]
fn test_restart_clears_tick_count() {
    let mut scroller = Model::new(2, "a")
        .unwrap()
        .with_delay(Duration::from_millis(10))
        .with_repeat(Repeat::Finite(1));
    scroller.start();
    scroller.update(Box::new(scroller.tick_msg()));
    assert_eq!(scroller.ticks(), 1);
    scroller.restart();
    assert_eq!(scroller.ticks(), 0);
    assert!(scroller.start().is_some());
}

#[test]
fn test_keys_ignored_without_focus() {
    let mut scroller = Model::new(3, "ab").unwrap();
    scroller.update(Box::new(key(KeyCode::Right)));
    assert_eq!(scroller.position(), 0);
}

#[test]
fn test_keys_step_focused_scroller() {
    let mut scroller = Model::new(3, "ab").unwrap();
    scroller.focus();
    scroller.update(Box::new(key(KeyCode::Right)));
    scroller.update(Box::new(key(KeyCode::Char('l'))));
    assert_eq!(scroller.position(), 2);
    scroller.update(Box::new(key(KeyCode::Left)));
    assert_eq!(scroller.position(), 1);
    scroller.update(Box::new(key(KeyCode::Char('q'))));
    assert_eq!(scroller.position(), 1);

    scroller.blur();
    scroller.update(Box::new(key(KeyCode::Right)));
    assert_eq!(scroller.position(), 1);
}

#[test]
fn test_toggle_key_starts_timer() {
    let mut scroller = Model::new(3, "ab").unwrap().with_delay(Duration::from_millis(10));
    scroller.focus();
    let cmd = scroller.update(Box::new(key(KeyCode::Char(' '))));
    assert!(cmd.is_some());
    assert!(scroller.running());
}

#[test]
fn test_repeat_to_runs_exact_steps() {
    let mut scroller = Model::new(4, "abc").unwrap();
    let cycle = scroller.cycle_len();
    let mut buf = Vec::new();
    let opts = RenderOptions::new().with_line_end(LineEnd::Newline);
    scroller.repeat_to(&mut buf, Repeat::Finite(3), &opts).unwrap();

    assert_eq!(scroller.steps(), 3 * cycle);
    assert_eq!(scroller.state(), State::Idle);
    assert_eq!(scroller.position(), 0);
    assert_eq!(output(buf).matches('\n').count(), 3 * cycle);
}

#[test]
fn test_modulo_repeat_runs_effective_len_per_cycle() {
    let mut scroller = Model::new(4, "abc").unwrap().with_bounds(Bounds::Modulo);
    let len = scroller.window().effective_len();
    assert_eq!(scroller.cycle_len(), len);

    let mut buf = Vec::new();
    let opts = RenderOptions::new().with_line_end(LineEnd::Newline);
    scroller.repeat_to(&mut buf, Repeat::Finite(2), &opts).unwrap();

    assert_eq!(scroller.steps(), 2 * len);
    assert_eq!(scroller.position(), 0);
    assert_eq!(scroller.state(), State::Idle);
    assert_eq!(output(buf).matches('\n').count(), 2 * len);
}

#[test]
fn test_run_to_keeps_going_until_write_fails() {
    let mut scroller = Model::new(3, "ab").unwrap();
    let cycle = scroller.cycle_len();
    let mut sink = ClosingSink::new(3 * cycle);

    let err = scroller.run_to(&mut sink, &RenderOptions::new()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(sink.frames, 3 * cycle);
    assert!(scroller.steps() > cycle);
}

#[test]
fn test_infinite_repeat_matches_run_to() {
    let mut scroller = Model::new(3, "ab").unwrap();
    let cycle = scroller.cycle_len();
    let mut sink = ClosingSink::new(2 * cycle + 1);

    let err = scroller
        .repeat_to(&mut sink, Repeat::Infinite, &RenderOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(sink.frames, 2 * cycle + 1);
    assert!(scroller.steps() > 2 * cycle);
    assert_eq!(scroller.position(), 2);
}

#[test]
fn test_include_first_option_skips_entry_frame() {
    let mut scroller = new(3, "ab", vec![with_include_first(false)]).unwrap();
    assert_eq!(scroller.position(), 1);
    assert_eq!(scroller.frame(), "  a");
    let cycle = scroller.cycle_len();
    assert_eq!(cycle, 5);

    let frames: Vec<String> = scroller.by_ref().take(cycle).collect();
    assert_eq!(frames.iter().filter(|f| f.trim().is_empty()).count(), 1);
    assert_eq!(scroller.position(), 1);

    scroller.step_backward();
    scroller.restart();
    assert_eq!(scroller.position(), 1);
}

#[test]
fn test_include_first_survives_rebuild() {
    let scroller = Model::new(3, "ab")
        .unwrap()
        .with_include_first(false)
        .with_orientation(Orientation::Right);
    assert_eq!(scroller.frame(), "b  ");
    assert_eq!(scroller.cycle_len(), 5);
}

#[test]
fn test_include_first_repeat_counts_shorter_cycle() {
    let mut scroller = Model::new(3, "ab").unwrap().with_include_first(false);
    let mut buf = Vec::new();
    let opts = RenderOptions::new().with_line_end(LineEnd::Newline);
    scroller.repeat_to(&mut buf, Repeat::Finite(1), &opts).unwrap();
    assert_eq!(scroller.steps(), 5);
    assert_eq!(output(buf).matches('\n').count(), 5);
}

#[test]
fn test_repeat_zero_renders_nothing() {
    let mut scroller = Model::new(4, "abc").unwrap();
    let mut buf = Vec::new();
    scroller
        .repeat_to(&mut buf, Repeat::Finite(0), &RenderOptions::new())
        .unwrap();
    assert!(buf.is_empty());
    assert_eq!(scroller.state(), State::Idle);
}

#[test]
fn test_in_place_repeat_ends_with_newline() {
    let mut scroller = Model::new(3, "Hi").unwrap();
    let mut buf = Vec::new();
    let opts = RenderOptions::new().with_prefix("|").with_suffix("|");
    scroller.repeat_to(&mut buf, Repeat::Finite(1), &opts).unwrap();

    let out = output(buf);
    assert!(out.contains("| Hi|"));
    assert!(out.contains("|Hi |"));
    assert!(out.ends_with("|   |\n"));
    assert_eq!(out.matches('\n').count(), 1);
}

#[test]
fn test_empty_unpadded_text_renders_blanks() {
    let mut scroller = Model::new(4, "").unwrap().with_include_last(false);
    for _ in 0..5 {
        assert_eq!(scroller.advance(), "    ");
    }
}

#[test]
fn test_view_applies_formatter() {
    let scroller = Model::new(2, "x")
        .unwrap()
        .with_formatter(|s| format!("[{}]", s));
    assert_eq!(scroller.view(), "[  ]");
}
