//! Scrolls a line of text across the terminal.
//!
//! Run with `cargo run --example marquee -- "some text" --width 12 --delay 0.2 --cycles 3`.
//! Set `RUST_LOG=debug` to see the scroller's lifecycle events on stderr.

use bubbletea_marquee::scroller::{Model, Orientation, RenderOptions, Repeat};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Scroll a line of text across the terminal")]
struct Cli {
    /// Text to scroll
    #[arg(default_value = "https://github.com/whit3rabbit/bubbles-rs")]
    text: String,

    /// Number of characters visible at once
    #[arg(short, long, default_value_t = 10)]
    width: usize,

    /// Seconds between frames
    #[arg(short, long, default_value_t = 0.3)]
    delay: f64,

    /// Full cycles to run before exiting; runs until interrupted when omitted
    #[arg(short, long)]
    cycles: Option<usize>,

    /// Direction the text travels
    #[arg(short, long, value_enum, default_value_t = Travel::Left)]
    travel: Travel,

    /// Skip the blank frame the text enters from
    #[arg(long)]
    skip_first: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Travel {
    Left,
    Right,
}

fn main() -> bubbletea_marquee::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let orientation = match cli.travel {
        Travel::Left => Orientation::Left,
        Travel::Right => Orientation::Right,
    };
    let repeat = cli.cycles.map_or(Repeat::Infinite, Repeat::Finite);

    let mut scroller = Model::new(cli.width, cli.text)?
        .with_orientation(orientation)
        .with_include_first(!cli.skip_first)
        .with_delay_secs(cli.delay);
    let opts = RenderOptions::new().with_prefix("|").with_suffix("|");
    scroller.repeat(repeat, &opts)
}
