//! Counts down a harmonic series with a custom format, extra string fields and a
//! different look.
//!
//! Run with `cargo run --release --example advanced`.

use line_progress::{Config, ProgressBar};
use tracing_subscriber::EnvFilter;

const START: u64 = 500_000_000;

#[allow(clippy::cast_precision_loss)]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config {
        format: "%s %p [%b] %w (ET: %e, RT: %r, load %L) partial sum: %s".into(),
        update_period: 0.1,
        bar_fill: '=',
        wheel: ".oOo".into(),
    };
    let mut bar = ProgressBar::builder(START as f64, 0.0)
        .with_config(config)
        .with_output(std::io::stdout())
        .build();

    let mut sum = 0.0;
    for n in (1..=START).rev() {
        sum += 1.0 / n as f64;

        // The strings are only built when the bar is about to redraw.
        if bar.should_accept(n as f64) {
            let position = format!("{n}/{START}");
            let partial = format!("{sum:.6}");
            bar.print_with(n as f64, &[&position, &partial]);
        }
    }
    let total = format!("{sum:.6}");
    bar.close_with(&["done", &total]);

    println!("final sum: {total}");
}
