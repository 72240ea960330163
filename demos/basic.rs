//! Sums a long series with the default progress line on standard error.
//!
//! Run with `cargo run --release --example basic`. Redirect standard error to a
//! file and no progress is written.

use line_progress::ProgressBar;
use tracing_subscriber::EnvFilter;

const END: u64 = 2_000_000_000;

#[allow(clippy::cast_precision_loss)]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut bar = ProgressBar::new(1.0, END as f64);
    let mut sum = 0.0;
    for n in 1..=END {
        sum += n as f64;
        bar.print(n as f64);
    }
    let fields = bar.close();

    println!("sum = {sum:.0}");
    println!(
        "{:.2}s elapsed, {:.2}% spent drawing progress",
        fields.elapsed_time, fields.load_percent
    );
}
