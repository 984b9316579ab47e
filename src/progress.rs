//! Progress reporting helpers.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner counting units written for one dump configuration. The total is
/// unknown up front (extraction is lazy), so this counts rather than bars.
pub fn make_unit_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} {pos} units  elapsed: {elapsed_precise}",
    )
    .unwrap();
    pb.set_style(style);
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
