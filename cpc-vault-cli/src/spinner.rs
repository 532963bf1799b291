//! Single-line spinner for commands that wait on the network.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Start a spinner showing `msg`. Hidden when `quiet` is true.
pub(crate) fn start(msg: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
