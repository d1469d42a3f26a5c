use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner on stderr while calendar exports load. Hidden when stderr is
/// not a terminal.
pub fn loading_spinner(what: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(format!("Loading {what}"));
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style.tick_strings(&["-", "\\", "|", "/", " "]));
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
