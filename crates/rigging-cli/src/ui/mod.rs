//! Terminal status output.
//!
//! Status lines go to stderr; stdout is reserved for the assembled JSON.
//!
//! # Examples
//!
//! ```no_run
//! use rigging_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Configuration assembled");
//! ```

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{debug, error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support from the `--no-color` flag and the environment.
///
/// Should be called once in `main`, after argument parsing.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

/// Whether status lines are currently colored.
pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
