#![deny(missing_docs)]
//! Shared logging utilities for the predictor workspace.
//!
//! This crate provides the `page_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every record is
//! prefixed with the sequence number of the page event being handled, so a
//! log can be lined up against the event script that produced it.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Thread-local storage for the sequence number of the current page event.
    static EVENT_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Sets the event sequence number for the current thread.
/// The page host calls this once before dispatching each event.
pub fn set_event_seq(seq: u64) {
    EVENT_SEQ.with(|v| v.set(seq));
}

/// Retrieves the event sequence number for the current thread.
/// Returns 0 before the first event has been dispatched.
pub fn event_seq() -> u64 {
    EVENT_SEQ.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current event sequence number.
#[macro_export]
macro_rules! page_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[evt {}] {}", $crate::event_seq(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current event sequence number.
#[macro_export]
macro_rules! page_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[evt {}] {}", $crate::event_seq(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current event sequence number.
#[macro_export]
macro_rules! page_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[evt {}] {}", $crate::event_seq(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current event sequence number.
#[macro_export]
macro_rules! page_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[evt {}] {}", $crate::event_seq(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current event sequence number.
#[macro_export]
macro_rules! page_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[evt {}] {}", $crate::event_seq(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_seq_is_per_thread() {
        set_event_seq(7);
        assert_eq!(event_seq(), 7);

        let other = std::thread::spawn(event_seq).join().unwrap();
        assert_eq!(other, 0);
    }

    #[test]
    fn macros_expand_without_a_logger() {
        set_event_seq(1);
        page_info!("field {} changed", "gender");
        page_warn!("plain message");
    }
}
