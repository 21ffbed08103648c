//! Transient user notices
//!
//! Notices are short, user-facing status lines ("Created note: Rust"). They are not
//! part of the machine-readable result output and go to stderr.

use colored::Colorize;
#[cfg(test)]
use std::sync::Mutex;

/// Capability for showing a transient notice to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints notices to stderr
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    quiet: bool,
    color: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool, color: bool) -> Self {
        Self { quiet, color }
    }

    fn format(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", "›".cyan().bold(), message)
        } else {
            format!("› {}", message)
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        tracing::debug!(notice = message);
        if !self.quiet {
            eprintln!("{}", self.format(message));
        }
    }
}

/// Keeps every notice in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Whether any notice contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_format_plain() {
        let notifier = ConsoleNotifier::new(false, false);
        assert_eq!(notifier.format("Created note: Rust"), "› Created note: Rust");
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify("first");
        notifier.notify("second");

        assert_eq!(notifier.messages(), vec!["first", "second"]);
        assert!(notifier.contains("sec"));
        assert!(!notifier.contains("third"));
    }
}
