//! Parser warnings with colored terminal output.
//!
//! Provides deduplication so that a document with thousands of identical parse
//! errors (for example a stray `</p>` in a generated table) prints each
//! distinct message only once.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Severity used to pick the output color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A recoverable parse error.
    Error,
    /// An informational warning (legacy doctype, quirks mode, ...).
    Warning,
}

/// Returns true the first time `key` is seen since the last [`clear_warnings`].
fn first_time(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a parse anomaly (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "missing-semicolon-after-character-reference at 3:14");
/// ```
pub fn warn_once(component: &str, message: &str) {
    report_once(component, message, Severity::Warning);
}

/// Like [`warn_once`], but with an explicit severity.
pub fn report_once(component: &str, message: &str, severity: Severity) {
    let key = format!("[{component}] {message}");
    if !first_time(key) {
        return;
    }
    eprintln!("{}", render(component, message, severity));
}

/// The colored line printed for one report.
fn render(component: &str, message: &str, severity: Severity) -> String {
    match severity {
        Severity::Error => format!("[Sapling {component}] ✖ {message}").red().to_string(),
        Severity::Warning => format!("[Sapling {component}] ⚠ {message}").yellow().to_string(),
    }
}

/// Clear all recorded warnings (call when starting a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_are_suppressed() {
        clear_warnings();
        assert!(first_time("[T] once".to_string()));
        assert!(!first_time("[T] once".to_string()));
        assert!(first_time("[T] twice".to_string()));
    }

    #[test]
    fn severity_picks_the_color() {
        let error = render("HTML Parser", "eof-in-tag", Severity::Error);
        assert_eq!(error, "\x1b[31m[Sapling HTML Parser] ✖ eof-in-tag\x1b[39m");
        let warning = render("HTML Parser", "quirks mode", Severity::Warning);
        assert_eq!(warning, "\x1b[33m[Sapling HTML Parser] ⚠ quirks mode\x1b[39m");
    }
}
