//! Pluggable reporting of parse issues.
//!
//! Reporting is observational only: nothing a sink does can change how the
//! parser recovers.

use std::cell::RefCell;
use std::rc::Rc;

use sapling_common::warning::{Severity, report_once, warn_once};

use crate::error::ParseIssue;

/// Receives parse errors and warnings as they are found.
pub trait DiagnosticSink {
    /// A parse error.
    fn error(&mut self, issue: ParseIssue);

    /// An advisory warning.
    fn warning(&mut self, issue: ParseIssue);
}

/// Collects every issue in order.
///
/// Clones share the same list, so one clone can be boxed into the parser
/// while the caller keeps another to read the issues back.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    issues: Rc<RefCell<Vec<ParseIssue>>>,
}

impl CollectingSink {
    /// An empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the issues collected so far.
    #[must_use]
    pub fn take(&self) -> Vec<ParseIssue> {
        std::mem::take(&mut *self.issues.borrow_mut())
    }

    /// Number of issues collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.borrow().len()
    }

    /// Whether nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn error(&mut self, issue: ParseIssue) {
        self.issues.borrow_mut().push(issue);
    }

    fn warning(&mut self, issue: ParseIssue) {
        self.issues.borrow_mut().push(issue);
    }
}

/// Prints each distinct issue once to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarnOnceSink;

impl DiagnosticSink for WarnOnceSink {
    fn error(&mut self, issue: ParseIssue) {
        report_once("HTML Parser", &issue.to_string(), Severity::Error);
    }

    fn warning(&mut self, issue: ParseIssue) {
        warn_once("HTML Parser", &issue.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::tokenizer::Position;

    #[test]
    fn collecting_clones_share_one_list() {
        let reader = CollectingSink::new();
        let mut writer = reader.clone();
        writer.error(ParseIssue::lexical(ErrorCode::EofInTag, Position::START));
        writer.warning(ParseIssue::lexical(ErrorCode::EofInTag, Position::START).as_warning());
        assert_eq!(reader.len(), 2);

        let issues = reader.take();
        assert!(issues[0].is_error);
        assert!(!issues[1].is_error);
        assert!(reader.is_empty());
    }
}
