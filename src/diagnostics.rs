//! Non-fatal problems found while reading annotations.
//!
//! Nothing in the annotation pipeline aborts a run. Malformed lines, unknown keys,
//! missing directives and failed example conversions are recorded here and reported
//! once the whole pass has finished.

use log::{error, warn};
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The offending line or value was skipped or defaulted
    Warning,
    /// A required directive was missing or invalid
    Error,
}

/// A single recorded problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Component type the problem belongs to (`schema`, `operation`, ...)
    pub component: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        };
        write!(f, "[{}] @@{}: {}", label, self.component, self.message)
    }
}

/// Append-only collector threaded through every builder call.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, component: &str, message: impl Into<String>) {
        self.push(Severity::Warning, component, message.into());
    }

    pub fn error(&mut self, component: &str, message: impl Into<String>) {
        self.push(Severity::Error, component, message.into());
    }

    fn push(&mut self, severity: Severity, component: &str, message: String) {
        self.entries.push(Diagnostic {
            severity,
            component: component.to_string(),
            message,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Emits every collected diagnostic through the `log` facade.
    pub fn report(&self) {
        if self.entries.is_empty() {
            return;
        }
        warn!("Messages while parsing annotations:");
        for diagnostic in &self.entries {
            match diagnostic.severity {
                Severity::Warning => warn!("  {}", diagnostic),
                Severity::Error => error!("  {}", diagnostic),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn("schema", "bad format of line: ???");
        diagnostics.error("operation", "no method specified");

        assert_eq!(diagnostics.len(), 2);
        let messages: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "[Warning] @@schema: bad format of line: ???".to_string(),
                "[Error] @@operation: no method specified".to_string(),
            ]
        );
    }

    #[test]
    fn test_severity_filters() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.has_errors());

        diagnostics.warn("path", "invalid name option: foo: bar");
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.warnings().count(), 1);

        diagnostics.error("parameter", "in is required for id");
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.errors().count(), 1);
    }
}
