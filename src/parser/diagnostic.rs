//! Non-fatal parse events.
//!
//! Content-level anomalies never abort a parse. They are handed to a
//! [`DiagnosticSink`] and parsing continues.

use serde::{Deserialize, Serialize};

/// A content-level anomaly found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A v5 record whose tag is not handled; its payload was skipped.
    UnrecognizedTag {
        /// Raw tag id
        tag: u16,
        /// Tag name, or "UNKNOWN"
        name: String,
        /// Record level
        level: u16,
    },

    /// A v3 character-stream code outside the defined control set.
    UnrecognizedControlCode {
        /// Raw code unit
        code: u16,
        /// Stream position right after the code
        offset: u64,
    },

    /// A v3 printable code with no Unicode mapping; nothing was emitted.
    UnmappedCharacter {
        /// Raw legacy code
        code: u16,
    },

    /// The section count in DocInfo differs from the container.
    SectionCountMismatch {
        /// Count declared in the document properties record
        declared: u16,
        /// Sections present in the container
        found: usize,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnrecognizedTag { tag, name, level } => {
                write!(f, "{}: not implemented (tag {:#x}, level {})", name, tag, level)
            }
            Diagnostic::UnrecognizedControlCode { code, offset } => {
                write!(f, "special character: {:04x} at offset {}", code, offset)
            }
            Diagnostic::UnmappedCharacter { code } => {
                write!(f, "unmapped character: {:04x}", code)
            }
            Diagnostic::SectionCountMismatch { declared, found } => {
                write!(f, "document declares {} sections, found {}", declared, found)
            }
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    /// Accept one diagnostic. Must not fail.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sink that forwards every diagnostic to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
    }
}

/// Logs each diagnostic and keeps it.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink for Collector {
    fn report(&mut self, diagnostic: Diagnostic) {
        LogSink.report(diagnostic.clone());
        self.diagnostics.push(diagnostic);
    }
}
