//! Build findings reported to the user.

use std::fmt;

use crate::config::Severity;
use crate::content::{
    ContentError,
    ContentStore,
    DanglingReference,
};
use crate::i18n::TRANSLATION_DATA_FILE;
use crate::i18n::parity::ParityGap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// One finding, located by file and optionally by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    /// File the finding is about, relative to the project root.
    pub path: String,
    /// Path to the field (e.g., "hardSkills[2].percentage")
    pub field_path: Option<String>,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            path: path.into(),
            field_path: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: DiagnosticSeverity::Warning, ..Self::error(path, message) }
    }

    #[must_use]
    pub fn with_field(mut self, field_path: impl Into<String>) -> Self {
        self.field_path = Some(field_path.into());
        self
    }

    /// One error per failed field, or a single error for the whole file.
    #[must_use]
    pub fn from_content_error(path: &str, error: &ContentError) -> Vec<Self> {
        match error {
            ContentError::Schema(errors) => errors
                .iter()
                .map(|e| Self::error(path, e.message.clone()).with_field(e.field_path.clone()))
                .collect(),
            other => vec![Self::error(path, other.to_string())],
        }
    }

    #[must_use]
    pub fn from_dangling(reference: &DanglingReference) -> Self {
        Self::error(reference.path.clone(), reference.message())
            .with_field(reference.field_path.clone())
    }

    /// `None` when the gap class is turned off.
    #[must_use]
    pub fn from_parity_gap(gap: &ParityGap, severity: Severity) -> Option<Self> {
        let diagnostic = match severity {
            Severity::Off => return None,
            Severity::Warning => Self::warning(TRANSLATION_DATA_FILE, gap.message()),
            Severity::Error => Self::error(TRANSLATION_DATA_FILE, gap.message()),
        };
        Some(diagnostic.with_field(format!("{}.{}", gap.table, gap.key)))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.path)?;
        if let Some(field_path) = &self.field_path {
            write!(f, " [{field_path}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Outcome of a workspace build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Entries that passed validation and reference checks.
    pub store: ContentStore,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == DiagnosticSeverity::Error)
    }

    #[must_use]
    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }
}
