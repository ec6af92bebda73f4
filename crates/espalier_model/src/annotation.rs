//! Annotations: out-of-band findings attached to the model, not to nodes.
//!
//! The explorer and finish actions use these to report problems without
//! aborting construction (a failing assembly, an unresolvable dependency).

use crate::element::ElementId;

/// How serious an annotation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationSeverity {
    Error,
    Warning,
    Info,
}

impl AnnotationSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationSeverity::Error => "error",
            AnnotationSeverity::Warning => "warning",
            AnnotationSeverity::Info => "info",
        }
    }
}

/// One finding recorded during model construction.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub severity: AnnotationSeverity,
    /// The code element the finding concerns, when known.
    pub element: Option<ElementId>,
    pub message: String,
    pub details: Option<String>,
}

impl Annotation {
    pub fn error(element: Option<ElementId>, message: impl Into<String>) -> Self {
        Self::new(AnnotationSeverity::Error, element, message)
    }

    pub fn warning(element: Option<ElementId>, message: impl Into<String>) -> Self {
        Self::new(AnnotationSeverity::Warning, element, message)
    }

    pub fn info(element: Option<ElementId>, message: impl Into<String>) -> Self {
        Self::new(AnnotationSeverity::Info, element, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn new(severity: AnnotationSeverity, element: Option<ElementId>, message: impl Into<String>) -> Self {
        Self {
            severity,
            element,
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_severity_and_details() {
        let a = Annotation::warning(Some(3), "unresolved dependency target").with_details("no element named X");
        assert_eq!(a.severity, AnnotationSeverity::Warning);
        assert_eq!(a.element, Some(3));
        assert_eq!(a.details.as_deref(), Some("no element named X"));
        assert_eq!(a.severity.as_str(), "warning");
    }
}
