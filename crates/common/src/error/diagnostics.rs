use std::{borrow::Cow, fmt, panic::Location};

/// Human-friendly error message that records where it was raised.
///
/// Build one with [`DiagnosticMessage::new`] or the [`diag!`] macro. Both capture the
/// caller location through `#[track_caller]`, so an error constructed inside a helper
/// points at the line that asked for it rather than at the helper itself.
#[derive(Clone, Debug)]
pub struct DiagnosticMessage {
    message: Cow<'static, str>,
    subject: Option<String>,
    location: &'static Location<'static>,
}

impl DiagnosticMessage {
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            subject: None,
            location: Location::caller(),
        }
    }

    /// Attach the name of the object (stream, record type, file) the message is about.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(subject) = &self.subject {
            write!(f, "[{subject}] ")?;
        }
        write!(
            f,
            "{} (at {}:{})",
            self.message,
            self.location.file(),
            self.location.line()
        )
    }
}

/// `format!`-style constructor for [`DiagnosticMessage`].
#[macro_export]
macro_rules! diag {
    ($msg:literal $(,)?) => {
        $crate::error::diagnostics::DiagnosticMessage::new($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::diagnostics::DiagnosticMessage::new(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_caller_line() {
        let line = line!() + 1;
        let msg = DiagnosticMessage::new("boom");
        assert_eq!(msg.location().line(), line);
        assert!(msg.location().file().ends_with("diagnostics.rs"));
    }

    #[test]
    fn subject_is_rendered_first() {
        let msg = diag!("unsupported type `{}`", "u64").with_subject("Orders");
        let text = msg.to_string();
        assert!(text.starts_with("[Orders] unsupported type `u64` (at "));
        assert_eq!(msg.subject(), Some("Orders"));
    }
}
