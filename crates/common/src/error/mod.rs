pub mod diagnostics;

pub use crate::config::error::ConfigError;
pub use crate::types::ksql::KindParseError;
pub use diagnostics::DiagnosticMessage;
