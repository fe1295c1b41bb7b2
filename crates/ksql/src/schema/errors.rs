use common::error::{DiagnosticMessage, KindParseError};
use thiserror::Error;

/// Raised while turning a record type into schema fields. These are programming
/// errors on the caller's side, so they are kept apart from the `None` a builder
/// returns for an incomplete statement.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unsupported field type: {context}")]
    UnsupportedType { context: DiagnosticMessage },
    #[error("invalid kind override: {context}")]
    InvalidKind {
        context: DiagnosticMessage,
        #[source]
        source: KindParseError,
    },
    #[error("empty field name: {context}")]
    EmptyName { context: DiagnosticMessage },
    #[error("duplicate field: {context}")]
    DuplicateField { context: DiagnosticMessage },
}

impl SchemaError {
    #[track_caller]
    pub fn unsupported_type(type_name: &str, field: &str, rust_type: &str) -> Self {
        Self::UnsupportedType {
            context: DiagnosticMessage::new(format!(
                "field `{field}` has type `{rust_type}` which has no ksql kind; \
                 annotate it with #[ksql(kind = \"...\")]"
            ))
            .with_subject(type_name),
        }
    }

    #[track_caller]
    pub fn invalid_kind(type_name: &str, field: &str, source: KindParseError) -> Self {
        Self::InvalidKind {
            context: DiagnosticMessage::new(format!("field `{field}`: {source}"))
                .with_subject(type_name),
            source,
        }
    }

    #[track_caller]
    pub fn empty_name(type_name: &str, field: &str) -> Self {
        Self::EmptyName {
            context: DiagnosticMessage::new(format!("field `{field}` is tagged with an empty name"))
                .with_subject(type_name),
        }
    }

    #[track_caller]
    pub fn duplicate_field(type_name: &str, name: &str) -> Self {
        Self::DuplicateField {
            context: DiagnosticMessage::new(format!("`{name}` is declared more than once"))
                .with_subject(type_name),
        }
    }
}
