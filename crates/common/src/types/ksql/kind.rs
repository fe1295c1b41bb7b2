use crate::error::diagnostics::DiagnosticMessage;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Semantic data kind of a stream/table column.
///
/// Every kind has exactly one wire spelling, produced by
/// [`Kind::kafka_representation`] (and `Display`). Parsing accepts the wire spelling
/// plus a couple of common aliases (`INTEGER`, `STRING`, `BOOL`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Kind {
    Int,
    BigInt,
    Double,
    Boolean,
    Varchar,
    Bytes,
    Date,
    Time,
    Timestamp,
    Array(Box<Kind>),
    /// Map keys are always `VARCHAR` in the dialect, only the value kind varies.
    Map(Box<Kind>),
}

impl Kind {
    pub fn array(inner: Kind) -> Self {
        Kind::Array(Box::new(inner))
    }

    pub fn map(value: Kind) -> Self {
        Kind::Map(Box::new(value))
    }

    /// Canonical type keyword understood by the streaming engine.
    pub fn kafka_representation(&self) -> String {
        match self {
            Kind::Int => "INT".to_string(),
            Kind::BigInt => "BIGINT".to_string(),
            Kind::Double => "DOUBLE".to_string(),
            Kind::Boolean => "BOOLEAN".to_string(),
            Kind::Varchar => "VARCHAR".to_string(),
            Kind::Bytes => "BYTES".to_string(),
            Kind::Date => "DATE".to_string(),
            Kind::Time => "TIME".to_string(),
            Kind::Timestamp => "TIMESTAMP".to_string(),
            Kind::Array(inner) => format!("ARRAY<{}>", inner.kafka_representation()),
            Kind::Map(value) => format!("MAP<VARCHAR, {}>", value.kafka_representation()),
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kafka_representation())
    }
}

#[derive(Debug, Error)]
pub enum KindParseError {
    #[error("unknown kind: {context}")]
    Unknown { context: DiagnosticMessage },
    #[error("malformed kind: {context}")]
    Malformed { context: DiagnosticMessage },
}

impl KindParseError {
    #[track_caller]
    pub fn unknown(raw: impl Into<String>) -> Self {
        Self::Unknown {
            context: DiagnosticMessage::new(format!("`{}` is not a supported type", raw.into())),
        }
    }

    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            context: DiagnosticMessage::new(message.into()),
        }
    }
}

/// Splits `K, V` on the first comma that is not nested inside `<...>`.
fn split_top_level(raw: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (idx, ch) in raw.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some((raw[..idx].trim(), raw[idx + 1..].trim())),
            _ => {}
        }
    }
    None
}

fn generic_body<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    raw.strip_prefix(prefix)?
        .trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
        .map(str::trim)
}

impl FromStr for Kind {
    type Err = KindParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_uppercase();
        let kind = match normalized.as_str() {
            "INT" | "INTEGER" => Kind::Int,
            "BIGINT" => Kind::BigInt,
            "DOUBLE" => Kind::Double,
            "BOOLEAN" | "BOOL" => Kind::Boolean,
            "VARCHAR" | "STRING" => Kind::Varchar,
            "BYTES" => Kind::Bytes,
            "DATE" => Kind::Date,
            "TIME" => Kind::Time,
            "TIMESTAMP" => Kind::Timestamp,
            other => {
                if let Some(inner) = generic_body(other, "ARRAY") {
                    return Ok(Kind::array(inner.parse()?));
                }
                if let Some(body) = generic_body(other, "MAP") {
                    let (key, value) = split_top_level(body).ok_or_else(|| {
                        let message = format!("`{raw}` must name a key and a value type");
                        KindParseError::malformed(message)
                    })?;
                    let key: Kind = key.parse()?;
                    if key != Kind::Varchar {
                        return Err(KindParseError::malformed(format!(
                            "`{raw}` map keys must be VARCHAR, got {key}"
                        )));
                    }
                    return Ok(Kind::map(value.parse()?));
                }
                return Err(KindParseError::unknown(raw.trim()));
            }
        };
        Ok(kind)
    }
}

impl TryFrom<String> for Kind {
    type Error = KindParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.kafka_representation()
    }
}
