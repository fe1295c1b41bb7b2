use core::fmt;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Serialization format of a topic's key or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "JSON_SR")]
    JsonSr,
    #[serde(rename = "AVRO")]
    Avro,
    #[serde(rename = "PROTOBUF")]
    Protobuf,
    #[serde(rename = "PROTOBUF_NOSR")]
    ProtobufNoSr,
    #[serde(rename = "DELIMITED")]
    Delimited,
    #[serde(rename = "KAFKA")]
    Kafka,
    #[serde(rename = "NONE")]
    None,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "JSON",
            Format::JsonSr => "JSON_SR",
            Format::Avro => "AVRO",
            Format::Protobuf => "PROTOBUF",
            Format::ProtobufNoSr => "PROTOBUF_NOSR",
            Format::Delimited => "DELIMITED",
            Format::Kafka => "KAFKA",
            Format::None => "NONE",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_registry_variants_keep_their_suffix() {
        let parsed: Format = serde_yaml::from_str("PROTOBUF_NOSR").unwrap();
        assert_eq!(parsed, Format::ProtobufNoSr);
        assert_eq!(Format::JsonSr.to_string(), "JSON_SR");
    }
}
