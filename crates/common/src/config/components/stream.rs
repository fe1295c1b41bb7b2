use crate::config::traits::ConfigName;
use crate::types::ksql::{Format, Reference, SearchField};
use serde::{Deserialize, Serialize};

// ---------------- Stream Settings ----------------
/// Topic-level settings that end up in a CREATE statement's `WITH (...)` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSettings {
    #[serde(default)]
    pub source_topic: Option<String>,
    #[serde(default = "default_format")]
    pub format: Format,
    #[serde(default)]
    pub key_format: Option<Format>,
    /// Required by the engine only when the source topic does not exist yet.
    #[serde(default)]
    pub partitions: Option<u32>,
    #[serde(default)]
    pub replicas: Option<u32>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

fn default_format() -> Format {
    Format::Json
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            source_topic: None,
            format: default_format(),
            key_format: None,
            partitions: None,
            replicas: None,
            timestamp: None,
        }
    }
}

impl StreamSettings {
    pub fn with_source_topic(mut self, topic: impl Into<String>) -> Self {
        self.source_topic = Some(topic.into());
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_partitions(mut self, partitions: u32) -> Self {
        self.partitions = Some(partitions);
        self
    }
}

// ---------------- Stream Declaration ----------------
/// A stream or table described in a YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDeclaration {
    pub name: String,
    pub target: Reference,
    #[serde(default)]
    pub fields: Vec<SearchField>,
    #[serde(default)]
    pub settings: StreamSettings,
}

impl ConfigName for StreamDeclaration {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ksql::Kind;
    use pretty_assertions::assert_eq;

    #[test]
    fn settings_default_to_json() {
        let decl: StreamDeclaration =
            serde_yaml::from_str("name: ORDERS\ntarget: STREAM\n").unwrap();
        assert_eq!(decl.settings, StreamSettings::default());
        assert_eq!(decl.settings.format, Format::Json);
        assert!(decl.fields.is_empty());
    }

    #[test]
    fn parses_full_declaration() {
        let yaml = r#"
name: PAYMENTS
target: TABLE
fields:
  - name: ID
    kind: BIGINT
  - name: TAGS
    kind: ARRAY<VARCHAR>
    relation: PAYMENTS
settings:
  source_topic: payments
  format: AVRO
  key_format: KAFKA
  partitions: 3
"#;
        let decl: StreamDeclaration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(decl.target, Reference::Table);
        assert_eq!(
            decl.fields,
            vec![
                SearchField::new("ID", Kind::BigInt),
                SearchField::new("TAGS", Kind::array(Kind::Varchar)).with_relation("PAYMENTS"),
            ]
        );
        assert_eq!(
            decl.settings,
            StreamSettings {
                source_topic: Some("payments".into()),
                format: Format::Avro,
                key_format: Some(Format::Kafka),
                partitions: Some(3),
                replicas: None,
                timestamp: None,
            }
        );
    }
}
