use crate::field::quote;
use common::config::components::stream::StreamSettings;
use common::types::ksql::Format;
use core::fmt;
use log::debug;
use std::fmt::{Display, Formatter};

pub const KAFKA_TOPIC: &str = "KAFKA_TOPIC";
pub const VALUE_FORMAT: &str = "VALUE_FORMAT";
pub const KEY_FORMAT: &str = "KEY_FORMAT";
pub const PARTITIONS: &str = "PARTITIONS";
pub const REPLICAS: &str = "REPLICAS";
pub const TIMESTAMP: &str = "TIMESTAMP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

impl Display for MetaValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Text(text) => write!(f, "{}", quote(text)),
            MetaValue::Number(number) => write!(f, "{number}"),
            MetaValue::Flag(flag) => write!(f, "{}", if *flag { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<Format> for MetaValue {
    fn from(value: Format) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<u32> for MetaValue {
    fn from(value: u32) -> Self {
        MetaValue::Number(value.into())
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Number(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Flag(value)
    }
}

/// Properties of a `WITH (...)` clause, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing entry (keys compare case-insensitively) in
    /// place so the clause order stays stable. A blank key is ignored.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        let key = normalize_key(&key.into());
        if key.is_empty() {
            debug!("WITH property ignored: blank key");
            return self;
        }
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn kafka_topic(self, topic: impl Into<String>) -> Self {
        self.with(KAFKA_TOPIC, MetaValue::Text(topic.into()))
    }

    pub fn value_format(self, format: Format) -> Self {
        self.with(VALUE_FORMAT, format)
    }

    pub fn key_format(self, format: Format) -> Self {
        self.with(KEY_FORMAT, format)
    }

    pub fn partitions(self, partitions: u32) -> Self {
        self.with(PARTITIONS, partitions)
    }

    pub fn replicas(self, replicas: u32) -> Self {
        self.with(REPLICAS, replicas)
    }

    pub fn timestamp(self, column: impl Into<String>) -> Self {
        self.with(TIMESTAMP, MetaValue::Text(column.into()))
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }

    pub fn entries(&self) -> &[(String, MetaValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `WITH (K=V, ...) ` including the trailing space, or the empty string when
    /// there is nothing to say. Never fails.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let props = self
            .entries
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("WITH ({props}) ")
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&StreamSettings> for Metadata {
    fn from(settings: &StreamSettings) -> Self {
        let mut meta = Metadata::new();
        if let Some(topic) = &settings.source_topic {
            meta = meta.kafka_topic(topic.clone());
        }
        meta = meta.value_format(settings.format);
        if let Some(key_format) = settings.key_format {
            meta = meta.key_format(key_format);
        }
        if let Some(partitions) = settings.partitions {
            meta = meta.partitions(partitions);
        }
        if let Some(replicas) = settings.replicas {
            meta = meta.replicas(replicas);
        }
        if let Some(timestamp) = &settings.timestamp {
            meta = meta.timestamp(timestamp.clone());
        }
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_metadata_renders_nothing() {
        assert_eq!(Metadata::new().render(), "");
        assert!(!Metadata::new().to_string().contains("WITH"));
    }

    #[test]
    fn renders_in_insertion_order() {
        let meta = Metadata::new()
            .kafka_topic("orders")
            .value_format(Format::Json)
            .partitions(3);
        assert_eq!(
            meta.render(),
            "WITH (KAFKA_TOPIC='orders', VALUE_FORMAT='JSON', PARTITIONS=3) "
        );
    }

    #[test]
    fn same_key_replaces_in_place() {
        let meta = Metadata::new()
            .kafka_topic("a")
            .partitions(1)
            .with("kafka_topic", "b");
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get(KAFKA_TOPIC), Some(&MetaValue::Text("b".into())));
        assert!(meta.render().starts_with("WITH (KAFKA_TOPIC='b', "));
    }

    #[test]
    fn blank_keys_are_ignored_and_lookups_normalize() {
        let meta = Metadata::new().with("  ", "x").with("", 1i64).partitions(2);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.render(), "WITH (PARTITIONS=2) ");
        assert_eq!(meta.get(" partitions "), Some(&MetaValue::Number(2)));
        assert!(Metadata::new().with(" ", "x").is_empty());
    }

    #[test]
    fn built_from_stream_settings() {
        let settings = StreamSettings::default()
            .with_source_topic("examples-topics")
            .with_format(Format::Avro)
            .with_partitions(1);
        let meta = Metadata::from(&settings);
        assert_eq!(
            meta.render(),
            "WITH (KAFKA_TOPIC='examples-topics', VALUE_FORMAT='AVRO', PARTITIONS=1) "
        );
    }

    #[test]
    fn text_values_are_escaped() {
        let meta = Metadata::new().with("timestamp_format", "yyyy-MM-dd'T'HH:mm");
        assert_eq!(
            meta.render(),
            "WITH (TIMESTAMP_FORMAT='yyyy-MM-dd''T''HH:mm') "
        );
        assert_eq!(
            Metadata::new().with("WRAP_SINGLE_VALUE", false).render(),
            "WITH (WRAP_SINGLE_VALUE=FALSE) "
        );
    }
}
