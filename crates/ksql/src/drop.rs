use crate::expression::Expression;
use common::types::ksql::Reference;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropBuilder {
    target: Reference,
    name: String,
    if_exists: bool,
    delete_topic: bool,
}

pub fn drop(target: Reference, name: impl Into<String>) -> DropBuilder {
    DropBuilder {
        target,
        name: name.into(),
        if_exists: false,
        delete_topic: false,
    }
}

impl DropBuilder {
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Also delete the backing topic.
    pub fn delete_topic(mut self) -> Self {
        self.delete_topic = true;
        self
    }

    pub fn target(&self) -> Reference {
        self.target
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Expression for DropBuilder {
    fn render(&self) -> Option<String> {
        if !self.target.is_relation() {
            debug!("DROP {} rejected: topics are not dropped through ksql", self.name);
            return None;
        }
        if self.name.trim().is_empty() {
            debug!("DROP {} rejected: empty name", self.target);
            return None;
        }

        let mut statement = format!("DROP {} ", self.target);
        if self.if_exists {
            statement.push_str("IF EXISTS ");
        }
        statement.push_str(&self.name);
        if self.delete_topic {
            statement.push_str(" DELETE TOPIC");
        }
        Some(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_and_decorated() {
        assert_eq!(
            drop(Reference::Stream, "ORDERS").render().as_deref(),
            Some("DROP STREAM ORDERS")
        );
        assert_eq!(
            drop(Reference::Table, "USERS")
                .if_exists()
                .delete_topic()
                .render()
                .as_deref(),
            Some("DROP TABLE IF EXISTS USERS DELETE TOPIC")
        );
    }

    #[test]
    fn rejects_topics_and_blank_names() {
        assert_eq!(drop(Reference::Topic, "ORDERS").render(), None);
        assert_eq!(drop(Reference::Stream, "").if_exists().render(), None);
    }
}
