use crate::expression::Expression;
use common::types::ksql::Reference;

/// `DESCRIBE STREAM|TABLE|TOPIC <name>`. The name is emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeBuilder {
    target: Reference,
    schema: String,
}

pub fn describe(target: Reference, schema: impl Into<String>) -> DescribeBuilder {
    DescribeBuilder {
        target,
        schema: schema.into(),
    }
}

impl DescribeBuilder {
    pub fn target(&self) -> Reference {
        self.target
    }

    pub fn schema_name(&self) -> &str {
        &self.schema
    }
}

impl Expression for DescribeBuilder {
    fn render(&self) -> Option<String> {
        Some(format!("DESCRIBE {} {}", self.target, self.schema))
    }
}
