use crate::expression::{Expression, ExpressionRef};
use crate::field::Value;
use common::types::ksql::Reference;
use log::debug;
use std::sync::Arc;

/// Ordered `column -> value` pairs of a single `INSERT ... VALUES` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column`, overwriting an earlier value for the same column in place.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((column, value)),
        }
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Debug, Clone)]
enum Source {
    Values(Row),
    Select(ExpressionRef),
}

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    target: Reference,
    name: String,
    sources: Vec<Source>,
}

pub fn insert(target: Reference, name: impl Into<String>) -> InsertBuilder {
    InsertBuilder {
        target,
        name: name.into(),
        sources: Vec::new(),
    }
}

impl InsertBuilder {
    pub fn values(mut self, row: Row) -> Self {
        self.sources.push(Source::Values(row));
        self
    }

    pub fn as_select(mut self, select: impl Expression + 'static) -> Self {
        self.sources.push(Source::Select(Arc::new(select)));
        self
    }

    pub fn target(&self) -> Reference {
        self.target
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Expression for InsertBuilder {
    fn render(&self) -> Option<String> {
        if !self.target.is_relation() {
            debug!("INSERT INTO {} rejected: target is a {}", self.name, self.target);
            return None;
        }
        if self.name.trim().is_empty() {
            debug!("INSERT rejected: empty target name");
            return None;
        }
        let source = match self.sources.as_slice() {
            [source] => source,
            [] => {
                debug!("INSERT INTO {} rejected: neither VALUES nor SELECT given", self.name);
                return None;
            }
            _ => {
                debug!("INSERT INTO {} rejected: more than one row source", self.name);
                return None;
            }
        };

        match source {
            Source::Values(row) => {
                if row.is_empty() {
                    debug!("INSERT INTO {} rejected: empty row", self.name);
                    return None;
                }
                let columns = row.columns().collect::<Vec<_>>().join(", ");
                let Some(values) = row
                    .columns
                    .iter()
                    .map(|(_, value)| value.render())
                    .collect::<Option<Vec<_>>>()
                else {
                    debug!("INSERT INTO {} rejected: value did not render", self.name);
                    return None;
                };
                Some(format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    self.name,
                    columns,
                    values.join(", ")
                ))
            }
            Source::Select(select) => {
                let Some(query) = select.render() else {
                    debug!("INSERT INTO {} rejected: SELECT did not render", self.name);
                    return None;
                };
                Some(format!("INSERT INTO {} {}", self.name, query))
            }
        }
    }
}
