use crate::expression::{Expression, ExpressionRef};
use crate::field::Field;
use common::types::ksql::Reference;
use log::debug;
use std::sync::Arc;

/// Push or pull query over a stream or table.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    fields: Vec<Field>,
    source: Option<(String, Reference)>,
    filter: Option<ExpressionRef>,
    emit_changes: bool,
    limit: Option<u64>,
}

/// An empty projection selects `*`.
pub fn select(fields: impl IntoIterator<Item = Field>) -> SelectBuilder {
    SelectBuilder {
        fields: fields.into_iter().collect(),
        source: None,
        filter: None,
        emit_changes: false,
        limit: None,
    }
}

impl SelectBuilder {
    pub fn from(mut self, name: impl Into<String>, reference: Reference) -> Self {
        self.source = Some((name.into(), reference));
        self
    }

    pub fn where_clause(mut self, filter: impl Expression + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn emit_changes(mut self) -> Self {
        self.emit_changes = true;
        self
    }

    pub fn limit(mut self, rows: u64) -> Self {
        self.limit = Some(rows);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn source(&self) -> Option<(&str, Reference)> {
        self.source
            .as_ref()
            .map(|(name, reference)| (name.as_str(), *reference))
    }

    fn projection(&self) -> Option<String> {
        if self.fields.is_empty() {
            return Some("*".to_string());
        }
        let columns = self
            .fields
            .iter()
            .map(Expression::render)
            .collect::<Option<Vec<_>>>()?;
        Some(columns.join(", "))
    }
}

impl Expression for SelectBuilder {
    fn render(&self) -> Option<String> {
        let Some((name, reference)) = &self.source else {
            debug!("SELECT rejected: no source");
            return None;
        };
        if name.trim().is_empty() {
            debug!("SELECT rejected: empty source name");
            return None;
        }
        if !reference.is_relation() {
            debug!("SELECT rejected: {name} is a {reference}, not a stream or table");
            return None;
        }
        if self.limit == Some(0) {
            debug!("SELECT from {name} rejected: LIMIT 0");
            return None;
        }

        let Some(projection) = self.projection() else {
            debug!("SELECT from {name} rejected: projection did not render");
            return None;
        };
        let mut statement = format!("SELECT {projection} FROM {name}");

        if let Some(filter) = &self.filter {
            let Some(condition) = filter.render() else {
                debug!("SELECT from {name} rejected: WHERE clause did not render");
                return None;
            };
            statement.push_str(" WHERE ");
            statement.push_str(&condition);
        }
        if self.emit_changes {
            statement.push_str(" EMIT CHANGES");
        }
        if let Some(limit) = self.limit {
            statement.push_str(&format!(" LIMIT {limit}"));
        }

        Some(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::raw;
    use crate::field::field;
    use crate::{and, or};
    use pretty_assertions::assert_eq;

    #[test]
    fn star_when_no_fields() {
        let query = select([]).from("ORDERS", Reference::Stream);
        assert_eq!(query.render().as_deref(), Some("SELECT * FROM ORDERS"));
    }

    #[test]
    fn full_push_query() {
        let query = select([field("ID"), field("AMOUNT").alias("TOTAL")])
            .from("ORDERS", Reference::Stream)
            .where_clause(and![
                field("AMOUNT").greater(10),
                or![field("REGION").equal("EU"), field("REGION").is_null()],
            ])
            .emit_changes()
            .limit(5);
        assert_eq!(
            query.render().as_deref(),
            Some(
                "SELECT ID, AMOUNT AS TOTAL FROM ORDERS \
                 WHERE AMOUNT > 10 AND (REGION = 'EU' OR REGION IS NULL) EMIT CHANGES LIMIT 5"
            )
        );
    }

    #[test]
    fn source_is_required() {
        assert_eq!(select([field("ID")]).render(), None);
        assert_eq!(select([field("ID")]).from(" ", Reference::Table).render(), None);
        assert_eq!(select([field("ID")]).from("T", Reference::Topic).render(), None);
    }

    #[test]
    fn failing_parts_fail_the_query() {
        let base = select([field("ID")]).from("T", Reference::Table);
        assert_eq!(base.clone().where_clause(and![]).render(), None);
        assert_eq!(base.clone().limit(0).render(), None);
        assert_eq!(
            select([field("ID"), field("")]).from("T", Reference::Table).render(),
            None
        );
        assert_eq!(
            base.where_clause(raw("ID = 1")).render().as_deref(),
            Some("SELECT ID FROM T WHERE ID = 1")
        );
    }

    #[test]
    fn accessors() {
        let query = select([field("ID")]).from("USERS", Reference::Table);
        assert_eq!(query.fields().len(), 1);
        assert_eq!(query.source(), Some(("USERS", Reference::Table)));
    }
}
