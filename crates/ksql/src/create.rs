use crate::expression::{Expression, ExpressionRef};
use crate::metadata::Metadata;
use crate::schema::{KsqlSchema, SchemaError};
use common::config::components::stream::StreamDeclaration;
use common::types::ksql::{Reference, SearchField};
use log::debug;
use std::sync::Arc;

/// `CREATE STREAM|TABLE` statement.
///
/// A schema comes either from an explicit field list or from a nested `SELECT`
/// (`CREATE ... AS SELECT`), never both. Setting one does not clear the other; the
/// conflict is reported when rendering.
#[derive(Debug, Clone)]
pub struct CreateBuilder {
    target: Reference,
    schema: String,
    fields: Vec<SearchField>,
    as_select: Option<ExpressionRef>,
    metadata: Metadata,
}

pub fn create(target: Reference, schema: impl Into<String>) -> CreateBuilder {
    CreateBuilder::new(target, schema)
}

impl CreateBuilder {
    pub fn new(target: Reference, schema: impl Into<String>) -> Self {
        Self {
            target,
            schema: schema.into(),
            fields: Vec::new(),
            as_select: None,
            metadata: Metadata::new(),
        }
    }

    /// Builder for a declaration loaded from configuration.
    pub fn from_declaration(decl: &StreamDeclaration) -> Self {
        Self::new(decl.target, decl.name.clone())
            .with_schema_fields(decl.fields.iter().cloned())
            .with_metadata(Metadata::from(&decl.settings))
    }

    pub fn target(&self) -> Reference {
        self.target
    }

    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn has_as_select(&self) -> bool {
        self.as_select.is_some()
    }

    pub fn with_as_select(mut self, select: impl Expression + 'static) -> Self {
        self.as_select = Some(Arc::new(select));
        self
    }

    pub fn with_schema_fields(mut self, fields: impl IntoIterator<Item = SearchField>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Append the fields derived from `T`, qualified with its relation (the type name
    /// by default).
    pub fn with_schema_from_struct<T: KsqlSchema>(self) -> Result<Self, SchemaError> {
        let fields = T::search_fields()?;
        Ok(self.with_schema_fields(fields))
    }

    /// Replaces any metadata set before.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.fields.is_empty() && self.as_select.is_none() {
            return Err("neither a field list nor AS SELECT is set");
        }
        if !self.fields.is_empty() && self.as_select.is_some() {
            return Err("field list and AS SELECT are mutually exclusive");
        }
        if !self.target.is_relation() {
            return Err("only streams and tables can be created");
        }
        if self.schema.is_empty() {
            return Err("schema name is empty");
        }
        Ok(())
    }
}

impl Expression for CreateBuilder {
    fn render(&self) -> Option<String> {
        if let Err(reason) = self.validate() {
            debug!("CREATE {} {:?} rejected: {}", self.target, self.schema, reason);
            return None;
        }

        let mut statement = format!("CREATE {} {}", self.target, self.schema);

        if self.fields.is_empty() {
            statement.push(' ');
        } else {
            let columns = self
                .fields
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            statement.push_str(&format!(" ({columns}) "));
        }

        statement.push_str(&self.metadata.render());

        if let Some(select) = &self.as_select {
            let Some(query) = select.render() else {
                debug!(
                    "CREATE {} {} rejected: nested SELECT did not render",
                    self.target, self.schema
                );
                return None;
            };
            statement.push_str("AS ");
            statement.push_str(&query);
        }

        Some(statement)
    }
}
