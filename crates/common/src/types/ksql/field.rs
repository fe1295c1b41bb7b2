use crate::types::ksql::Kind;
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// A column of a stream or table schema.
///
/// `relation` qualifies the column with the object it belongs to (`ORDERS.ID`), which
/// is how fields derived from a record type keep track of where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchField {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "non_empty_relation",
        skip_serializing_if = "Option::is_none"
    )]
    pub relation: Option<String>,
    pub kind: Kind,
}

fn non_empty_relation<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let relation = Option::<String>::deserialize(deserializer)?;
    Ok(relation.filter(|relation| !relation.is_empty()))
}

impl SearchField {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            relation: None,
            kind,
        }
    }

    /// An empty relation is treated as "no qualifier".
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        let relation = relation.into();
        self.relation = if relation.is_empty() {
            None
        } else {
            Some(relation)
        };
        self
    }

    pub fn qualified_name(&self) -> String {
        match &self.relation {
            Some(relation) if !relation.is_empty() => format!("{}.{}", relation, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Column definition as it appears inside `CREATE ... (<defs>)`.
impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.qualified_name(), self.kind)
    }
}
