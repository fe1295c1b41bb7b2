use crate::expression::Expression;
use core::fmt;
use log::debug;
use std::fmt::{Display, Formatter};

/// A literal value inside a predicate or an `INSERT ... VALUES` row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
}

impl Value {
    /// Literal spelling; `None` for values the dialect cannot express (NaN, infinity).
    pub fn literal(&self) -> Option<String> {
        match self {
            Value::Null => Some("NULL".to_string()),
            Value::Bool(true) => Some("TRUE".to_string()),
            Value::Bool(false) => Some("FALSE".to_string()),
            Value::Int(value) => Some(value.to_string()),
            Value::Double(value) if value.is_finite() => Some(value.to_string()),
            Value::Double(_) => None,
            Value::String(value) => Some(quote(value)),
        }
    }
}

/// Single-quote a string literal, doubling embedded quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl Expression for Value {
    fn render(&self) -> Option<String> {
        let literal = self.literal();
        if literal.is_none() {
            debug!("literal rejected: {self:?} has no dialect spelling");
        }
        literal
    }
}

macro_rules! value_from {
    ($variant:ident: $($ty:ty),+) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value.into())
            }
        })+
    };
}

value_from!(Bool: bool);
value_from!(Int: i8, i16, i32, i64, u8, u16, u32);
value_from!(Double: f32, f64);
value_from!(String: String, &str, char);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Column reference, optionally qualified and aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    relation: Option<String>,
    alias: Option<String>,
}

pub fn field(name: impl Into<String>) -> Field {
    Field::new(name)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relation: None,
            alias: None,
        }
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = non_empty(relation.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = non_empty(alias.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `REL.NAME`, without the alias. `None` for a blank name.
    pub fn qualified(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            debug!("field rejected: blank name");
            return None;
        }
        Some(match &self.relation {
            Some(relation) => format!("{}.{}", relation, self.name),
            None => self.name.clone(),
        })
    }

    fn compare(self, op: ComparisonOp, value: impl Into<Value>) -> Comparison {
        Comparison {
            field: self,
            op,
            value: value.into(),
        }
    }

    pub fn equal(self, value: impl Into<Value>) -> Comparison {
        self.compare(ComparisonOp::Equal, value)
    }

    pub fn not_equal(self, value: impl Into<Value>) -> Comparison {
        self.compare(ComparisonOp::NotEqual, value)
    }

    pub fn greater(self, value: impl Into<Value>) -> Comparison {
        self.compare(ComparisonOp::Greater, value)
    }

    pub fn greater_or_equal(self, value: impl Into<Value>) -> Comparison {
        self.compare(ComparisonOp::GreaterOrEqual, value)
    }

    pub fn less(self, value: impl Into<Value>) -> Comparison {
        self.compare(ComparisonOp::Less, value)
    }

    pub fn less_or_equal(self, value: impl Into<Value>) -> Comparison {
        self.compare(ComparisonOp::LessOrEqual, value)
    }

    pub fn like(self, pattern: impl Into<String>) -> Comparison {
        self.compare(ComparisonOp::Like, Value::String(pattern.into()))
    }

    pub fn is_null(self) -> NullCheck {
        NullCheck {
            field: self,
            negated: false,
        }
    }

    pub fn is_not_null(self) -> NullCheck {
        NullCheck {
            field: self,
            negated: true,
        }
    }
}

/// Projection form, `REL.NAME AS ALIAS`.
impl Expression for Field {
    fn render(&self) -> Option<String> {
        let qualified = self.qualified()?;
        Some(match &self.alias {
            Some(alias) => format!("{qualified} AS {alias}"),
            None => qualified,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Like,
}

impl Display for ComparisonOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let op = match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterOrEqual => ">=",
            ComparisonOp::Less => "<",
            ComparisonOp::LessOrEqual => "<=",
            ComparisonOp::Like => "LIKE",
        };
        write!(f, "{op}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    field: Field,
    op: ComparisonOp,
    value: Value,
}

impl Expression for Comparison {
    fn render(&self) -> Option<String> {
        let field = self.field.qualified()?;
        let value = self.value.render()?;
        Some(format!("{} {} {}", field, self.op, value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullCheck {
    field: Field,
    negated: bool,
}

impl Expression for NullCheck {
    fn render(&self) -> Option<String> {
        let field = self.field.qualified()?;
        let check = if self.negated { "IS NOT NULL" } else { "IS NULL" };
        Some(format!("{field} {check}"))
    }
}
