//! Typed builders for ksqlDB statements.
//!
//! Every builder implements [`Expression`]: `render()` yields the statement text, or
//! `None` when the builder's state cannot form a valid statement. Builders nest into
//! one another wherever an expression is accepted.
//!
//! ```ignore
//! use ksql::{create, Kind, Reference, SearchField};
//!
//! let stmt = create(Reference::Stream, "ORDERS")
//!     .with_schema_fields([SearchField::new("ID", Kind::Int)])
//!     .render();
//! assert_eq!(stmt.as_deref(), Some("CREATE STREAM ORDERS (ID INT) "));
//! ```

extern crate self as ksql;

pub mod create;
pub mod describe;
pub mod drop;
pub mod expression;
pub mod expression_list;
pub mod field;
pub mod insert;
pub mod list;
pub mod metadata;
pub mod schema;
pub mod select;

pub use common::types::ksql::{Format, Kind, Reference, SearchField};
pub use create::{create, CreateBuilder};
pub use describe::{describe, DescribeBuilder};
// `drop::drop` is not re-exported, it would shadow `std::mem::drop` in glob imports
pub use drop::DropBuilder;
pub use expression::{raw, Expression, ExpressionRef, Raw};
pub use expression_list::{and, or, BooleanOperator, ExpressionList};
pub use field::{field, Comparison, ComparisonOp, Field, NullCheck, Value};
pub use insert::{insert, InsertBuilder, Row};
pub use ksql_derive::KsqlSchema;
pub use list::{list, ListBuilder};
pub use metadata::{MetaValue, Metadata};
pub use schema::{FieldDecl, KsqlSchema, SchemaError};
pub use select::{select, SelectBuilder};
