pub mod ksql;

pub use ksql::*;
