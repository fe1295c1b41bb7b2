use core::fmt;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The kind of object a statement addresses.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Reference {
    Stream,
    Table,
    Topic,
}

impl Reference {
    /// Streams and tables can be created, dropped and inserted into; topics only
    /// exist on the broker side.
    pub fn is_relation(&self) -> bool {
        matches!(self, Reference::Stream | Reference::Table)
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Reference::Stream => "STREAMS",
            Reference::Table => "TABLES",
            Reference::Topic => "TOPICS",
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Stream => write!(f, "STREAM"),
            Reference::Table => write!(f, "TABLE"),
            Reference::Topic => write!(f, "TOPIC"),
        }
    }
}
