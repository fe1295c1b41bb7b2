use crate::expression::Expression;
use common::types::ksql::Reference;

/// `LIST STREAMS|TABLES|TOPICS [EXTENDED]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBuilder {
    target: Reference,
    extended: bool,
}

pub fn list(target: Reference) -> ListBuilder {
    ListBuilder {
        target,
        extended: false,
    }
}

impl ListBuilder {
    pub fn extended(mut self) -> Self {
        self.extended = true;
        self
    }

    pub fn target(&self) -> Reference {
        self.target
    }
}

impl Expression for ListBuilder {
    fn render(&self) -> Option<String> {
        let suffix = if self.extended { " EXTENDED" } else { "" };
        Some(format!("LIST {}{}", self.target.plural(), suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_target_lists() {
        assert_eq!(list(Reference::Stream).render().as_deref(), Some("LIST STREAMS"));
        assert_eq!(list(Reference::Table).render().as_deref(), Some("LIST TABLES"));
        assert_eq!(
            list(Reference::Topic).extended().render().as_deref(),
            Some("LIST TOPICS EXTENDED")
        );
    }
}
