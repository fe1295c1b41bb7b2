use crate::expression::{Expression, ExpressionRef};
use core::fmt;
use log::debug;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    And,
    Or,
}

impl BooleanOperator {
    pub fn separator(&self) -> &'static str {
        match self {
            BooleanOperator::And => " AND ",
            BooleanOperator::Or => " OR ",
        }
    }
}

impl Display for BooleanOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BooleanOperator::And => write!(f, "AND"),
            BooleanOperator::Or => write!(f, "OR"),
        }
    }
}

/// Children joined by a single boolean operator, fixed at construction.
///
/// Rendering is all-or-nothing: one failing child fails the whole group. An empty
/// group is rejected as well, since it would leave a dangling `WHERE`.
#[derive(Debug, Clone)]
pub struct ExpressionList {
    expressions: Vec<ExpressionRef>,
    operator: BooleanOperator,
}

impl ExpressionList {
    pub fn new(
        operator: BooleanOperator,
        expressions: impl IntoIterator<Item = ExpressionRef>,
    ) -> Self {
        Self {
            expressions: expressions.into_iter().collect(),
            operator,
        }
    }

    pub fn operator(&self) -> BooleanOperator {
        self.operator
    }

    /// Copy of the children; changing it leaves the group untouched.
    pub fn expressions(&self) -> Vec<ExpressionRef> {
        self.expressions.clone()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

pub fn and(expressions: impl IntoIterator<Item = ExpressionRef>) -> ExpressionList {
    ExpressionList::new(BooleanOperator::And, expressions)
}

pub fn or(expressions: impl IntoIterator<Item = ExpressionRef>) -> ExpressionList {
    ExpressionList::new(BooleanOperator::Or, expressions)
}

impl Expression for ExpressionList {
    fn render(&self) -> Option<String> {
        if self.expressions.is_empty() {
            debug!("{} group rejected: no expressions", self.operator);
            return None;
        }

        // a lone child is emitted as is, parentheses only separate siblings
        let nested = self.expressions.len() > 1;
        let mut parts = Vec::with_capacity(self.expressions.len());
        for (idx, expression) in self.expressions.iter().enumerate() {
            let Some(text) = expression.render() else {
                debug!("{} group rejected: operand {} did not render", self.operator, idx);
                return None;
            };
            if nested && expression.is_compound() {
                parts.push(format!("({text})"));
            } else {
                parts.push(text);
            }
        }

        Some(parts.join(self.operator.separator()))
    }

    fn is_compound(&self) -> bool {
        match self.expressions.as_slice() {
            [] => false,
            [only] => only.is_compound(),
            _ => true,
        }
    }
}

/// `and![a, b, c]`: AND group over expressions of different types.
#[macro_export]
macro_rules! and {
    ($($expr:expr),* $(,)?) => {
        $crate::expression_list::and([
            $(::std::sync::Arc::new($expr) as $crate::expression::ExpressionRef),*
        ])
    };
}

/// `or![a, b, c]`: OR group over expressions of different types.
#[macro_export]
macro_rules! or {
    ($($expr:expr),* $(,)?) => {
        $crate::expression_list::or([
            $(::std::sync::Arc::new($expr) as $crate::expression::ExpressionRef),*
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::raw;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Broken;

    impl Expression for Broken {
        fn render(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn joins_between_every_pair() {
        let list = and![raw("a"), raw("b"), raw("c")];
        assert_eq!(list.render().as_deref(), Some("a AND b AND c"));

        let list = or![raw("a"), raw("b")];
        assert_eq!(list.render().as_deref(), Some("a OR b"));
    }

    #[test]
    fn operator_count_is_one_less_than_children() {
        for n in 2..=6 {
            let children = (0..n).map(|i| Arc::new(raw(format!("c{i}"))) as ExpressionRef);
            let text = and(children).render().unwrap();
            assert_eq!(text.matches(" AND ").count(), n - 1);
            assert!(text.starts_with("c0"));
            assert!(text.ends_with(&format!("c{}", n - 1)));
        }
    }

    #[test]
    fn single_child_is_unchanged() {
        assert_eq!(or![raw("x = 1")].render().as_deref(), Some("x = 1"));

        let inner = and![raw("a"), raw("b")];
        assert_eq!(or![inner.clone()].render(), inner.render());
        assert_eq!(or![inner].render().as_deref(), Some("a AND b"));
        assert_eq!(
            and![raw("c"), or![or![raw("a"), raw("b")]]].render().as_deref(),
            Some("c AND (a OR b)")
        );
    }

    #[test]
    fn empty_group_is_rejected() {
        assert_eq!(and([]).render(), None);
        assert_eq!(or![].render(), None);
    }

    #[test]
    fn any_failing_child_fails_the_group() {
        assert_eq!(and![raw("a"), Broken, raw("c")].render(), None);
        assert_eq!(or![Broken].render(), None);
        assert_eq!(or![raw("a"), raw("b"), Broken].render(), None);
    }

    #[test]
    fn nested_groups_are_parenthesized() {
        let inner = or![raw("b"), raw("c")];
        let outer = and![raw("a"), inner, or![raw("d")]];
        assert_eq!(outer.render().as_deref(), Some("a AND (b OR c) AND d"));
    }

    #[test]
    fn expressions_returns_a_copy() {
        let list = and![raw("a"), raw("b")];
        let mut copy = list.expressions();
        copy.push(Arc::new(Broken));
        copy.remove(0);

        assert_eq!(list.len(), 2);
        assert_eq!(list.render().as_deref(), Some("a AND b"));
        assert_eq!(list.operator(), BooleanOperator::And);
    }

    #[test]
    fn render_is_idempotent() {
        let list = or![raw("a"), and![raw("b"), raw("c")]];
        assert_eq!(list.render(), list.render());
    }
}
