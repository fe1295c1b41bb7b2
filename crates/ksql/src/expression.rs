use std::fmt::Debug;
use std::sync::Arc;

/// Anything that can try to render itself into statement text.
///
/// `None` means "no valid statement exists for this state". There is no partial text
/// and no cause attached; builders log why they refused at `debug` level. Rendering
/// is pure, so calling it twice on the same value yields the same result.
pub trait Expression: Debug + Send + Sync {
    fn render(&self) -> Option<String>;

    /// Whether the rendered text joins several operands and needs parentheses when
    /// nested inside another boolean group.
    fn is_compound(&self) -> bool {
        false
    }
}

/// Shared handle to a nested fragment.
pub type ExpressionRef = Arc<dyn Expression>;

impl<T: Expression + ?Sized> Expression for &T {
    fn render(&self) -> Option<String> {
        (**self).render()
    }

    fn is_compound(&self) -> bool {
        (**self).is_compound()
    }
}

impl<T: Expression + ?Sized> Expression for Box<T> {
    fn render(&self) -> Option<String> {
        (**self).render()
    }

    fn is_compound(&self) -> bool {
        (**self).is_compound()
    }
}

impl<T: Expression + ?Sized> Expression for Arc<T> {
    fn render(&self) -> Option<String> {
        (**self).render()
    }

    fn is_compound(&self) -> bool {
        (**self).is_compound()
    }
}

/// A hand-written fragment used verbatim. Blank text does not render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(String);

pub fn raw(text: impl Into<String>) -> Raw {
    Raw(text.into())
}

impl Expression for Raw {
    fn render(&self) -> Option<String> {
        if self.0.trim().is_empty() {
            log::debug!("raw fragment rejected: blank text");
            return None;
        }
        Some(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_delegate() {
        let fragment = raw("ID = 1");
        let boxed: Box<dyn Expression> = Box::new(fragment.clone());
        let shared: ExpressionRef = Arc::new(fragment.clone());

        assert_eq!((&fragment).render().as_deref(), Some("ID = 1"));
        assert_eq!(boxed.render().as_deref(), Some("ID = 1"));
        assert_eq!(shared.render().as_deref(), Some("ID = 1"));
    }

    #[test]
    fn blank_raw_fragment_fails() {
        assert_eq!(raw("  ").render(), None);
    }
}
