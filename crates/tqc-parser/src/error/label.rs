//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A labeled span in the document source.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let label = Label::new(Span::new(10..20), "unexpected end of input");

        assert_eq!(label.span().start(), 10);
        assert_eq!(label.span().end(), 20);
        assert_eq!(label.message(), "unexpected end of input");
    }
}
