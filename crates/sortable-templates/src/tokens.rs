use serde::Serialize;

use crate::span::Span;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Token {
    Block { content: String, span: Span },
    Comment { content: String, span: Span },
    Error { content: String, span: Span },
    Text { content: String, span: Span },
    Variable { content: String, span: Span },
    Eof,
}

impl Token {
    /// Inner content with delimiters and surrounding whitespace removed.
    /// Text tokens return their text unchanged.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Token::Block { content, .. }
            | Token::Comment { content, .. }
            | Token::Error { content, .. }
            | Token::Text { content, .. }
            | Token::Variable { content, .. } => content,
            Token::Eof => "",
        }
    }

    /// Span of the whole lexeme, delimiters included.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        match self {
            Token::Block { span, .. }
            | Token::Comment { span, .. }
            | Token::Error { span, .. }
            | Token::Text { span, .. }
            | Token::Variable { span, .. } => Some(*span),
            Token::Eof => None,
        }
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }
}
