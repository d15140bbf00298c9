use serde::Serialize;

use crate::error::TemplateError;
use crate::span::Span;
use crate::tag::SortableTag;
use crate::tokens::Token;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Node {
    /// Source passed through to the output unchanged.
    Verbatim { span: Span },
    Sortable(SortableTag),
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse the whole token stream. Stops at the first malformed sortable tag.
    pub fn parse(&mut self) -> Result<Vec<Node>, TemplateError> {
        let mut nodelist: Vec<Node> = Vec::with_capacity(self.tokens.len() / 2);

        while let Some(token) = self.advance() {
            let node = match token {
                Token::Block { content, span } => match Self::parse_block(content, *span)? {
                    Some(tag) => Node::Sortable(tag),
                    None => Node::Verbatim { span: *span },
                },
                Token::Comment { span, .. }
                | Token::Error { span, .. }
                | Token::Text { span, .. }
                | Token::Variable { span, .. } => Node::Verbatim { span: *span },
                Token::Eof => break,
            };
            push_merged(&mut nodelist, node);
        }

        Ok(nodelist)
    }

    fn parse_block(content: &str, span: Span) -> Result<Option<SortableTag>, TemplateError> {
        let parsed = crate::parse_tag(content).map_err(|err| err.with_span(span))?;
        Ok(parsed.map(|(kind, declaration)| SortableTag {
            kind,
            declaration,
            span,
        }))
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }
}

/// Adjacent verbatim nodes collapse into one span.
fn push_merged(nodelist: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Verbatim { span: last }), Node::Verbatim { span }) = (nodelist.last_mut(), &node)
    {
        if last.end() == span.start {
            last.length += span.length;
            return;
        }
    }
    nodelist.push(node);
}
