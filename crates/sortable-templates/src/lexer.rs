use crate::span::Span;
use crate::tokens::Token;

const BLOCK_TAG_START: &str = "{%";
const BLOCK_TAG_END: &str = "%}";
const VARIABLE_TAG_START: &str = "{{";
const VARIABLE_TAG_END: &str = "}}";
const COMMENT_TAG_START: &str = "{#";
const COMMENT_TAG_END: &str = "#}";

pub struct Lexer<'a> {
    source: &'a str,
    start: usize,
    current: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            start: 0,
            current: 0,
        }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.start = self.current;

            let token = match (self.peek(), self.peek_next()) {
                ('{', '%') => self.lex_django_construct(BLOCK_TAG_END, |content, span| {
                    Token::Block { content, span }
                }),
                ('{', '{') => self.lex_django_construct(VARIABLE_TAG_END, |content, span| {
                    Token::Variable { content, span }
                }),
                ('{', '#') => self.lex_django_construct(COMMENT_TAG_END, |content, span| {
                    Token::Comment { content, span }
                }),
                _ => self.lex_text(),
            };

            tokens.push(token);
        }

        tokens.push(Token::Eof);
        tokens
    }

    fn lex_django_construct(
        &mut self,
        end: &str,
        token_fn: impl FnOnce(String, Span) -> Token,
    ) -> Token {
        self.consume_n(2);

        match self.consume_until(end) {
            Some(content) => {
                self.consume_n(2);
                token_fn(content, Span::from_bounds(self.start, self.current))
            }
            None => {
                self.synchronize();
                Token::Error {
                    content: self.source[self.start + 2..self.current].trim().to_string(),
                    span: Span::from_bounds(self.start, self.current),
                }
            }
        }
    }

    fn lex_text(&mut self) -> Token {
        // Always take at least one char so a lone `{` makes progress.
        self.consume();

        while !self.is_at_end() {
            let rest = &self.source.as_bytes()[self.current..];
            let Some(brace) = memchr::memchr(b'{', rest) else {
                self.current = self.source.len();
                break;
            };
            self.current += brace;
            let rest = &self.source[self.current..];
            if rest.starts_with(BLOCK_TAG_START)
                || rest.starts_with(VARIABLE_TAG_START)
                || rest.starts_with(COMMENT_TAG_START)
            {
                break;
            }
            self.consume();
        }

        Token::Text {
            content: self.source[self.start..self.current].to_string(),
            span: Span::from_bounds(self.start, self.current),
        }
    }

    #[inline]
    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next().unwrap_or('\0')
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    #[inline]
    fn consume(&mut self) {
        if let Some(ch) = self.source[self.current..].chars().next() {
            self.current += ch.len_utf8();
        }
    }

    fn consume_n(&mut self, count: usize) {
        for _ in 0..count {
            self.consume();
        }
    }

    fn consume_until(&mut self, delimiter: &str) -> Option<String> {
        let offset = self.current;

        let found = self.source[offset..].find(delimiter)?;
        self.current = offset + found;
        Some(self.source[offset..self.current].trim().to_string())
    }

    /// Rewind an unterminated construct to the first sync point after its
    /// opening delimiter, so the remainder is lexed normally.
    fn synchronize(&mut self) {
        const SYNC_POINTS: &[u8] = b"{\n\r";

        self.current = self.start + 2;
        while !self.is_at_end() {
            if SYNC_POINTS.contains(&self.source.as_bytes()[self.current]) {
                return;
            }
            self.consume();
        }
    }
}
