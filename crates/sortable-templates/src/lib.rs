//! Template-side parsing for the sortable tags.
//!
//! Four tags are understood, all sharing one declaration syntax:
//!
//! ```django
//! {% sortable_link   field-spec [title] %}
//! {% sortable_header field-spec [title] [image-url] %}
//! {% sortable_url    field-spec %}
//! {% sortable_class  field-spec %}
//! ```
//!
//! `field-spec` is a field name, optionally prefixed with `+` (ascending
//! default) or `-` (descending default). Everything else in a template is
//! kept as verbatim spans of the source.
//!
//! The pipeline is the usual two stages:
//!
//! 1. **Lexing**: [`Lexer`] splits source into text, `{% %}`, `{{ }}` and `{# #}` tokens
//! 2. **Parsing**: [`Parser`] turns tokens into [`Node`]s, validating sortable tags

mod bits;
mod error;
mod lexer;
mod parser;
mod span;
mod tag;
mod tokens;

pub use bits::capitalize;
pub use bits::split_contents;
pub use bits::strip_quotes;
pub use error::TemplateError;
pub use lexer::Lexer;
pub use parser::Node;
pub use parser::Parser;
pub use span::Span;
pub use tag::Direction;
pub use tag::SortableTag;
pub use tag::TagArg;
pub use tag::TagDeclaration;
pub use tag::TagKind;
pub use tag::UnknownDirection;
pub use tokens::Token;

/// Lex and parse a template source.
pub fn parse_template(source: &str) -> Result<Vec<Node>, TemplateError> {
    let tokens = Lexer::new(source).tokenize();
    let nodelist = Parser::new(tokens).parse()?;
    tracing::debug!(
        sortable_tags = nodelist
            .iter()
            .filter(|node| matches!(node, Node::Sortable(_)))
            .count(),
        "parsed template"
    );
    Ok(nodelist)
}

/// Parse the content of a single `{% ... %}` tag, without the delimiters.
///
/// Returns `Ok(None)` when the tag is not one of the sortable tags.
pub fn parse_tag(content: &str) -> Result<Option<(TagKind, TagDeclaration)>, TemplateError> {
    let bits = split_contents(content);
    let Some(kind) = bits.first().and_then(|name| TagKind::from_tag_name(name)) else {
        return Ok(None);
    };
    let declaration = TagDeclaration::from_bits(&bits)?;
    Ok(Some((kind, declaration)))
}
