use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::bits::capitalize;
use crate::bits::strip_quotes;
use crate::error::TemplateError;
use crate::span::Span;

/// Sort order of a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Read a `dir` query value; anything unrecognised counts as ascending.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown sort direction '{0}'")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

/// The four sortable tags, differing only in what they render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// `<a>` element
    Link,
    /// `<th>` element with an optional direction indicator
    Header,
    /// Bare URL
    Url,
    /// Bare CSS class
    Class,
}

impl TagKind {
    pub const ALL: [TagKind; 4] = [TagKind::Link, TagKind::Header, TagKind::Url, TagKind::Class];

    #[must_use]
    pub fn tag_name(self) -> &'static str {
        match self {
            TagKind::Link => "sortable_link",
            TagKind::Header => "sortable_header",
            TagKind::Url => "sortable_url",
            TagKind::Class => "sortable_class",
        }
    }

    #[must_use]
    pub fn from_tag_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag_name() == name)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// A title or image-url token from a tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TagArg {
    /// Quoted in the tag; used as written.
    Literal(String),
    /// Bare token; looked up in the context at render time.
    Variable(String),
}

impl TagArg {
    fn from_bit(bit: &str) -> Self {
        let text = strip_quotes(bit).trim().to_string();
        if bit.starts_with(['"', '\'']) {
            TagArg::Literal(text)
        } else {
            TagArg::Variable(text)
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            TagArg::Literal(text) | TagArg::Variable(text) => text,
        }
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, TagArg::Literal(_))
    }
}

/// What a sortable tag declares: `field-spec [title] [image-url]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagDeclaration {
    pub field: String,
    pub default_direction: Direction,
    /// Defaults to the capitalized field name.
    pub title: TagArg,
    pub image_url: Option<TagArg>,
}

impl TagDeclaration {
    /// Build a declaration from tag bits, the tag name included as the first bit.
    ///
    /// Errors carry an empty span; callers that know where the tag sits
    /// attach it with [`TemplateError::with_span`].
    pub fn from_bits<S: AsRef<str>>(bits: &[S]) -> Result<Self, TemplateError> {
        let tag = bits.first().map_or("", |bit| bit.as_ref());
        let args: Vec<&str> = bits.iter().skip(1).map(|bit| bit.as_ref()).collect();
        let mut args = args.into_iter();

        let spec = args.next().ok_or_else(|| TemplateError::MissingField {
            tag: tag.to_string(),
            span: Span::default(),
        })?;

        let spec = strip_quotes(spec).trim();
        let (field, default_direction) = if let Some(field) = spec.strip_prefix('-') {
            (field.trim(), Direction::Desc)
        } else if let Some(field) = spec.strip_prefix('+') {
            (field.trim(), Direction::Asc)
        } else {
            (spec, Direction::Asc)
        };
        if field.is_empty() {
            return Err(TemplateError::EmptyField {
                tag: tag.to_string(),
                spec: spec.to_string(),
                span: Span::default(),
            });
        }

        let title = args
            .next()
            .map_or_else(|| TagArg::Literal(capitalize(field)), TagArg::from_bit);
        let image_url = args.next().map(TagArg::from_bit);

        Ok(Self {
            field: field.to_string(),
            default_direction,
            title,
            image_url,
        })
    }
}

/// A parsed sortable tag and where it sits in the template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SortableTag {
    pub kind: TagKind,
    pub declaration: TagDeclaration,
    pub span: Span,
}
