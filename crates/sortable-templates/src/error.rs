use serde::Serialize;
use thiserror::Error;

use crate::span::Span;

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
pub enum TemplateError {
    /// A sortable tag was used without naming the field to sort by.
    ///
    /// ```django
    /// {% sortable_link %}
    /// ```
    #[error("'{tag}' tag takes at least 1 argument")]
    MissingField { tag: String, span: Span },

    /// The field spec is only a direction sign.
    ///
    /// ```django
    /// {% sortable_header - "Price" %}
    /// ```
    #[error("'{tag}' tag has an empty field name in '{spec}'")]
    EmptyField {
        tag: String,
        spec: String,
        span: Span,
    },
}

impl TemplateError {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            TemplateError::MissingField { span, .. } | TemplateError::EmptyField { span, .. } => {
                *span
            }
        }
    }

    #[must_use]
    pub fn with_span(self, span: Span) -> Self {
        match self {
            TemplateError::MissingField { tag, .. } => TemplateError::MissingField { tag, span },
            TemplateError::EmptyField { tag, spec, .. } => {
                TemplateError::EmptyField { tag, spec, span }
            }
        }
    }
}
