//! Sortable table links built from the current request's query string.
//!
//! A column link keeps every query parameter of the current page except
//! `sort` and `dir`, which it rewrites:
//!
//! - the column the page is sorted by links to the opposite direction
//! - every other column links to its declared default direction
//!
//! ```
//! use sortable_conf::SortClasses;
//! use sortable_links::{HttpRequest, SortLink};
//! use sortable_templates::Direction;
//!
//! let request = HttpRequest::from_url("/items/?sort=name&dir=asc&page=2");
//! let link = SortLink::build(&request, "name", Direction::Asc, &SortClasses::default());
//!
//! assert_eq!(link.url, "/items/?sort=name&amp;page=2&amp;dir=desc");
//! assert_eq!(link.css_class, "sort-asc");
//! assert!(link.is_current);
//! ```
//!
//! [`Engine`] runs the same logic over a whole template, replacing each
//! `{% sortable_link %}`, `{% sortable_header %}`, `{% sortable_url %}` and
//! `{% sortable_class %}` tag with its rendered output.

mod context;
mod html;
mod link;
mod node;
mod query;
mod request;
mod template;

pub use context::Context;
pub use context::EmptyContext;
pub use context::JsonContext;
pub use context::Variable;
pub use context::VariableDoesNotExist;
pub use html::html_escape;
pub use link::SortLink;
pub use node::SortableNode;
pub use node::IMAGE_URL_FALLBACK;
pub use query::form_decode;
pub use query::form_encode;
pub use query::QueryDict;
pub use request::HttpRequest;
pub use request::Request;
pub use template::CompiledTemplate;
pub use template::Engine;
