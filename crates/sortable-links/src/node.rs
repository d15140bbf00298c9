use sortable_conf::SortClasses;
use sortable_templates::Direction;
use sortable_templates::TagDeclaration;
use sortable_templates::TagKind;

use crate::context::Context;
use crate::context::Variable;
use crate::html::html_escape;
use crate::link::SortLink;
use crate::request::Request;

/// Rendered in place of an image URL variable that cannot be resolved.
pub const IMAGE_URL_FALLBACK: &str = "None";

const ROTATE_STYLE: &str = r#" style="transform: rotate(180deg);""#;

/// A compiled sortable tag, ready to render against any request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortableNode {
    kind: TagKind,
    field: String,
    default_direction: Direction,
    title: Variable,
    image_url: Option<Variable>,
}

impl SortableNode {
    #[must_use]
    pub fn new(kind: TagKind, declaration: TagDeclaration) -> Self {
        // Only headers draw the direction indicator.
        let image_url = match kind {
            TagKind::Header => declaration.image_url.map(Variable::from),
            TagKind::Link | TagKind::Url | TagKind::Class => None,
        };
        Self {
            kind,
            field: declaration.field,
            default_direction: declaration.default_direction,
            title: Variable::from(declaration.title),
            image_url,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TagKind {
        self.kind
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn default_direction(&self) -> Direction {
        self.default_direction
    }

    pub fn build_link(&self, request: &dyn Request, classes: &SortClasses) -> SortLink {
        SortLink::build(request, &self.field, self.default_direction, classes)
    }

    pub fn render(
        &self,
        request: &dyn Request,
        context: &dyn Context,
        classes: &SortClasses,
    ) -> String {
        let link = self.build_link(request, classes);
        match self.kind {
            TagKind::Link => self.render_link(&link, context),
            TagKind::Header => self.render_header(&link, context),
            TagKind::Url => link.url,
            TagKind::Class => link.css_class,
        }
    }

    fn render_link(&self, link: &SortLink, context: &dyn Context) -> String {
        let title = html_escape(&self.title.resolve_or_literal(context));
        format!(
            r#"<a href="{}" class="{}" title="{title}">{title}</a>"#,
            link.url, link.css_class
        )
    }

    fn render_header(&self, link: &SortLink, context: &dyn Context) -> String {
        let title = html_escape(&self.title.resolve_or_literal(context));

        let direction_image = match &self.image_url {
            Some(image_url) if link.is_current => {
                let src = html_escape(&image_url.resolve_or(context, IMAGE_URL_FALLBACK));
                let style = match link.active_direction {
                    Direction::Asc => ROTATE_STYLE,
                    Direction::Desc => "",
                };
                format!(
                    r#"<span class="pull-right"><img class="sort-img {}-img" src="{src}"{style}></span>"#,
                    link.css_class
                )
            }
            _ => String::new(),
        };

        format!(
            r#"<th class="{}"><a href="{}" title="{title}">{title}</a>{direction_image}</th>"#,
            link.css_class, link.url
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::context::EmptyContext;
    use crate::context::JsonContext;
    use crate::request::HttpRequest;

    fn node(kind: TagKind, bits: &[&str]) -> SortableNode {
        SortableNode::new(kind, TagDeclaration::from_bits(bits).unwrap())
    }

    fn render(node: &SortableNode, url: &str, context: &dyn Context) -> String {
        node.render(&HttpRequest::from_url(url), context, &SortClasses::default())
    }

    mod link {
        use super::*;

        #[test]
        fn renders_anchor_for_current_field() {
            let node = node(TagKind::Link, &["sortable_link", "name"]);
            let html = render(&node, "/items/?sort=name&dir=asc&page=2", &EmptyContext);
            insta::assert_snapshot!(html, @r#"<a href="/items/?sort=name&amp;page=2&amp;dir=desc" class="sort-asc" title="Name">Name</a>"#);
        }

        #[test]
        fn renders_anchor_for_other_field() {
            let node = node(TagKind::Link, &["sortable_link", "-price", "Price"]);
            let html = render(&node, "/items/?sort=name&dir=asc&page=2", &EmptyContext);
            assert_eq!(
                html,
                r#"<a href="/items/?sort=price&amp;page=2&amp;dir=desc" class="sort-none" title="Price">Price</a>"#
            );
        }

        #[test]
        fn title_resolves_from_context() {
            let node = node(TagKind::Link, &["sortable_link", "price", "labels.price"]);
            let ctx = JsonContext::new(json!({ "labels": { "price": "Unit <price>" } }));
            let html = render(&node, "/", &ctx);
            assert_eq!(
                html,
                r#"<a href="/?sort=price&amp;dir=asc" class="sort-none" title="Unit &lt;price&gt;">Unit &lt;price&gt;</a>"#
            );
        }

        #[test]
        fn unresolved_title_uses_literal() {
            let node = node(TagKind::Link, &["sortable_link", "price", "labels.price"]);
            let html = render(&node, "/", &EmptyContext);
            assert!(html.ends_with(r#"title="labels.price">labels.price</a>"#));
        }
    }

    mod header {
        use super::*;

        fn header() -> SortableNode {
            node(
                TagKind::Header,
                &["sortable_header", "name", "Name", "'/static/arrow.png'"],
            )
        }

        #[test]
        fn ascending_rotates_indicator() {
            let html = render(&header(), "/?sort=name&dir=asc", &EmptyContext);
            insta::assert_snapshot!(html, @r#"<th class="sort-asc"><a href="/?sort=name&amp;dir=desc" title="Name">Name</a><span class="pull-right"><img class="sort-img sort-asc-img" src="/static/arrow.png" style="transform: rotate(180deg);"></span></th>"#);
        }

        #[test]
        fn descending_keeps_indicator_upright() {
            let html = render(&header(), "/?sort=name&dir=desc", &EmptyContext);
            assert_eq!(
                html,
                r#"<th class="sort-desc"><a href="/?sort=name&amp;dir=asc" title="Name">Name</a><span class="pull-right"><img class="sort-img sort-desc-img" src="/static/arrow.png"></span></th>"#
            );
        }

        #[test]
        fn inactive_column_has_no_indicator() {
            let html = render(&header(), "/?sort=price&dir=asc", &EmptyContext);
            assert_eq!(
                html,
                r#"<th class="sort-none"><a href="/?sort=name&amp;dir=asc" title="Name">Name</a></th>"#
            );
        }

        #[test]
        fn no_image_declared_has_no_indicator() {
            let node = node(TagKind::Header, &["sortable_header", "name"]);
            let html = render(&node, "/?sort=name", &EmptyContext);
            assert!(!html.contains("<img"));
        }

        #[test]
        fn image_variable_resolves_or_falls_back() {
            let node = node(TagKind::Header, &["sortable_header", "name", "Name", "arrow"]);

            let ctx = JsonContext::new(json!({ "arrow": "/img/a.svg" }));
            assert!(render(&node, "/?sort=name", &ctx).contains(r#"src="/img/a.svg""#));

            let html = render(&node, "/?sort=name", &EmptyContext);
            assert!(html.contains(r#"src="None""#));
        }
    }

    #[test]
    fn url_and_class_variants() {
        let url = node(TagKind::Url, &["sortable_url", "name"]);
        let class = node(TagKind::Class, &["sortable_class", "name"]);
        let current = "/items/?sort=name&dir=desc";
        assert_eq!(render(&url, current, &EmptyContext), "/items/?sort=name&amp;dir=asc");
        assert_eq!(render(&class, current, &EmptyContext), "sort-desc");
    }

    #[test]
    fn image_only_kept_for_headers() {
        let link = node(TagKind::Link, &["sortable_link", "name", "Name", "/img.png"]);
        let html = render(&link, "/?sort=name", &EmptyContext);
        assert!(!html.contains("img"));
    }
}
