use sortable_conf::SortClasses;
use sortable_templates::parse_tag;
use sortable_templates::parse_template;
use sortable_templates::Node;
use sortable_templates::Span;
use sortable_templates::TagDeclaration;
use sortable_templates::TagKind;
use sortable_templates::TemplateError;

use crate::context::Context;
use crate::node::SortableNode;
use crate::request::Request;

/// Compiles templates with a fixed set of CSS classes.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    classes: SortClasses,
}

impl Engine {
    #[must_use]
    pub fn new(classes: SortClasses) -> Self {
        Self { classes }
    }

    #[must_use]
    pub fn classes(&self) -> &SortClasses {
        &self.classes
    }

    /// Find the sortable tags in `source`; a malformed one fails the whole template.
    pub fn compile(&self, source: &str) -> Result<CompiledTemplate, TemplateError> {
        let nodes = parse_template(source)?
            .into_iter()
            .map(|node| match node {
                Node::Verbatim { span } => Segment::Verbatim(span),
                Node::Sortable(tag) => Segment::Sortable(SortableNode::new(tag.kind, tag.declaration)),
            })
            .collect();

        Ok(CompiledTemplate {
            source: source.to_string(),
            nodes,
            classes: self.classes.clone(),
        })
    }

    /// Compile the content of a single tag, e.g. `sortable_link -price "Price"`.
    pub fn compile_tag(&self, content: &str) -> Result<Option<SortableNode>, TemplateError> {
        Ok(parse_tag(content)?.map(|(kind, declaration)| SortableNode::new(kind, declaration)))
    }

    /// Build a node from an already parsed declaration.
    #[must_use]
    pub fn node(&self, kind: TagKind, declaration: TagDeclaration) -> SortableNode {
        SortableNode::new(kind, declaration)
    }

    pub fn render_node(
        &self,
        node: &SortableNode,
        request: &dyn Request,
        context: &dyn Context,
    ) -> String {
        node.render(request, context, &self.classes)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Verbatim(Span),
    Sortable(SortableNode),
}

/// A template whose sortable tags have been parsed once and can be rendered
/// for any number of requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledTemplate {
    source: String,
    nodes: Vec<Segment>,
    classes: SortClasses,
}

impl CompiledTemplate {
    pub fn sortable_nodes(&self) -> impl Iterator<Item = &SortableNode> {
        self.nodes.iter().filter_map(|segment| match segment {
            Segment::Sortable(node) => Some(node),
            Segment::Verbatim(_) => None,
        })
    }

    #[must_use]
    pub fn render(&self, request: &dyn Request, context: &dyn Context) -> String {
        let mut output = String::with_capacity(self.source.len());
        for segment in &self.nodes {
            match segment {
                Segment::Verbatim(span) => output.push_str(&self.source[span.as_range()]),
                Segment::Sortable(node) => {
                    output.push_str(&node.render(request, context, &self.classes));
                }
            }
        }
        output
    }
}
