use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use sortable_templates::TagDeclaration;
use sortable_templates::TagKind;

use crate::args::Args;
use crate::commands::load_engine;
use crate::commands::Command;
use crate::commands::RenderInputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Link,
    Header,
    Url,
    Class,
}

impl From<Kind> for TagKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Link => TagKind::Link,
            Kind::Header => TagKind::Header,
            Kind::Url => TagKind::Url,
            Kind::Class => TagKind::Class,
        }
    }
}

#[derive(Debug, Parser)]
pub struct Link {
    /// Field spec with optional title and image URL, as in the template tag
    /// (e.g. `-- -price "Unit price"`).
    #[arg(required = true, num_args = 1..=3)]
    declaration: Vec<String>,

    /// Which tag to render.
    #[arg(long, value_enum, default_value_t = Kind::Link)]
    kind: Kind,

    /// Print the computed link state as JSON instead of markup.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    inputs: RenderInputs,
}

impl Command for Link {
    fn execute(&self, args: &Args) -> Result<ExitCode> {
        let kind = TagKind::from(self.kind);
        let bits: Vec<&str> = std::iter::once(kind.tag_name())
            .chain(self.declaration.iter().map(String::as_str))
            .collect();
        let declaration = TagDeclaration::from_bits(&bits)
            .with_context(|| format!("Invalid declaration for '{kind}'"))?;

        let engine = load_engine(args)?;
        let node = engine.node(kind, declaration);
        let request = self.inputs.request();

        if self.json {
            let link = node.build_link(&request, engine.classes());
            println!("{}", serde_json::to_string_pretty(&link)?);
        } else {
            let context = self.inputs.context()?;
            println!("{}", engine.render_node(&node, &request, &context));
        }

        Ok(ExitCode::SUCCESS)
    }
}
