mod link;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use anyhow::Result;
use clap::Subcommand;
use sortable_conf::Settings;
use sortable_links::Engine;
use sortable_links::HttpRequest;
use sortable_links::JsonContext;

use crate::args::Args;

pub trait Command {
    fn execute(&self, args: &Args) -> Result<ExitCode>;
}

#[derive(Debug, Subcommand)]
pub enum SortableCommand {
    /// Render the sortable tags in a template
    Render(self::render::Render),
    /// Render a single sortable tag
    Link(self::link::Link),
}

impl Command for SortableCommand {
    fn execute(&self, args: &Args) -> Result<ExitCode> {
        match self {
            SortableCommand::Render(cmd) => cmd.execute(args),
            SortableCommand::Link(cmd) => cmd.execute(args),
        }
    }
}

/// The request and template variables a tag is rendered against.
#[derive(Debug, clap::Args)]
pub struct RenderInputs {
    /// URL of the current page, e.g. `/items/?sort=name&dir=asc`.
    #[arg(long, default_value = "/")]
    url: String,

    /// Template variable, repeatable. Overrides `--context`.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    vars: Vec<(String, String)>,

    /// JSON file holding template variables.
    #[arg(long, value_name = "FILE")]
    context: Option<PathBuf>,
}

impl RenderInputs {
    pub fn request(&self) -> HttpRequest {
        HttpRequest::from_url(&self.url)
    }

    pub fn context(&self) -> Result<JsonContext> {
        let mut context = match &self.context {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read context file {}", path.display()))?;
                let root = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse context file {}", path.display()))?;
                JsonContext::new(root)
            }
            None => JsonContext::default(),
        };
        for (name, value) in &self.vars {
            context.insert(name.clone(), serde_json::Value::String(value.clone()));
        }
        Ok(context)
    }
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    if name.is_empty() {
        return Err(format!("missing variable name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

pub fn load_engine(args: &Args) -> Result<Engine> {
    let settings = Settings::new(&args.global.project).context("Failed to load settings")?;
    Ok(Engine::new(settings.classes))
}
