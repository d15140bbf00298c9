use std::io::Read as _;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::load_engine;
use crate::commands::Command;
use crate::commands::RenderInputs;

#[derive(Debug, Parser)]
pub struct Render {
    /// Template to render. Reads stdin when omitted.
    file: Option<PathBuf>,

    #[command(flatten)]
    inputs: RenderInputs,
}

impl Command for Render {
    fn execute(&self, args: &Args) -> Result<ExitCode> {
        let (name, source) = match &self.file {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                (path.display().to_string(), source)
            }
            None => {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .context("Failed to read template from stdin")?;
                ("<stdin>".to_string(), source)
            }
        };

        let engine = load_engine(args)?;
        let template = engine.compile(&source).map_err(|err| {
            let (line, col) = line_col(&source, err.span().start as usize);
            anyhow::Error::new(err).context(format!("{name}:{line}:{col}: invalid sortable tag"))
        })?;

        let request = self.inputs.request();
        let context = self.inputs.context()?;
        tracing::info!(
            template = %name,
            tags = template.sortable_nodes().count(),
            "rendering"
        );

        let output = template.render(&request, &context);
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(output.as_bytes())
            .and_then(|()| stdout.flush())
            .context("Failed to write output")?;

        Ok(ExitCode::SUCCESS)
    }
}

/// 1-based line and column of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    (line, before[line_start..].chars().count() + 1)
}
