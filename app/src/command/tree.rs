use std::io::Write;
use std::path::{Path, PathBuf};

use nlmodel_core::{Module, ModuleContent};

/// Strategy for printing the module tree of each model file.
#[derive(Debug, Clone, Copy)]
pub struct TreeStrategy;

impl super::CommandStrategy for TreeStrategy {
    type Input = Vec<PathBuf>;

    fn execute(&self, files: Self::Input) -> anyhow::Result<()> {
        let builder = super::load_model(files)?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for (source, root) in builder.sources().iter().zip(builder.roots()) {
            write_tree(&mut out, source, root)?;
        }
        writeln!(out, "{} sentence(s) total", builder.sentence_count())?;
        Ok(())
    }
}

fn write_tree(out: &mut impl Write, source: &Path, root: &Module) -> anyhow::Result<()> {
    writeln!(out, "{}", source.display())?;
    for (depth, module) in root.walk() {
        let indent = "  ".repeat(depth + 1);
        let name = module.name().unwrap_or("(unnamed)");
        match module.content() {
            ModuleContent::Branch(children) => writeln!(
                out,
                "{indent}{name}/ ({} submodule(s), {} sentence(s))",
                children.len(),
                module.sentence_count()
            )?,
            ModuleContent::Leaf(sentences) => {
                writeln!(out, "{indent}{name} ({} sentence(s))", sentences.len())?;
            }
        }
    }
    Ok(())
}
