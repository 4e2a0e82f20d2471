//! External NLP engine invoked as a child process.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use anyhow::Context;
use nlmodel_config::ExtractorConfig;
use tracing::debug;

pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn from_config(config: &ExtractorConfig) -> anyhow::Result<Self> {
        Ok(Self {
            program: config.program()?.to_string(),
            args: config.args.clone(),
        })
    }
}

#[cfg(test)]
#[must_use]
pub fn shell_command(command: &str) -> CommandSpec {
    CommandSpec {
        program: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), command.to_string()],
    }
}

/// Runs one process per sentence: the sentence goes to stdin, a JSON array
/// of results is expected on stdout.
pub struct CommandExtractor {
    spec: CommandSpec,
}

impl CommandExtractor {
    #[must_use]
    pub const fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }

    pub fn extract(&self, text: &str) -> anyhow::Result<Vec<serde_json::Value>> {
        debug!("Running extractor {} on: {text}", self.spec.program);

        let mut child = Command::new(&self.spec.program)
            .args(&self.spec.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start extractor '{}'", self.spec.program))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("Extractor stdin unavailable"))?;
        // Feed stdin from its own thread so a chatty engine cannot fill the
        // stdout pipe while we are still blocked writing.
        let input = text.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for extractor '{}'", self.spec.program))?;

        match writer.join() {
            Ok(Ok(())) => {}
            // The engine may exit without reading all of stdin; its exit
            // status and stdout decide the outcome.
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("Extractor {} closed stdin early", self.spec.program);
            }
            Ok(Err(e)) => {
                return Err(e).with_context(|| {
                    format!("Failed to write sentence to extractor '{}'", self.spec.program)
                });
            }
            Err(_) => anyhow::bail!("Extractor stdin writer panicked"),
        }
        if !output.status.success() {
            anyhow::bail!(
                "Extractor '{}' failed ({}): {}",
                self.spec.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        serde_json::from_slice(&output.stdout).with_context(|| {
            format!(
                "Extractor '{}' did not print a JSON array for: {text}",
                self.spec.program
            )
        })
    }
}
