use std::io::Write;
use std::path::PathBuf;

use nlmodel_core::Sentence;

/// Input parameters for the Sentences command strategy.
#[derive(Debug, Clone)]
pub struct SentencesInput {
    /// Model files, loaded in this order
    pub files: Vec<PathBuf>,
    /// Emit JSON lines instead of numbered text
    pub json: bool,
}

/// Strategy for listing every sentence of a model in flattened order.
#[derive(Debug, Clone, Copy)]
pub struct SentencesStrategy;

impl super::CommandStrategy for SentencesStrategy {
    type Input = SentencesInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let builder = super::load_model(input.files)?;
        let stdout = std::io::stdout();
        write_sentences(&mut stdout.lock(), &builder.all_sentences(), input.json)
    }
}

fn write_sentences(
    out: &mut impl Write,
    sentences: &[&Sentence],
    json: bool,
) -> anyhow::Result<()> {
    for (i, sentence) in sentences.iter().enumerate() {
        if json {
            writeln!(out, "{}", serde_json::to_string(sentence)?)?;
            continue;
        }
        match sentence.policy() {
            Some(policy) => writeln!(out, "{:>4}. {} [{policy}]", i + 1, sentence.text())?,
            None => writeln!(out, "{:>4}. {}", i + 1, sentence.text())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(sentences: &[Sentence], json: bool) -> String {
        let refs: Vec<&Sentence> = sentences.iter().collect();
        let mut out = Vec::new();
        write_sentences(&mut out, &refs, json).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn numbered_text_with_policy() {
        let sentences = vec![
            Sentence::new("X activates Y"),
            Sentence::new("Y inhibits Z").with_policy("one_step"),
        ];
        assert_eq!(
            render(&sentences, false),
            "   1. X activates Y\n   2. Y inhibits Z [one_step]\n"
        );
    }

    #[test]
    fn json_lines_skip_absent_fields() {
        let sentences = vec![Sentence::new("X activates Y")];
        assert_eq!(render(&sentences, true), "{\"text\":\"X activates Y\"}\n");
    }
}
