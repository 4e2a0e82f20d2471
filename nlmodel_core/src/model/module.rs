use std::collections::BTreeMap;

use serde::Deserialize;

use super::INLINE_ORIGIN;
use super::sentence::{RawSentence, Sentence};
use crate::error::{Error, Result, Violation};

/// Unit annotations of a module, e.g. `{concentration: nM, time: s}`.
pub type Units = BTreeMap<String, serde_json::Value>;

/// Children of a module: either submodules or sentences.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleContent {
    Branch(Vec<Module>),
    Leaf(Vec<Sentence>),
}

/// A node of a model tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    name: Option<String>,
    description: Option<String>,
    units: Option<Units>,
    content: ModuleContent,
}

/// Module mapping as it appears in a document, before validation.
///
/// A key holding YAML `null` deserializes to `None`, same as a missing key.
#[derive(Debug, Deserialize)]
struct RawModule {
    name: Option<String>,
    description: Option<String>,
    units: Option<Units>,
    modules: Option<Vec<RawModule>>,
    sentences: Option<Vec<RawSentence>>,
}

impl Module {
    #[must_use]
    pub const fn branch(children: Vec<Self>) -> Self {
        Self::with_content(ModuleContent::Branch(children))
    }

    #[must_use]
    pub const fn leaf(sentences: Vec<Sentence>) -> Self {
        Self::with_content(ModuleContent::Leaf(sentences))
    }

    const fn with_content(content: ModuleContent) -> Self {
        Self {
            name: None,
            description: None,
            units: None,
            content,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    /// Parse and validate a YAML document held in memory.
    pub fn from_yaml_str(document: &str) -> Result<Self> {
        Self::parse_document(document, INLINE_ORIGIN)
    }

    /// Parse and validate a YAML document, labelling errors with `origin`.
    pub(super) fn parse_document(document: &str, origin: &str) -> Result<Self> {
        let raw: RawModule = serde_yaml::from_str(document).map_err(|source| Error::Yaml {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_raw(raw, origin, "$")
    }

    fn from_raw(raw: RawModule, origin: &str, path: &str) -> Result<Self> {
        let invalid = |violation| Error::Validation {
            origin: origin.to_string(),
            path: path.to_string(),
            violation,
        };

        let content = match (raw.modules, raw.sentences) {
            (Some(_), Some(_)) => return Err(invalid(Violation::BothChildKinds)),
            (None, None) => return Err(invalid(Violation::NoChildKind)),
            (Some(modules), None) => ModuleContent::Branch(
                modules
                    .into_iter()
                    .enumerate()
                    .map(|(i, child)| {
                        Self::from_raw(child, origin, &format!("{path}.modules[{i}]"))
                    })
                    .collect::<Result<_>>()?,
            ),
            (None, Some(sentences)) => ModuleContent::Leaf(
                sentences
                    .into_iter()
                    .enumerate()
                    .map(|(i, sentence)| {
                        Sentence::from_raw(sentence).ok_or_else(|| Error::Validation {
                            origin: origin.to_string(),
                            path: format!("{path}.sentences[{i}]"),
                            violation: Violation::MissingText,
                        })
                    })
                    .collect::<Result<_>>()?,
            ),
        };

        Ok(Self {
            name: raw.name,
            description: raw.description,
            units: raw.units,
            content,
        })
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn units(&self) -> Option<&Units> {
        self.units.as_ref()
    }

    #[must_use]
    pub const fn content(&self) -> &ModuleContent {
        &self.content
    }

    /// Direct submodules; empty for a leaf module.
    #[must_use]
    pub fn submodules(&self) -> &[Self] {
        match &self.content {
            ModuleContent::Branch(children) => children,
            ModuleContent::Leaf(_) => &[],
        }
    }

    /// Direct sentences; empty for a branch module.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        match &self.content {
            ModuleContent::Branch(_) => &[],
            ModuleContent::Leaf(sentences) => sentences,
        }
    }

    /// Every sentence reachable from this module, depth-first, in document order.
    #[must_use]
    pub fn all_sentences(&self) -> Vec<&Sentence> {
        let mut out = Vec::new();
        self.collect_sentences(&mut out);
        out
    }

    fn collect_sentences<'a>(&'a self, out: &mut Vec<&'a Sentence>) {
        match &self.content {
            ModuleContent::Branch(children) => {
                for child in children {
                    child.collect_sentences(out);
                }
            }
            ModuleContent::Leaf(sentences) => out.extend(sentences),
        }
    }

    #[must_use]
    pub fn sentence_count(&self) -> usize {
        match &self.content {
            ModuleContent::Branch(children) => children.iter().map(Self::sentence_count).sum(),
            ModuleContent::Leaf(sentences) => sentences.len(),
        }
    }

    /// Pre-order iterator over this module and all submodules, with depth.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }
}

/// Depth-first pre-order traversal returned by [`Module::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Module)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Module);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, module) = self.stack.pop()?;
        self.stack
            .extend(module.submodules().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, module))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(module: &Module) -> Vec<&str> {
        module.all_sentences().into_iter().map(Sentence::text).collect()
    }

    #[test]
    fn leaf_module_keeps_sentence_order() {
        let module = Module::from_yaml_str(
            "name: apoptosis\n\
             sentences:\n  - text: X activates Y\n  - text: Y inhibits Z\n",
        )
        .unwrap();

        assert_eq!(module.name(), Some("apoptosis"));
        assert_eq!(module.sentence_count(), 2);
        assert_eq!(texts(&module), vec!["X activates Y", "Y inhibits Z"]);
    }

    #[test]
    fn branch_module_flattens_depth_first() {
        let module = Module::from_yaml_str(
            "modules:\n\
             \x20 - sentences: [{text: a}]\n\
             \x20 - sentences: [{text: b}, {text: c}]\n",
        )
        .unwrap();

        assert_eq!(module.submodules().len(), 2);
        assert!(module.sentences().is_empty());
        assert_eq!(texts(&module), vec!["a", "b", "c"]);
    }

    #[test]
    fn deep_nesting_preserves_document_order() {
        let module = Module::from_yaml_str(
            "modules:\n\
             \x20 - modules:\n\
             \x20     - sentences: [{text: a}]\n\
             \x20     - modules:\n\
             \x20         - sentences: [{text: b}]\n\
             \x20 - sentences: [{text: c}, {text: d}]\n",
        )
        .unwrap();

        assert_eq!(texts(&module), vec!["a", "b", "c", "d"]);
        assert_eq!(module.sentence_count(), 4);
    }

    #[test]
    fn both_child_kinds_rejected() {
        let err = Module::from_yaml_str("sentences: [{text: a}]\nmodules: [{sentences: []}]\n")
            .unwrap_err();
        assert_eq!(err.violation(), Some(Violation::BothChildKinds));
        assert!(err.to_string().contains("cannot contain both"));
    }

    #[test]
    fn empty_mapping_rejected() {
        let err = Module::from_yaml_str("{}").unwrap_err();
        assert_eq!(err.violation(), Some(Violation::NoChildKind));
        assert!(err.to_string().contains("must contain either"));
    }

    #[test]
    fn null_child_list_counts_as_absent() {
        let err = Module::from_yaml_str("name: m\nmodules: ~\n").unwrap_err();
        assert_eq!(err.violation(), Some(Violation::NoChildKind));

        let module = Module::from_yaml_str("modules: ~\nsentences: [{text: a}]\n").unwrap();
        assert_eq!(texts(&module), vec!["a"]);
    }

    #[test]
    fn empty_sentence_list_is_a_valid_leaf() {
        let module = Module::from_yaml_str("sentences: []").unwrap();
        assert!(matches!(module.content(), ModuleContent::Leaf(s) if s.is_empty()));
        assert_eq!(module.sentence_count(), 0);
    }

    #[test]
    fn nested_violation_reports_location() {
        let err = Module::from_yaml_str(
            "modules:\n\
             \x20 - sentences: [{text: a}]\n\
             \x20 - modules:\n\
             \x20     - {}\n",
        )
        .unwrap_err();

        match err {
            Error::Validation {
                origin,
                path,
                violation,
            } => {
                assert_eq!(origin, INLINE_ORIGIN);
                assert_eq!(path, "$.modules[1].modules[0]");
                assert_eq!(violation, Violation::NoChildKind);
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn sentence_without_text_reports_location() {
        let err = Module::from_yaml_str("sentences:\n  - text: a\n  - policy: one_step\n")
            .unwrap_err();
        assert_eq!(err.violation(), Some(Violation::MissingText));
        assert!(err.to_string().contains("$.sentences[1]"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Module::from_yaml_str("sentences: [unterminated").unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }));
        assert!(err.violation().is_none());
    }

    #[test]
    fn metadata_is_kept() {
        let module = Module::from_yaml_str(
            "name: mapk\n\
             description: MAPK cascade\n\
             units: {concentration: nM, time: s}\n\
             sentences: [{text: RAF activates MEK}]\n",
        )
        .unwrap();

        assert_eq!(module.description(), Some("MAPK cascade"));
        let units = module.units().unwrap();
        assert_eq!(units["concentration"], serde_json::json!("nM"));
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn walk_visits_in_pre_order_with_depth() {
        let tree = Module::branch(vec![
            Module::branch(vec![Module::leaf(vec![]).with_name("c")]).with_name("b"),
            Module::leaf(vec![Sentence::new("x")]).with_name("d"),
        ])
        .with_name("a");

        let visited: Vec<(usize, Option<&str>)> =
            tree.walk().map(|(depth, m)| (depth, m.name())).collect();
        assert_eq!(
            visited,
            vec![(0, Some("a")), (1, Some("b")), (2, Some("c")), (1, Some("d"))]
        );
    }
}
