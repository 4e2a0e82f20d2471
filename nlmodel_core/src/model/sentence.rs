use serde::{Deserialize, Serialize};

/// Named assembly parameter attached to a sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: serde_json::Value,
}

/// A single mechanism written in natural language, e.g. "MEK activates ERK".
///
/// `policy` and `parameters` are passed through untouched to whatever
/// assembles the extracted mechanisms downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentence {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Vec<Parameter>>,
}

/// Sentence mapping as it appears in a document, before validation.
#[derive(Debug, Deserialize)]
pub(super) struct RawSentence {
    pub(super) text: Option<String>,
    pub(super) policy: Option<String>,
    pub(super) parameters: Option<Vec<Parameter>>,
}

impl Sentence {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            policy: None,
            parameters: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn policy(&self) -> Option<&str> {
        self.policy.as_deref()
    }

    #[must_use]
    pub fn parameters(&self) -> Option<&[Parameter]> {
        self.parameters.as_deref()
    }

    /// Validate a raw mapping. Returns `None` when `text` is absent.
    pub(super) fn from_raw(raw: RawSentence) -> Option<Self> {
        Some(Self {
            text: raw.text?,
            policy: raw.policy,
            parameters: raw.parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(yaml: &str) -> RawSentence {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let sentence = Sentence::from_raw(raw("text: X activates Y")).unwrap();
        assert_eq!(sentence.text(), "X activates Y");
        assert!(sentence.policy().is_none());
        assert!(sentence.parameters().is_none());
    }

    #[test]
    fn policy_and_parameters_are_kept() {
        let sentence = Sentence::from_raw(raw(
            "text: BRAF phosphorylates MEK\n\
             policy: michaelis_menten\n\
             parameters:\n  - name: Km\n    value: 0.5\n  - name: label\n    value: fast\n",
        ))
        .unwrap();

        assert_eq!(sentence.policy(), Some("michaelis_menten"));
        let params = sentence.parameters().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "Km");
        assert_eq!(params[0].value, json!(0.5));
        assert_eq!(params[1].value, json!("fast"));
    }

    #[test]
    fn missing_text_is_rejected() {
        assert!(Sentence::from_raw(raw("policy: one_step")).is_none());
    }

    #[test]
    fn builder_methods_match_parsed_sentence() {
        let built = Sentence::new("Y inhibits Z").with_policy("one_step");
        let parsed = Sentence::from_raw(raw("text: Y inhibits Z\npolicy: one_step")).unwrap();
        assert_eq!(built, parsed);
    }
}
