//! MiniJinja-backed prompt templates

use super::Language;
use crate::error::{PickError, Result};
use minijinja::Environment;
use std::collections::HashMap;

/// A named template with one source per language
pub struct PromptTemplate {
    name: String,
    sources: HashMap<Language, String>,
}

impl PromptTemplate {
    /// Create a template with Korean and English sources
    ///
    /// Both sources are parsed up front so a broken template fails at
    /// construction instead of at send time.
    pub fn bilingual(
        name: impl Into<String>,
        korean: impl Into<String>,
        english: impl Into<String>,
    ) -> Result<Self> {
        let template = Self {
            name: name.into(),
            sources: HashMap::from([
                (Language::Korean, korean.into()),
                (Language::English, english.into()),
            ]),
        };

        let env = Environment::new();
        for (lang, source) in &template.sources {
            env.template_from_str(source).map_err(|e| {
                PickError::Prompt(format!(
                    "failed to parse template '{}' for language '{lang}': {e}",
                    template.name
                ))
            })?;
        }

        Ok(template)
    }

    /// Raw source for a language
    pub fn source(&self, lang: Language) -> Option<&str> {
        self.sources.get(&lang).map(String::as_str)
    }

    /// Render with variables
    pub fn render(&self, lang: Language, vars: &serde_json::Value) -> Result<String> {
        let source = self.source(lang).ok_or_else(|| {
            PickError::Prompt(format!(
                "template '{}' has no source for language '{lang}'",
                self.name
            ))
        })?;

        let env = Environment::new();
        env.render_str(source, minijinja::Value::from_serialize(vars))
            .map_err(|e| {
                PickError::Prompt(format!("failed to render template '{}': {e}", self.name))
            })
    }
}

impl std::fmt::Debug for PromptTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptTemplate")
            .field("name", &self.name)
            .field("languages", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_per_language() {
        let template =
            PromptTemplate::bilingual("greeting", "안녕하세요, {{ name }}!", "Hello, {{ name }}!")
                .unwrap();

        let ko = template
            .render(Language::Korean, &json!({ "name": "AAPL" }))
            .unwrap();
        assert_eq!(ko, "안녕하세요, AAPL!");

        let en = template
            .render(Language::English, &json!({ "name": "AAPL" }))
            .unwrap();
        assert_eq!(en, "Hello, AAPL!");
    }

    #[test]
    fn test_parse_error_at_construction() {
        let result = PromptTemplate::bilingual("broken", "{{ unclosed", "fine");
        assert!(matches!(result, Err(PickError::Prompt(msg)) if msg.contains("broken")));
    }

    #[test]
    fn test_missing_variable_renders_empty() {
        let template = PromptTemplate::bilingual("t", "[{{ missing }}]", "[{{ missing }}]").unwrap();
        assert_eq!(template.render(Language::English, &json!({})).unwrap(), "[]");
    }
}
