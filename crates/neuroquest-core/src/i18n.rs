//! Translation catalogs and lookup.
//!
//! Catalogs are nested JSON objects addressed with dot-separated keys such as
//! `hero.benefits.safeInclusive.title`. A miss never fails: the key itself is
//! returned and a warning is logged.

use crate::template::{StyledText, parse_styled_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    En,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
        }
    }
}

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog root must be a JSON object")]
    NotAnObject,
}

/// A nested translation tree for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    root: Value,
}

impl Catalog {
    /// Load a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_value(root)
    }

    /// Wrap an already-parsed JSON tree.
    pub fn from_value(root: Value) -> Result<Self, CatalogError> {
        if root.is_object() {
            Ok(Self { root })
        } else {
            Err(CatalogError::NotAnObject)
        }
    }

    /// Resolve a dot-separated key to a string.
    ///
    /// Numeric segments index into arrays, so `subjects.science.features.0`
    /// reaches list entries.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut value = &self.root;
        for segment in key.split('.') {
            value = match value {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        value.as_str()
    }
}

/// Looks up interface strings in the catalog of the current language.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    catalogs: HashMap<Language, Catalog>,
    language: Language,
}

impl Translator {
    /// Create a translator with one catalog, selecting its language.
    pub fn new(language: Language, catalog: Catalog) -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert(language, catalog);
        Self { catalogs, language }
    }

    /// Add or replace the catalog for a language.
    pub fn insert_catalog(&mut self, language: Language, catalog: Catalog) {
        self.catalogs.insert(language, catalog);
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Translate `key`, falling back to the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self.catalogs.get(&self.language).and_then(|c| c.lookup(key)) {
            Some(text) => Cow::Borrowed(text),
            None => {
                log::warn!("Translation key not found: {}", key);
                Cow::Borrowed(key)
            }
        }
    }

    /// Translate `key` and parse styled runs and markup in the result.
    pub fn styled(&self, key: &str) -> StyledText {
        let text = self.t(key);
        if text.contains('{') || text.contains('<') {
            parse_styled_text(&text)
        } else {
            StyledText::plain(text)
        }
    }

    /// Translate `key`, treating any markup as a single raw fragment.
    pub fn html(&self, key: &str) -> StyledText {
        let text = self.t(key);
        if text.contains('<') && text.contains('>') {
            StyledText::raw(text)
        } else {
            StyledText::plain(text)
        }
    }

    /// Translate `key` handling both styled runs and markup.
    pub fn complete(&self, key: &str) -> StyledText {
        self.styled(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::RenderNode;

    const EN: &str = r#"{
        "nav": { "brand": "NeuroQuest Academy" },
        "hero": {
            "title": "Where {Every|text-purple-600 font-bold} Brain Learns",
            "subtitle": "Built <em>with and for</em> the community",
            "benefits": { "count": 4 }
        },
        "subjects": {
            "science": {
                "features": ["Ecosystem studies", "Kitchen <strong>chemistry</strong>"]
            }
        }
    }"#;

    fn translator() -> Translator {
        let _ = env_logger::builder().is_test(true).try_init();
        Translator::new(Language::En, Catalog::from_json(EN).unwrap())
    }

    #[test]
    fn test_nested_lookup() {
        let tr = translator();
        assert_eq!(tr.t("nav.brand"), "NeuroQuest Academy");
    }

    #[test]
    fn test_array_index_lookup() {
        let tr = translator();
        assert_eq!(tr.t("subjects.science.features.0"), "Ecosystem studies");
        assert_eq!(tr.t("subjects.science.features.9"), "subjects.science.features.9");
    }

    #[test]
    fn test_miss_returns_key() {
        let tr = translator();
        assert_eq!(tr.t("nav.missing"), "nav.missing");
        assert_eq!(tr.t("nav.brand.deeper"), "nav.brand.deeper");
    }

    #[test]
    fn test_non_string_value_returns_key() {
        let tr = translator();
        assert_eq!(tr.t("hero.benefits"), "hero.benefits");
        assert_eq!(tr.t("hero.benefits.count"), "hero.benefits.count");
    }

    #[test]
    fn test_missing_catalog_returns_key() {
        let tr = Translator::default();
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t("nav.brand"), "nav.brand");
    }

    #[test]
    fn test_styled_parses_runs() {
        let tr = translator();
        let out = tr.styled("hero.title");
        assert_eq!(out.len(), 3);
        assert_eq!(
            out.nodes()[1],
            RenderNode::Styled {
                tag: "span".to_string(),
                class: "text-purple-600 font-bold".to_string(),
                text: "Every".to_string(),
            }
        );
    }

    #[test]
    fn test_styled_miss_is_plain_key() {
        let tr = translator();
        let out = tr.styled("hero.nothing");
        assert_eq!(out.single(), Some(&RenderNode::Text("hero.nothing".to_string())));
    }

    #[test]
    fn test_html_wraps_markup() {
        let tr = translator();
        let out = tr.html("hero.subtitle");
        assert_eq!(
            out.single(),
            Some(&RenderNode::Raw("Built <em>with and for</em> the community".to_string()))
        );
        assert_eq!(
            tr.html("nav.brand").single(),
            Some(&RenderNode::Text("NeuroQuest Academy".to_string()))
        );
    }

    #[test]
    fn test_complete_matches_styled() {
        let tr = translator();
        assert_eq!(tr.complete("hero.title"), tr.styled("hero.title"));
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(matches!(Catalog::from_json("[1, 2]"), Err(CatalogError::NotAnObject)));
        assert!(matches!(Catalog::from_json("{ nope"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_set_language() {
        let mut tr = translator();
        tr.insert_catalog(Language::En, Catalog::from_json(r#"{"nav": {"brand": "NQ"}}"#).unwrap());
        tr.set_language(Language::En);
        assert_eq!(tr.t("nav.brand"), "NQ");
        assert_eq!(Language::En.code(), "en");
    }
}
