use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{split_identifier, DomainError, Term};

/// File formats the Code Spell Checker extension can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryFormat {
    /// One word per line, referenced from `cSpell.customDictionaries`.
    #[default]
    Text,
    /// A standalone `cspell.json` carrying a `words` list.
    CSpell,
}

impl DictionaryFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DictionaryFormat::CSpell,
            _ => DictionaryFormat::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DictionaryFormat::Text => "text",
            DictionaryFormat::CSpell => "cspell",
        }
    }
}

impl std::fmt::Display for DictionaryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CSpellDocument {
    version: String,
    language: String,
    words: Vec<String>,
}

/// How harvested terms become dictionary words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryOptions {
    pub dedupe: bool,
    pub split_identifiers: bool,
    pub min_length: usize,
    /// Lowercased words already known to the spell checker.
    pub exclude: HashSet<String>,
}

impl Default for DictionaryOptions {
    fn default() -> Self {
        Self {
            dedupe: true,
            split_identifiers: false,
            min_length: 1,
            exclude: HashSet::new(),
        }
    }
}

impl DictionaryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn with_split_identifiers(mut self, split: bool) -> Self {
        self.split_identifiers = split;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_exclude<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        self.exclude.remove("");
        self
    }

    fn accepts(&self, word: &str) -> bool {
        !word.is_empty()
            && word.chars().count() >= self.min_length
            && !self.exclude.contains(&word.to_lowercase())
    }
}

/// The ordered word list written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDictionary {
    words: Vec<String>,
}

impl SpellDictionary {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn from_terms(terms: &[Term], options: &DictionaryOptions) -> Self {
        let mut seen = HashSet::new();
        let mut words = Vec::new();

        for term in terms {
            let candidates = if options.split_identifiers {
                split_identifier(term.text())
            } else {
                vec![term.text().to_string()]
            };

            for word in candidates {
                if !options.accepts(&word) {
                    continue;
                }
                if options.dedupe && !seen.insert(word.clone()) {
                    continue;
                }
                words.push(word);
            }
        }

        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn render(&self, format: DictionaryFormat) -> Result<String, DomainError> {
        match format {
            DictionaryFormat::Text => Ok(self.words.iter().map(|w| format!("{}\n", w)).collect()),
            DictionaryFormat::CSpell => {
                let document = CSpellDocument {
                    version: "0.2".to_string(),
                    language: "en".to_string(),
                    words: self.words.clone(),
                };
                let mut rendered = serde_json::to_string_pretty(&document)?;
                rendered.push('\n');
                Ok(rendered)
            }
        }
    }
}

/// Reads a base word list: one word per line, `#` starts a comment line.
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TermKind;

    fn terms(words: &[&str]) -> Vec<Term> {
        words
            .iter()
            .map(|w| Term::new(*w, TermKind::Function, "lib"))
            .collect()
    }

    #[test]
    fn test_from_terms_dedupes_keeping_first_occurrence() {
        let dict = SpellDictionary::from_terms(
            &terms(&["numpy", "array", "pandas", "array"]),
            &DictionaryOptions::default(),
        );
        assert_eq!(dict.words(), ["numpy", "array", "pandas"]);
    }

    #[test]
    fn test_from_terms_without_dedupe_keeps_duplicates() {
        let dict = SpellDictionary::from_terms(
            &terms(&["array", "array"]),
            &DictionaryOptions::new().with_dedupe(false),
        );
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_from_terms_splits_and_filters() {
        let options = DictionaryOptions::new()
            .with_split_identifiers(true)
            .with_min_length(3)
            .with_exclude(["Read", "# ignored", ""]);
        let dict = SpellDictionary::from_terms(&terms(&["read_csv", "DataFrame", "np_ix"]), &options);

        assert_eq!(dict.words(), ["csv", "Data", "Frame"]);
    }

    #[test]
    fn test_render_text() {
        let dict = SpellDictionary::new(vec!["numpy".to_string(), "ndarray".to_string()]);
        assert_eq!(dict.render(DictionaryFormat::Text).unwrap(), "numpy\nndarray\n");
        assert_eq!(SpellDictionary::default().render(DictionaryFormat::Text).unwrap(), "");
    }

    #[test]
    fn test_render_cspell() {
        let dict = SpellDictionary::new(vec!["numpy".to_string()]);
        let rendered = dict.render(DictionaryFormat::CSpell).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["version"], "0.2");
        assert_eq!(value["language"], "en");
        assert_eq!(value["words"], serde_json::json!(["numpy"]));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DictionaryFormat::from_path(Path::new(".vscode/cspell.JSON")),
            DictionaryFormat::CSpell
        );
        assert_eq!(
            DictionaryFormat::from_path(Path::new("data-science-en.txt")),
            DictionaryFormat::Text
        );
    }

    #[test]
    fn test_parse_word_list() {
        assert_eq!(
            parse_word_list("# base words\nthe\n\n  array  \n"),
            vec!["the", "array"]
        );
    }
}
