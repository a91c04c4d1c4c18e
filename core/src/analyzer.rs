use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOP_WORDS: HashSet<&'static str> =
        ["a", "and", "be", "have", "i", "in", "of", "that", "the", "to"]
            .into_iter()
            .collect();
}

/// Split text into tokens at every rune that is neither a letter nor a
/// number. A run of letters/numbers is one token; case is preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn lowercase_filter(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().map(|t| t.to_lowercase()).collect()
}

/// Removes common English function words. Expects already-lowercased input.
fn stop_word_filter(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| !STOP_WORDS.contains(t.as_str()))
        .collect()
}

/// Snowball English stemming: dogs -> dog, jumping -> jump, lazy -> lazi.
fn stemmer_filter(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .map(|t| STEMMER.stem(&t).into_owned())
        .collect()
}

/// Named chain of token filters applied after tokenization. The name is
/// the only thing that gets persisted; the chain is rebuilt from it on
/// load, and unknown names fall back to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Analyzer {
    /// Tokenization only: original case, stop words kept.
    #[default]
    Default,
    /// Lowercase, strip stop words, stem.
    English,
}

impl Analyzer {
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        match self {
            Analyzer::Default => tokens,
            Analyzer::English => {
                stemmer_filter(stop_word_filter(lowercase_filter(tokens)))
            }
        }
    }

    /// Persistence tag for this analyzer.
    pub fn name(&self) -> &'static str {
        match self {
            Analyzer::Default => "default_analyzer",
            Analyzer::English => "english_analyzer",
        }
    }

    /// Rebuild an analyzer from its persisted tag. Unknown or empty tags
    /// degrade to `Default` rather than failing the load.
    pub fn from_name(name: &str) -> Self {
        match name {
            "english_analyzer" => Analyzer::English,
            _ => Analyzer::Default,
        }
    }
}
