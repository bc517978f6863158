//! Line and word types.

use super::Geometry;
use serde::{Deserialize, Serialize};

/// A line of recognized words.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Words in reading order
    pub words: Vec<Word>,
}

impl Line {
    /// Create a new empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line from words.
    pub fn from_words(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Add a word to the line.
    pub fn add_word(&mut self, word: Word) {
        self.words.push(word);
    }

    /// Word values joined by a single space.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|word| word.value.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Smallest box enclosing every word of the line.
    pub fn geometry(&self) -> Option<Geometry> {
        Geometry::enclosing(self.words.iter().map(|word| &word.geometry))
    }

    /// Check if the line has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A single recognized word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Recognized text
    pub value: String,

    /// Engine confidence in the range 0..1
    #[serde(default)]
    pub confidence: f32,

    /// Location of the word on the page, relative to the page size
    pub geometry: Geometry,
}

impl Word {
    /// Create a word with full confidence.
    pub fn new(value: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            value: value.into(),
            confidence: 1.0,
            geometry,
        }
    }

    /// Set the engine confidence.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}
