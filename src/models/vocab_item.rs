//! A learnable unit: a vocabulary word or a full sentence, paired with its meaning.
use serde::{Deserialize, Serialize};

/// What kind of unit an item is. Words are reviewed as term/meaning cards,
/// sentences are practiced with the sentence-builder exercise.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Word,
    Sentence,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Word => "word",
            ItemKind::Sentence => "sentence",
        }
    }

    /// Parses the database representation. Unknown values fall back to Word.
    pub fn from_str(s: &str) -> ItemKind {
        match s {
            "sentence" => ItemKind::Sentence,
            _ => ItemKind::Word,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct VocabItem {
    pub text: String,
    pub meaning: String,
    pub kind: ItemKind,
}
