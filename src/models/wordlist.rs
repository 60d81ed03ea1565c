//! Wordlist is a named set of vocab items
use super::VocabItem;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct Wordlist {
    pub name: String,
    pub items: Vec<VocabItem>,
}

impl Default for Wordlist {
    fn default() -> Self {
        Self {
            name: "My Wordlist".to_string(),
            items: Vec::new(),
        }
    }
}
