//! Container for all available wordlists
use super::Wordlist;

#[derive(Clone)]
pub struct Library {
    pub wordlists: Vec<Wordlist>,
}

impl Default for Library {
    fn default() -> Self {
        Self {
            wordlists: Vec::new(),
        }
    }
}
