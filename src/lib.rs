pub mod database;
pub mod export;
pub mod models;

pub use models::{ItemKind, Library, ReviewSession, StudyItem, VocabItem, Wordlist};
