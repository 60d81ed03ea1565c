pub mod library;
pub mod review_session;
pub mod review_state;
pub mod sentence_builder;
pub mod srs;
pub mod study_item;
pub mod vocab_item;
pub mod wordlist;

pub use library::Library;
pub use review_session::ReviewSession;
pub use review_state::ReviewState;
pub use sentence_builder::SentenceBuilder;
pub use study_item::StudyItem;
pub use vocab_item::{ItemKind, VocabItem};
pub use wordlist::Wordlist;
