//! Session wrapper around a vocab item that tracks recall progress.
use super::VocabItem;
use std::time::SystemTime;

#[derive(Clone)]
pub struct StudyItem {
    pub item: VocabItem,
    pub is_recalled: bool,
    pub last_recalled_at: Option<SystemTime>,
}

impl StudyItem {
    pub fn new(item: VocabItem) -> Self {
        Self {
            item,
            is_recalled: false,
            last_recalled_at: None,
        }
    }

    pub fn mark_recalled(&mut self) {
        self.is_recalled = true;
        self.last_recalled_at = Some(SystemTime::now());
    }
}
