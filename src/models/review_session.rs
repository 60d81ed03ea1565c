//! Review session management for spaced repetition practice.
//! Runs multi-round review of due items with scheduler integration.

use super::{ReviewState, StudyItem, VocabItem};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Manages a review session with multiple rounds.
/// Items that aren't recalled (quality < 3) are repeated in subsequent rounds.
pub struct ReviewSession {
    pub wordlist_name: String,
    pub all_items: Vec<(i64, StudyItem, ReviewState)>,
    pub current_round: Vec<usize>,
    pub current_index: usize,
    pub show_meaning: bool,
    pub conn: Arc<Mutex<Connection>>,
    pub round_number: usize,
}

impl ReviewSession {
    /// Creates a new review session from items that are due for review.
    pub fn new_from_due_items(
        wordlist_name: String,
        items: Vec<(i64, VocabItem, ReviewState)>,
        conn: Arc<Mutex<Connection>>,
    ) -> Self {
        // Wrap vocab items in StudyItem for progress tracking
        let study_items: Vec<_> = items
            .into_iter()
            .map(|(id, item, state)| (id, StudyItem::new(item), state))
            .collect();

        let indices: Vec<usize> = (0..study_items.len()).collect();

        Self {
            wordlist_name,
            all_items: study_items,
            current_round: indices,
            current_index: 0,
            show_meaning: false,
            conn,
            round_number: 1,
        }
    }

    pub fn current_item(&self) -> Option<&StudyItem> {
        self.current_round
            .get(self.current_index)
            .and_then(|&idx| self.all_items.get(idx).map(|(_, item, _)| item))
    }

    pub fn toggle_meaning(&mut self) {
        self.show_meaning = !self.show_meaning;
    }

    pub fn next_item(&mut self) {
        if self.current_index + 1 < self.current_round.len() {
            self.current_index += 1;
            self.show_meaning = false;
        } else {
            // End of round - check if there are items to retry
            self.start_next_round();
        }
    }

    /// Starts a new round with items that weren't recalled (quality < 3).
    /// If no items remain, the session is complete.
    fn start_next_round(&mut self) {
        let failed_indices: Vec<usize> = self
            .current_round
            .iter()
            .copied()
            .filter(|&idx| {
                self.all_items
                    .get(idx)
                    .map(|(_, item, _)| !item.is_recalled)
                    .unwrap_or(false)
            })
            .collect();

        if !failed_indices.is_empty() {
            self.current_round = failed_indices;
            self.current_index = 0;
            self.show_meaning = false;
            self.round_number += 1;

            // Reset is_recalled for these items (they'll be shown again)
            for &idx in &self.current_round {
                if let Some((_, item, _)) = self.all_items.get_mut(idx) {
                    item.is_recalled = false;
                }
            }
        }
        // If failed_indices is empty, session ends (is_completed() = true)
    }

    /// Grades the current item and updates its scheduling state.
    /// Items graded >= 3 are marked as recalled for this session.
    pub fn grade_current_item(&mut self, quality: i32) {
        if let Some(&actual_idx) = self.current_round.get(self.current_index) {
            if let Some((_, item, state)) = self.all_items.get_mut(actual_idx) {
                if quality >= 3 {
                    item.mark_recalled();
                } else {
                    item.is_recalled = false; // Will be repeated in next round
                }

                let conn = self.conn.lock().unwrap();
                let today = crate::database::db::get_current_date(&conn)
                    .unwrap_or_else(|_| chrono::Local::now().date_naive());

                let next = crate::models::srs::compute_next_review(state, quality, today);

                // Update in database
                let _ = crate::database::db::update_review_state(&next, &conn);

                // Update in memory
                *state = next;
            }
        }
    }

    pub fn recalled_count(&self) -> usize {
        self.current_round
            .iter()
            .filter(|&&idx| {
                self.all_items
                    .get(idx)
                    .map(|(_, item, _)| item.is_recalled)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.recalled_count()
    }

    /// Returns true when all items have been recalled or current round is empty.
    pub fn is_completed(&self) -> bool {
        self.current_round.is_empty() || self.recalled_count() == self.total_count()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} items", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Retry): {} items to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::db;
    use crate::models::ItemKind;

    fn session_with_items(texts: &[&str]) -> ReviewSession {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        db::new_wordlist("Test", &conn).unwrap();

        for text in texts {
            let item = VocabItem {
                text: text.to_string(),
                meaning: format!("meaning of {}", text),
                kind: ItemKind::Word,
            };
            db::add_item("Test", &item, &conn).unwrap();
        }

        let due = db::get_items_due_for_review("Test", &conn).unwrap();
        assert_eq!(due.len(), texts.len());

        ReviewSession::new_from_due_items("Test".to_string(), due, Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_failed_items_repeat_in_next_round() {
        let mut session = session_with_items(&["uno", "dos"]);

        session.grade_current_item(5);
        session.next_item();
        session.grade_current_item(2);
        session.next_item();

        assert_eq!(session.round_number, 2);
        assert_eq!(session.total_count(), 1);
        assert_eq!(session.current_item().unwrap().item.text, "dos");
        assert!(!session.is_completed());
    }

    #[test]
    fn test_session_completes_when_all_recalled() {
        let mut session = session_with_items(&["uno", "dos"]);

        session.grade_current_item(4);
        session.next_item();
        session.grade_current_item(4);
        session.next_item();

        assert!(session.is_completed());
        assert_eq!(session.round_number, 1);
    }

    #[test]
    fn test_grading_persists_scheduling_state() {
        let mut session = session_with_items(&["uno"]);
        session.grade_current_item(4);

        let (item_id, _, state) = &session.all_items[0];
        assert_eq!(state.repetitions, 1);
        assert_eq!(state.interval_days, 1);

        // The database row was updated too: the item is no longer due today
        let conn = session.conn.lock().unwrap();
        let due = db::get_items_due_for_review("Test", &conn).unwrap();
        assert!(due.iter().all(|(id, _, _)| id != item_id));
    }

    #[test]
    fn test_empty_session_is_completed_and_safe_to_advance() {
        let mut session = session_with_items(&[]);

        assert!(session.is_completed());
        assert!(session.current_item().is_none());

        session.next_item();
        assert!(session.is_completed());
    }

    #[test]
    fn test_toggle_meaning_resets_on_advance() {
        let mut session = session_with_items(&["uno", "dos"]);

        session.toggle_meaning();
        assert!(session.show_meaning);

        session.grade_current_item(4);
        session.next_item();
        assert!(!session.show_meaning);
    }
}
