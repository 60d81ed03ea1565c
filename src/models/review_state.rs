//! Per-item spaced repetition scheduling state.
use chrono::NaiveDate;

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewState {
    pub item_id: i64,
    /// Ease factor. Higher means the item is easier and intervals grow faster.
    pub difficulty: f64,
    pub interval_days: i32,
    /// Consecutive successful recalls since the last failure.
    pub repetitions: i32,
    pub next_review_at: NaiveDate,
}

impl ReviewState {
    /// Fresh SM-2 state for an item that just entered the system: due immediately.
    pub fn new_for_item(item_id: i64, today: NaiveDate) -> Self {
        Self {
            item_id,
            difficulty: 2.5,
            interval_days: 0,
            repetitions: 0,
            next_review_at: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let state = ReviewState::new_for_item(7, today);

        assert_eq!(state.item_id, 7);
        assert_eq!(state.difficulty, 2.5);
        assert_eq!(state.interval_days, 0);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.next_review_at, today);
    }
}
