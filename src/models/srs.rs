//! SM-2-style review interval scheduler.
//!
//! Given a self-assessed recall quality and an item's prior scheduling state,
//! computes the next review interval, repetition count and ease factor:
//! - Quality 3-5 (successful recall): intervals progress 1 day → 6 days →
//!   previous interval × ease factor; the ease factor is adjusted by the
//!   SM-2 delta and repetitions increase by one
//! - Quality 0-2 (failed recall): repetitions reset to 0, the item comes
//!   back in 1 day, the ease factor is left untouched
//! - The ease factor never falls below 1.3
//!
//! Quality is conventionally 0-5 but is deliberately not validated or
//! clamped here; out-of-range values flow through the ease arithmetic and
//! the caller owns the range. The function is pure apart from taking the
//! review date as an argument.

use super::ReviewState;
use chrono::{Days, NaiveDate};

/// Lower bound for the ease factor.
const MIN_DIFFICULTY: f64 = 1.3;

/// Computes the scheduling state after one review event.
/// `today` is the calendar date the review happened on; the returned
/// `next_review_at` is `today` plus the new interval.
pub fn compute_next_review(state: &ReviewState, quality: i32, today: NaiveDate) -> ReviewState {
    let (interval_days, repetitions, raw_difficulty) = if quality >= 3 {
        // Interval progression keyed on the repetition count before this review.
        // The multiply branch uses the ease factor supplied by the caller,
        // not the one updated below.
        let interval = match state.repetitions {
            0 => 1,
            1 => 6,
            _ => ((state.interval_days as f64 * state.difficulty).round() as i32).max(1),
        };
        let q = quality as f64;
        let difficulty = state.difficulty + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
        (interval, state.repetitions + 1, difficulty)
    } else {
        // Failed recall: progress resets, the ease factor stays as it was.
        (1, 0, state.difficulty)
    };

    let difficulty = if raw_difficulty < MIN_DIFFICULTY {
        MIN_DIFFICULTY
    } else {
        raw_difficulty
    };

    ReviewState {
        item_id: state.item_id,
        difficulty,
        interval_days,
        repetitions,
        next_review_at: today + Days::new(interval_days as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state(interval_days: i32, repetitions: i32, difficulty: f64) -> ReviewState {
        ReviewState {
            item_id: 1,
            difficulty,
            interval_days,
            repetitions,
            next_review_at: date(2024, 1, 1),
        }
    }

    #[test]
    fn test_first_success_gives_one_day() {
        let next = compute_next_review(&state(1, 0, 2.5), 4, date(2024, 1, 1));

        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 1);
        // quality 4 delta is 0.1 - 1*(0.08 + 1*0.02) = 0
        assert!((next.difficulty - 2.5).abs() < 1e-9);
        assert_eq!(next.next_review_at, date(2024, 1, 2));
    }

    #[test]
    fn test_second_success_gives_six_days() {
        let next = compute_next_review(&state(6, 1, 2.5), 5, date(2024, 1, 1));

        assert_eq!(next.interval_days, 6);
        assert_eq!(next.repetitions, 2);
        assert!((next.difficulty - 2.6).abs() < 1e-9);
        assert_eq!(next.next_review_at, date(2024, 1, 7));
    }

    #[test]
    fn test_later_successes_multiply_by_ease() {
        let next = compute_next_review(&state(6, 2, 2.5), 4, date(2024, 1, 1));

        // round(6 * 2.5) with the ease factor as it was before this review
        assert_eq!(next.interval_days, 15);
        assert_eq!(next.repetitions, 3);
        assert!((next.difficulty - 2.5).abs() < 1e-9);
        assert_eq!(next.next_review_at, date(2024, 1, 16));
    }

    #[test]
    fn test_failure_resets_progress_but_not_ease() {
        let next = compute_next_review(&state(30, 5, 2.0), 1, date(2024, 1, 1));

        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.difficulty, 2.0);
        assert_eq!(next.next_review_at, date(2024, 1, 2));
    }

    #[test]
    fn test_ease_floor() {
        // delta for quality 3 is 0.1 - 2*(0.08 + 2*0.02) = -0.14
        let next = compute_next_review(&state(10, 3, 1.31), 3, date(2024, 1, 1));

        assert_eq!(next.difficulty, 1.3);
        assert_eq!(next.repetitions, 4);
    }

    #[test]
    fn test_quality_three_shrinks_ease() {
        let next = compute_next_review(&state(10, 3, 2.5), 3, date(2024, 1, 1));

        assert!((next.difficulty - 2.36).abs() < 1e-9);
        assert_eq!(next.interval_days, 25);
    }

    #[test]
    fn test_quality_is_not_clamped_above_five() {
        // quality 7: delta = 0.1 - (-2)*(0.08 + (-2)*0.02) = 0.18
        let next = compute_next_review(&state(10, 3, 2.5), 7, date(2024, 1, 1));

        assert!((next.difficulty - 2.68).abs() < 1e-9);
        assert_eq!(next.repetitions, 4);
    }

    #[test]
    fn test_negative_quality_is_a_failure() {
        let next = compute_next_review(&state(10, 3, 2.2), -4, date(2024, 1, 1));

        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.difficulty, 2.2);
    }

    #[test]
    fn test_due_date_is_always_in_the_future() {
        let today = date(2024, 6, 15);
        for quality in -1..=7 {
            for repetitions in 0..4 {
                let next = compute_next_review(&state(8, repetitions, 2.5), quality, today);
                assert!(next.next_review_at > today);
                assert!(next.interval_days >= 1);
                assert!(next.difficulty >= 1.3);
            }
        }
    }

    #[test]
    fn test_result_depends_on_date_only_through_due_date() {
        let prior = state(12, 4, 2.1);
        let a = compute_next_review(&prior, 4, date(2024, 1, 1));
        let b = compute_next_review(&prior, 4, date(2024, 3, 10));

        assert_eq!(a.interval_days, b.interval_days);
        assert_eq!(a.repetitions, b.repetitions);
        assert_eq!(a.difficulty, b.difficulty);
        assert_ne!(a.next_review_at, b.next_review_at);
    }

    #[test]
    fn test_month_rollover() {
        let next = compute_next_review(&state(6, 2, 2.5), 4, date(2024, 1, 20));
        assert_eq!(next.next_review_at, date(2024, 2, 4));
    }
}
