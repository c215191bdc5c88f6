//! SM-2 spaced repetition scheduling.
//!
//! Based on SuperMemo 2 with a 0-5 quality scale and configurable parameters.

use chrono::{DateTime, Duration, Utc};

use crate::types::{Quality, ReviewState};

/// SM-2 scheduler with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Interval after the first and second successful review, in days.
    pub first_interval: i64,
    /// Interval after the third successful review, in days.
    pub second_interval: i64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            first_interval: 1,
            second_interval: 6,
        }
    }
}

/// Pure scheduling output: the next ease, interval and repetition count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetition: u32,
}

impl Sm2 {
    /// State for an item that has never been reviewed.
    pub fn initial_state(&self) -> ReviewState {
        ReviewState {
            ease_factor: self.initial_ease,
            ..ReviewState::default()
        }
    }

    /// Compute the next schedule from the prior ease, interval and
    /// consecutive-success count.
    ///
    /// A failing grade (quality < 3) resets progress to "review tomorrow" and
    /// leaves the ease untouched. A passing grade adjusts the ease (+0.1 for
    /// quality 5 down to -0.06 for quality 3) and grows the interval: one day
    /// for the first two successes, six days for the third, then the prior
    /// interval multiplied by the new ease. The ease never drops below
    /// `minimum_ease` and the interval never drops below one day.
    pub fn next_schedule(
        &self,
        ease_factor: f64,
        interval_days: i64,
        repetition: u32,
        quality: Quality,
    ) -> Schedule {
        if !quality.is_success() {
            return Schedule {
                ease_factor,
                interval_days: self.first_interval,
                repetition: 0,
            };
        }

        let penalty = (5 - quality.value()) as f64;
        let ease = (ease_factor + 0.1 - penalty * 0.08).max(self.minimum_ease);

        let interval = if repetition <= 1 {
            self.first_interval
        } else if repetition == 2 {
            self.second_interval
        } else {
            (interval_days as f64 * ease).round() as i64
        };

        Schedule {
            ease_factor: ease,
            interval_days: interval.max(1),
            repetition: repetition + 1,
        }
    }

    /// Apply a review to an item's full state.
    ///
    /// Runs [`Sm2::next_schedule`] and updates the bookkeeping fields: review
    /// counters, the correct streak, the last result and both timestamps.
    pub fn review(&self, state: &ReviewState, quality: Quality, now: DateTime<Utc>) -> ReviewState {
        let next = self.next_schedule(
            state.ease_factor,
            state.interval_days,
            state.repetition,
            quality,
        );
        let success = quality.is_success();

        ReviewState {
            ease_factor: next.ease_factor,
            interval_days: next.interval_days,
            repetition: next.repetition,
            last_reviewed_at: Some(now),
            next_review_at: Some(now + Duration::days(next.interval_days)),
            total_reviews: state.total_reviews + 1,
            total_correct: state.total_correct + u32::from(success),
            correct_streak: if success { state.correct_streak + 1 } else { 0 },
            last_result: Some(success),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn q(value: i64) -> Quality {
        Quality::new(value).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn failure_resets_progress() {
        let sm2 = Sm2::default();
        for quality in 0..3 {
            let next = sm2.next_schedule(2.1, 42, 7, q(quality));
            assert_close(next.ease_factor, 2.1);
            assert_eq!(next.interval_days, 1);
            assert_eq!(next.repetition, 0);
        }
    }

    #[test]
    fn first_review_with_top_grade() {
        let sm2 = Sm2::default();
        let next = sm2.next_schedule(2.5, 0, 0, q(5));
        assert_close(next.ease_factor, 2.6);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetition, 1);
    }

    #[test]
    fn second_review_stays_at_one_day() {
        let sm2 = Sm2::default();
        let next = sm2.next_schedule(2.6, 1, 1, q(5));
        assert_close(next.ease_factor, 2.7);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetition, 2);
    }

    #[test]
    fn third_review_jumps_to_six_days() {
        let sm2 = Sm2::default();
        let next = sm2.next_schedule(2.7, 1, 2, q(5));
        assert_close(next.ease_factor, 2.8);
        assert_eq!(next.interval_days, 6);
        assert_eq!(next.repetition, 3);
    }

    #[test]
    fn later_reviews_multiply_by_ease() {
        let sm2 = Sm2::default();
        let next = sm2.next_schedule(2.8, 6, 3, q(5));
        assert_close(next.ease_factor, 2.9);
        assert_eq!(next.interval_days, 17); // round(6 * 2.9)
        assert_eq!(next.repetition, 4);
    }

    #[test]
    fn quality_three_slightly_penalizes_ease() {
        let sm2 = Sm2::default();
        let next = sm2.next_schedule(2.5, 0, 0, q(3));
        assert_close(next.ease_factor, 2.44);
        assert_eq!(next.repetition, 1);
    }

    #[test]
    fn ease_never_drops_below_minimum() {
        let sm2 = Sm2::default();
        let mut ease = 1.35;
        for _ in 0..10 {
            let next = sm2.next_schedule(ease, 10, 5, q(3));
            assert!(next.ease_factor >= sm2.minimum_ease);
            ease = next.ease_factor;
        }
        assert_close(ease, sm2.minimum_ease);
    }

    #[test]
    fn zero_prior_interval_is_floored_to_one_day() {
        let sm2 = Sm2::default();
        let next = sm2.next_schedule(2.5, 0, 3, q(4));
        assert_eq!(next.interval_days, 1);
    }

    #[test]
    fn repetition_grows_by_one_per_success() {
        let sm2 = Sm2::default();
        let mut schedule = Schedule {
            ease_factor: sm2.initial_ease,
            interval_days: 0,
            repetition: 0,
        };
        for expected in 1..=8 {
            schedule = sm2.next_schedule(
                schedule.ease_factor,
                schedule.interval_days,
                schedule.repetition,
                q(4),
            );
            assert_eq!(schedule.repetition, expected);
            assert!(schedule.ease_factor >= sm2.minimum_ease);
        }
    }

    #[test]
    fn review_updates_counters_and_timestamps() {
        let sm2 = Sm2::default();
        let now = Utc::now();
        let state = sm2.initial_state();

        let after = sm2.review(&state, q(4), now);
        assert_eq!(after.total_reviews, 1);
        assert_eq!(after.total_correct, 1);
        assert_eq!(after.correct_streak, 1);
        assert_eq!(after.last_result, Some(true));
        assert_eq!(after.last_reviewed_at, Some(now));
        assert_eq!(
            after.next_review_at,
            Some(now + Duration::days(after.interval_days))
        );
    }

    #[test]
    fn review_failure_breaks_streak_but_keeps_totals() {
        let sm2 = Sm2::default();
        let now = Utc::now();
        let mut state = sm2.initial_state();

        state = sm2.review(&state, q(5), now);
        state = sm2.review(&state, q(5), now);
        state = sm2.review(&state, q(1), now);

        assert_eq!(state.total_reviews, 3);
        assert_eq!(state.total_correct, 2);
        assert_eq!(state.correct_streak, 0);
        assert_eq!(state.repetition, 0);
        assert_eq!(state.interval_days, 1);
        assert_eq!(state.last_result, Some(false));
    }
}
