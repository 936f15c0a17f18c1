//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2: the ease factor moves with every review, passing
//! reviews grow the interval 1 → 6 → interval × ease, and a lapse starts
//! the card over at one day.

use super::SpacedRepetitionAlgorithm;
use crate::types::{Performance, ReviewRecord};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Lowest quality score that counts as a successful recall.
    pub passing_quality: u8,
    /// Interval after the first successful repetition, and after a lapse.
    pub first_interval: u32,
    pub second_interval: u32,
    /// Upper bound on any interval, in days.
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            passing_quality: 3,
            first_interval: 1,
            second_interval: 6,
            maximum_interval: 36500,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_record(&self, card_id: &str, now: DateTime<Utc>) -> ReviewRecord {
        ReviewRecord {
            card_id: card_id.to_string(),
            ease_factor: self.initial_ease,
            interval: self.first_interval,
            repetition: 0,
            next_review: now,
        }
    }

    fn schedule(&self, record: &ReviewRecord, performance: Performance, now: DateTime<Utc>) -> ReviewRecord {
        let quality = performance.quality();
        let ease_factor = self.next_ease(record.ease_factor, quality);

        let (repetition, interval) = if quality >= self.passing_quality {
            let repetition = record.repetition.saturating_add(1);
            let interval = match repetition {
                1 => self.first_interval,
                2 => self.second_interval,
                _ => (f64::from(record.interval) * ease_factor).round() as u32,
            };
            (repetition, interval.clamp(1, self.maximum_interval))
        } else {
            // Lapse: start over regardless of history
            (0, self.first_interval)
        };

        ReviewRecord {
            card_id: record.card_id.clone(),
            ease_factor,
            interval,
            repetition,
            next_review: now + Duration::days(i64::from(interval)),
        }
    }

    fn repair(&self, record: &mut ReviewRecord) -> bool {
        let mut changed = false;
        if !record.ease_factor.is_finite() || record.ease_factor < self.minimum_ease {
            record.ease_factor = if record.ease_factor.is_finite() {
                self.minimum_ease
            } else {
                self.initial_ease
            };
            changed = true;
        }
        if record.interval < 1 {
            record.interval = 1;
            changed = true;
        } else if record.interval > self.maximum_interval {
            record.interval = self.maximum_interval;
            changed = true;
        }
        changed
    }
}

impl Sm2 {
    /// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at `minimum_ease`.
    pub fn next_ease(&self, ease: f64, quality: u8) -> f64 {
        let miss = 5.0 - f64::from(quality.min(5));
        let ease = ease + (0.1 - miss * (0.08 + miss * 0.02));
        ease.max(self.minimum_ease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    fn review(sm2: &Sm2, record: &ReviewRecord, performance: Performance) -> ReviewRecord {
        sm2.schedule(record, performance, now())
    }

    #[test]
    fn new_card_passes_to_one_day() {
        let sm2 = Sm2::default();
        let record = sm2.initial_record("c1", now());
        let result = sm2.schedule(&record, Performance::Easy, now());
        assert_eq!(result.repetition, 1);
        assert_eq!(result.interval, 1);
        assert_eq!(result.next_review, now() + Duration::days(1));
    }

    #[test]
    fn second_pass_is_six_days() {
        let sm2 = Sm2::default();
        let first = review(&sm2, &sm2.initial_record("c1", now()), Performance::Medium);
        let second = review(&sm2, &first, Performance::Medium);
        assert_eq!(second.repetition, 2);
        assert_eq!(second.interval, 6);
    }

    #[test]
    fn third_pass_multiplies_by_new_ease() {
        let sm2 = Sm2::default();
        let mut record = sm2.initial_record("c1", now());
        for _ in 0..3 {
            record = review(&sm2, &record, Performance::Easy);
        }
        assert_eq!(record.repetition, 3);
        assert!((record.ease_factor - 2.8).abs() < 1e-9);
        assert_eq!(record.interval, (6.0 * record.ease_factor).round() as u32);
        assert_eq!(record.interval, 17);
    }

    #[test]
    fn easy_adds_a_tenth_of_ease() {
        let sm2 = Sm2::default();
        assert!((sm2.next_ease(2.5, 5) - 2.6).abs() < 1e-9);
    }

    #[test]
    fn quality_four_leaves_ease_unchanged() {
        let sm2 = Sm2::default();
        assert!((sm2.next_ease(2.5, 4) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn medium_lowers_ease() {
        let sm2 = Sm2::default();
        assert!((sm2.next_ease(2.5, 3) - 2.36).abs() < 1e-9);
    }

    #[test]
    fn hard_lapses_a_long_streak() {
        let sm2 = Sm2::default();
        let record = ReviewRecord {
            card_id: "c1".to_string(),
            ease_factor: 2.7,
            interval: 45,
            repetition: 6,
            next_review: now(),
        };
        let result = sm2.schedule(&record, Performance::Hard, now());
        assert_eq!(result.repetition, 0);
        assert_eq!(result.interval, 1);
        assert_eq!(result.next_review, now() + Duration::days(1));
        assert!((result.ease_factor - 2.16).abs() < 1e-9);
    }

    #[test]
    fn ease_factor_never_below_minimum() {
        let sm2 = Sm2::default();
        let mut record = sm2.initial_record("c1", now());
        for _ in 0..10 {
            record = review(&sm2, &record, Performance::Hard);
            assert!(record.ease_factor >= sm2.minimum_ease);
        }
        assert_eq!(record.ease_factor, sm2.minimum_ease);
    }

    #[test]
    fn interval_is_capped() {
        let sm2 = Sm2::default();
        let record = ReviewRecord {
            card_id: "c1".to_string(),
            ease_factor: 2.5,
            interval: 30000,
            repetition: 12,
            next_review: now(),
        };
        let result = sm2.schedule(&record, Performance::Easy, now());
        assert_eq!(result.interval, sm2.maximum_interval);
    }

    #[test]
    fn repair_fixes_out_of_range_fields() {
        let sm2 = Sm2::default();
        let mut record = ReviewRecord {
            card_id: "c1".to_string(),
            ease_factor: 0.4,
            interval: 0,
            repetition: 2,
            next_review: now(),
        };
        assert!(sm2.repair(&mut record));
        assert_eq!(record.ease_factor, 1.3);
        assert_eq!(record.interval, 1);

        let mut nan = ReviewRecord {
            ease_factor: f64::NAN,
            ..record.clone()
        };
        assert!(sm2.repair(&mut nan));
        assert_eq!(nan.ease_factor, sm2.initial_ease);
    }

    #[test]
    fn repair_leaves_valid_records_alone() {
        let sm2 = Sm2::default();
        let mut record = sm2.initial_record("c1", now());
        let before = record.clone();
        assert!(!sm2.repair(&mut record));
        assert_eq!(record, before);
    }
}
