//! Base reading bonus from approach rate alone
//!
//! Low approach rates give little warning, high ones give little time.
//! Between the two thresholds there is a comfortable band with no bonus.

use crate::consts::{HIGH_AR_THRESHOLD, LOW_AR_HIDDEN_MULTIPLIER, LOW_AR_THRESHOLD};

pub struct ReadingEvaluator;

impl ReadingEvaluator {
    /// Reading strain of any object; only the approach rate matters, not history
    pub fn evaluate_diff_of(hidden: bool, approach_rate: f64) -> f64 {
        if approach_rate < LOW_AR_THRESHOLD {
            let strain = 1.0 - (approach_rate / LOW_AR_THRESHOLD).powf(0.6);
            if hidden {
                strain * LOW_AR_HIDDEN_MULTIPLIER
            } else {
                strain
            }
        } else if approach_rate > HIGH_AR_THRESHOLD {
            (approach_rate / HIGH_AR_THRESHOLD).powf(4.0) - 1.0
        } else {
            // Comfortable band, no bonus at either edge
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ar0_full_bonus() {
        assert_eq!(ReadingEvaluator::evaluate_diff_of(false, 0.0), 1.0);
        assert_eq!(ReadingEvaluator::evaluate_diff_of(true, 0.0), 1.75);
    }

    #[test]
    fn test_ar20_high_bonus() {
        let strain = ReadingEvaluator::evaluate_diff_of(false, 20.0);
        assert!((strain - 13.0514).abs() < 1e-2, "got {strain}");
        // Hidden only affects the low band
        assert_eq!(ReadingEvaluator::evaluate_diff_of(true, 20.0), strain);
    }

    #[test]
    fn test_high_band_exact_value() {
        let expected = (20.0f64 / 10.33).powf(4.0) - 1.0;
        assert_eq!(ReadingEvaluator::evaluate_diff_of(false, 20.0).to_bits(), expected.to_bits());
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(ReadingEvaluator::evaluate_diff_of(true, 8.67), 0.0);
        assert_eq!(ReadingEvaluator::evaluate_diff_of(true, 10.33), 0.0);
        assert!(ReadingEvaluator::evaluate_diff_of(false, 8.66) > 0.0);
        assert!(ReadingEvaluator::evaluate_diff_of(false, 10.34) > 0.0);
    }

    #[test]
    fn test_low_band_decreases_toward_threshold() {
        let ar5 = ReadingEvaluator::evaluate_diff_of(false, 5.0);
        let ar8 = ReadingEvaluator::evaluate_diff_of(false, 8.0);
        assert!(ar5 > ar8);
        assert!(ar8 > 0.0);
    }

    proptest! {
        #[test]
        fn prop_comfortable_band_is_zero(ar in 8.67f64..=10.33, hidden: bool) {
            prop_assert_eq!(ReadingEvaluator::evaluate_diff_of(hidden, ar), 0.0);
        }

        #[test]
        fn prop_non_negative(ar in 0.0f64..15.0, hidden: bool) {
            prop_assert!(ReadingEvaluator::evaluate_diff_of(hidden, ar) >= 0.0);
        }
    }
}
