//! Letter grade scale.
//!
//! Grade is a pure, total function of the score. The thresholds are fixed
//! and compared with `>=` in descending order, so boundary scores resolve
//! to the higher grade.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter grade on the fixed five-point scale.
///
/// Declaration order is best-to-worst, so the derived `Ord` ranks `A`
/// lowest. Use [`Grade::rank`] when comparing quality directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Threshold table, best grade first.
    const THRESHOLDS: [(f64, Grade); 5] = [
        (70.0, Grade::A),
        (60.0, Grade::B),
        (50.0, Grade::C),
        (45.0, Grade::D),
        (40.0, Grade::E),
    ];

    /// Compute the grade for a score in [0, 100].
    pub fn from_score(score: f64) -> Self {
        for (threshold, grade) in Self::THRESHOLDS {
            if score >= threshold {
                return grade;
            }
        }
        Grade::F
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }

    /// Numeric quality rank; higher is better.
    pub fn rank(self) -> u8 {
        match self {
            Grade::A => 5,
            Grade::B => 4,
            Grade::C => 3,
            Grade::D => 2,
            Grade::E => 1,
            Grade::F => 0,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(Grade::from_score(100.0), Grade::A);
        assert_eq!(Grade::from_score(72.0), Grade::A);
        assert_eq!(Grade::from_score(70.0), Grade::A);
        assert_eq!(Grade::from_score(69.9), Grade::B);
        assert_eq!(Grade::from_score(60.0), Grade::B);
        assert_eq!(Grade::from_score(50.0), Grade::C);
        assert_eq!(Grade::from_score(45.0), Grade::D);
        assert_eq!(Grade::from_score(40.0), Grade::E);
        assert_eq!(Grade::from_score(39.9), Grade::F);
        assert_eq!(Grade::from_score(30.0), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn serializes_as_letter() {
        let json = serde_json::to_string(&Grade::A).expect("serialize grade");
        assert_eq!(json, "\"A\"");
        let round: Grade = serde_json::from_str("\"F\"").expect("deserialize grade");
        assert_eq!(round, Grade::F);
    }

    proptest! {
        #[test]
        fn monotonic_over_valid_scores(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Grade::from_score(lo).rank() <= Grade::from_score(hi).rank());
        }
    }
}
