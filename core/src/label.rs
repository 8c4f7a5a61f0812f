//! Severity label for a returned priority score.

use std::fmt;

use serde::Serialize;

const HIGH_THRESHOLD: f64 = 100.0;
const MEDIUM_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ScoreLabel {
    Low,
    Medium,
    High,
}

impl ScoreLabel {
    /// `>= 100` is High, `>= 60` Medium, everything else (NaN included) Low.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            ScoreLabel::High
        } else if score >= MEDIUM_THRESHOLD {
            ScoreLabel::Medium
        } else {
            ScoreLabel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreLabel::High => "High",
            ScoreLabel::Medium => "Medium",
            ScoreLabel::Low => "Low",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn score_to_label(score: f64) -> ScoreLabel {
    ScoreLabel::from_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(score_to_label(59.0), ScoreLabel::Low);
        assert_eq!(score_to_label(59.999), ScoreLabel::Low);
        assert_eq!(score_to_label(60.0), ScoreLabel::Medium);
        assert_eq!(score_to_label(99.0), ScoreLabel::Medium);
        assert_eq!(score_to_label(99.5), ScoreLabel::Medium);
        assert_eq!(score_to_label(100.0), ScoreLabel::High);
    }

    #[test]
    fn total_over_odd_inputs() {
        assert_eq!(score_to_label(-999.0), ScoreLabel::Low);
        assert_eq!(score_to_label(f64::NEG_INFINITY), ScoreLabel::Low);
        assert_eq!(score_to_label(f64::INFINITY), ScoreLabel::High);
        assert_eq!(score_to_label(f64::NAN), ScoreLabel::Low);
    }

    #[test]
    fn monotonic_across_range() {
        let mut prev = score_to_label(-200.0);
        let mut score = -200.0;
        while score <= 300.0 {
            let label = score_to_label(score);
            assert!(label >= prev, "label dropped at {score}");
            prev = label;
            score += 0.25;
        }
    }
}
