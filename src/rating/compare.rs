//! Comparisons between two ratings

use crate::rating::estimator::expected_score;
use crate::rating::scale::Rating;
use crate::utils::truncate_decimals;

/// z value for which P(-z <= x <= z) = 0.95 when x ~ N(0, 1)
pub const Z_SCORE_95: f64 = 1.96;

impl Rating {
    /// 95% confidence interval of strength, from the display values
    pub fn interval(&self) -> (f64, f64) {
        let shown = self.truncated();
        let width = shown.deviation() * 2.0;
        (shown.strength() - width, shown.strength() + width)
    }

    /// Whether the two strengths differ significantly at the 95% level
    pub fn is_different(&self, other: &Rating) -> bool {
        let (own, theirs) = (self.to_scale(), other.to_scale());
        let z = (own.mu - theirs.mu) / own.phi.hypot(theirs.phi);
        z.abs() > Z_SCORE_95
    }

    /// Significantly stronger than `other`
    pub fn is_stronger(&self, other: &Rating) -> bool {
        self.strength() > other.strength() && self.is_different(other)
    }

    /// Significantly weaker than `other`
    pub fn is_weaker(&self, other: &Rating) -> bool {
        self.strength() < other.strength() && self.is_different(other)
    }

    /// Probability of beating `other`, accounting for both deviations.
    ///
    /// Two 1500 and 1700 ratings with zero deviation give P(1700 wins) = 0.76.
    pub fn win_probability(&self, other: &Rating) -> f64 {
        let (own, theirs) = (self.to_scale(), other.to_scale());
        expected_score(own.mu, theirs.mu, own.phi.hypot(theirs.phi))
    }

    /// `win_probability` truncated to 4 decimals for display
    pub fn win_probability_display(&self, other: &Rating) -> f64 {
        truncate_decimals(self.win_probability(other), 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CompareCase {
        left: (f64, f64),
        right: (f64, f64),
        is_different: bool,
        is_weaker: bool,
        is_stronger: bool,
        win_probability: f64,
    }

    #[test]
    fn test_rating_compare() {
        let cases = [
            CompareCase {
                left: (1500.0, 350.0),
                right: (1600.0, 350.0),
                is_different: false,
                is_weaker: false,
                is_stronger: false,
                win_probability: 0.4233,
            },
            CompareCase {
                left: (1500.0, 50.0),
                right: (1600.0, 50.0),
                is_different: false,
                is_weaker: false,
                is_stronger: false,
                win_probability: 0.3631,
            },
            CompareCase {
                left: (1500.0, 50.0),
                right: (1700.0, 50.0),
                is_different: true,
                is_weaker: true,
                is_stronger: false,
                win_probability: 0.2453,
            },
            CompareCase {
                left: (1580.0, 42.0),
                right: (1420.0, 42.0),
                is_different: true,
                is_weaker: false,
                is_stronger: true,
                win_probability: 0.7119,
            },
        ];

        for (i, case) in cases.iter().enumerate() {
            let left = Rating::new(case.left.0, case.left.1, 0.06);
            let right = Rating::new(case.right.0, case.right.1, 0.06);

            assert_eq!(left.is_different(&right), case.is_different, "case {}", i + 1);
            assert_eq!(left.is_weaker(&right), case.is_weaker, "case {}", i + 1);
            assert_eq!(left.is_stronger(&right), case.is_stronger, "case {}", i + 1);
            assert_eq!(
                left.win_probability_display(&right),
                case.win_probability,
                "case {}",
                i + 1
            );
        }
    }

    #[test]
    fn test_win_probability_zero_deviation() {
        let weak = Rating::new(1500.0, 0.0, 0.06);
        let strong = Rating::new(1700.0, 0.0, 0.06);
        assert!((strong.win_probability(&weak) - 0.76).abs() < 0.01);
    }

    #[test]
    fn test_interval() {
        let rating = Rating::new(1500.0, 100.0, 0.06);
        assert_eq!(rating.interval(), (1300.0, 1700.0));
    }
}
