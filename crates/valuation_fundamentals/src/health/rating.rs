//! Qualitative ratings and their fixed scores.

use std::fmt;

/// Qualitative rating of a single ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rating {
    /// At or beyond the excellent threshold
    Excellent,
    /// At or beyond the good threshold
    Good,
    /// At or beyond the acceptable threshold
    Acceptable,
    /// Short of the acceptable threshold
    Poor,
    /// No meaningful rating (no benchmark, or non-positive earnings for P/E)
    NotApplicable,
    /// P/E below the fair band
    Undervalued,
    /// P/E in the fair band
    FairValue,
    /// P/E in the growth band
    Growth,
    /// P/E above the growth band
    Expensive,
}

impl Rating {
    /// Fixed numeric score in `[25, 100]`.
    pub fn score(&self) -> u8 {
        match self {
            Rating::Excellent => 100,
            Rating::Good => 75,
            Rating::Acceptable => 50,
            Rating::Poor => 25,
            Rating::NotApplicable => 50,
            Rating::Undervalued => 90,
            Rating::FairValue => 75,
            Rating::Growth => 50,
            Rating::Expensive => 25,
        }
    }

    /// Display colour for the rating.
    pub fn color(&self) -> ColorTag {
        match self {
            Rating::Excellent | Rating::Undervalued => ColorTag::Green,
            Rating::Good | Rating::FairValue => ColorTag::Teal,
            Rating::Acceptable | Rating::Growth => ColorTag::Amber,
            Rating::Poor | Rating::Expensive => ColorTag::Red,
            Rating::NotApplicable => ColorTag::Grey,
        }
    }

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Acceptable => "Acceptable",
            Rating::Poor => "Poor",
            Rating::NotApplicable => "N/A",
            Rating::Undervalued => "Undervalued",
            Rating::FairValue => "Fair Value",
            Rating::Growth => "Growth",
            Rating::Expensive => "Expensive",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative colour attached to a rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorTag {
    /// Strong
    Green,
    /// Sound
    Teal,
    /// Watch
    Amber,
    /// Weak
    Red,
    /// Not rated
    Grey,
}

/// Result of interpreting one ratio value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interpretation {
    /// Qualitative rating
    pub rating: Rating,
    /// Display colour
    pub color: ColorTag,
    /// One-line explanation
    pub message: String,
}

impl Interpretation {
    pub(crate) fn new(rating: Rating, message: String) -> Self {
        Self {
            rating,
            color: rating.color(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_scores() {
        let expected = [
            (Rating::Excellent, 100),
            (Rating::Good, 75),
            (Rating::Acceptable, 50),
            (Rating::Poor, 25),
            (Rating::NotApplicable, 50),
            (Rating::Undervalued, 90),
            (Rating::FairValue, 75),
            (Rating::Growth, 50),
            (Rating::Expensive, 25),
        ];
        for (rating, score) in expected {
            assert_eq!(rating.score(), score, "{rating}");
        }
    }

    #[test]
    fn test_colors() {
        assert_eq!(Rating::Undervalued.color(), ColorTag::Green);
        assert_eq!(Rating::Expensive.color(), ColorTag::Red);
        assert_eq!(Rating::NotApplicable.color(), ColorTag::Grey);
    }
}
