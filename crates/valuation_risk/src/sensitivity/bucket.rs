//! Classification of percentage price changes.

use std::fmt;

/// Change above which a cell is `StrongUp`.
pub const STRONG_UP_THRESHOLD: f64 = 0.08;
/// Change above which a cell is `Up`.
pub const UP_THRESHOLD: f64 = 0.03;
/// Change below which a cell is `Down`.
pub const DOWN_THRESHOLD: f64 = -0.03;
/// Change below which a cell is `StrongDown`.
pub const STRONG_DOWN_THRESHOLD: f64 = -0.08;

/// Direction and strength of a price change relative to the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DeltaBucket {
    /// More than 8% below the anchor
    StrongDown,
    /// Between 3% and 8% below the anchor
    Down,
    /// Within ±3% of the anchor (boundaries included)
    Neutral,
    /// Between 3% and 8% above the anchor
    Up,
    /// More than 8% above the anchor
    StrongUp,
}

impl DeltaBucket {
    /// Buckets a fractional change; thresholds are strict.
    ///
    /// # Examples
    ///
    /// ```
    /// use valuation_risk::DeltaBucket;
    ///
    /// assert_eq!(DeltaBucket::classify(0.09), DeltaBucket::StrongUp);
    /// assert_eq!(DeltaBucket::classify(0.08), DeltaBucket::Up);
    /// assert_eq!(DeltaBucket::classify(0.03), DeltaBucket::Neutral);
    /// assert_eq!(DeltaBucket::classify(-0.05), DeltaBucket::Down);
    /// ```
    pub fn classify(delta: f64) -> Self {
        if delta > STRONG_UP_THRESHOLD {
            DeltaBucket::StrongUp
        } else if delta > UP_THRESHOLD {
            DeltaBucket::Up
        } else if delta < STRONG_DOWN_THRESHOLD {
            DeltaBucket::StrongDown
        } else if delta < DOWN_THRESHOLD {
            DeltaBucket::Down
        } else {
            DeltaBucket::Neutral
        }
    }

    /// Kebab-case label, matching the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeltaBucket::StrongDown => "strong-down",
            DeltaBucket::Down => "down",
            DeltaBucket::Neutral => "neutral",
            DeltaBucket::Up => "up",
            DeltaBucket::StrongUp => "strong-up",
        }
    }
}

impl fmt::Display for DeltaBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_strict() {
        assert_eq!(DeltaBucket::classify(0.0800001), DeltaBucket::StrongUp);
        assert_eq!(DeltaBucket::classify(0.08), DeltaBucket::Up);
        assert_eq!(DeltaBucket::classify(0.0300001), DeltaBucket::Up);
        assert_eq!(DeltaBucket::classify(0.03), DeltaBucket::Neutral);
        assert_eq!(DeltaBucket::classify(0.0), DeltaBucket::Neutral);
        assert_eq!(DeltaBucket::classify(-0.03), DeltaBucket::Neutral);
        assert_eq!(DeltaBucket::classify(-0.0300001), DeltaBucket::Down);
        assert_eq!(DeltaBucket::classify(-0.08), DeltaBucket::Down);
        assert_eq!(DeltaBucket::classify(-0.0800001), DeltaBucket::StrongDown);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(DeltaBucket::StrongUp.to_string(), "strong-up");
        assert_eq!(DeltaBucket::StrongDown.to_string(), "strong-down");
        assert_eq!(DeltaBucket::Neutral.as_str(), "neutral");
    }
}
