//! Fair-value range across several valuation methods.

/// Low, mean and high of the usable target prices from several methods.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FairValueRange {
    /// Smallest target price
    pub low: f64,
    /// Arithmetic mean of the target prices
    pub average: f64,
    /// Largest target price
    pub high: f64,
    /// Number of prices in the range
    pub methods: usize,
}

impl FairValueRange {
    /// Builds the range from candidate prices, ignoring any that are not
    /// strictly positive and finite. Returns `None` when none remain.
    ///
    /// # Examples
    /// ```
    /// use valuation_core::types::FairValueRange;
    ///
    /// let range = FairValueRange::from_prices([120.0, -5.0, 80.0, 100.0]).unwrap();
    /// assert_eq!((range.low, range.average, range.high), (80.0, 100.0, 120.0));
    /// assert_eq!(range.methods, 3);
    /// assert!(FairValueRange::from_prices([0.0, f64::NAN]).is_none());
    /// ```
    pub fn from_prices<I: IntoIterator<Item = f64>>(prices: I) -> Option<Self> {
        let usable: Vec<f64> = prices
            .into_iter()
            .filter(|p| p.is_finite() && *p > 0.0)
            .collect();
        let low = usable.iter().copied().reduce(f64::min)?;
        let high = usable.iter().copied().reduce(f64::max)?;
        Some(Self {
            low,
            average: usable.iter().sum::<f64>() / usable.len() as f64,
            high,
            methods: usable.len(),
        })
    }

    /// Whether `price` lies within `[low, high]`.
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}
