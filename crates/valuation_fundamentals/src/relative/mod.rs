//! Comparable-multiple valuation against a peer set.
//!
//! Three multiples are applied to the latest fiscal year:
//!
//! | Multiple  | Base                 | Target price                              |
//! |-----------|----------------------|-------------------------------------------|
//! | P/E       | EPS                  | `eps × multiple`                          |
//! | P/B       | book value per share | `bvps × multiple`                         |
//! | EV/EBITDA | EBITDA               | `(ebitda × multiple − net debt) / shares` |
//!
//! Target prices are quoted in the market price unit. The target multiple is
//! either fixed by the caller or taken from the peer mean or median, where
//! peers with a missing, zero or non-finite value are left out.

mod error;

use std::fmt;

use valuation_core::types::PRICE_UNIT_SCALE;
use valuation_core::{FairValueRange, FinancialDataset, ValuationError};

pub use error::RelativeError;

/// Valuation multiple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Multiple {
    /// Price / earnings per share
    PriceEarnings,
    /// Price / book value per share
    PriceBook,
    /// Enterprise value / EBITDA
    EvEbitda,
}

impl Multiple {
    /// Every multiple, in reporting order.
    pub const ALL: [Multiple; 3] = [Self::PriceEarnings, Self::PriceBook, Self::EvEbitda];

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::PriceEarnings => "P/E",
            Self::PriceBook => "P/B",
            Self::EvEbitda => "EV/EBITDA",
        }
    }
}

impl fmt::Display for Multiple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Multiples quoted for one comparable company.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerMultiples {
    /// Peer name
    pub name: String,
    /// P/E, if quoted
    #[cfg_attr(feature = "serde", serde(default))]
    pub pe: Option<f64>,
    /// P/B, if quoted
    #[cfg_attr(feature = "serde", serde(default))]
    pub pb: Option<f64>,
    /// EV/EBITDA, if quoted
    #[cfg_attr(feature = "serde", serde(default))]
    pub ev_ebitda: Option<f64>,
}

impl PeerMultiples {
    /// Quoted value of `multiple`.
    #[inline]
    pub fn get(&self, multiple: Multiple) -> Option<f64> {
        match multiple {
            Multiple::PriceEarnings => self.pe,
            Multiple::PriceBook => self.pb,
            Multiple::EvEbitda => self.ev_ebitda,
        }
    }
}

fn usable_values(peers: &[PeerMultiples], multiple: Multiple) -> Vec<f64> {
    peers
        .iter()
        .filter_map(|p| p.get(multiple))
        .filter(|v| v.is_finite() && *v != 0.0)
        .collect()
}

/// Mean of the usable peer values of `multiple`.
///
/// # Examples
/// ```
/// use valuation_fundamentals::relative::{peer_mean, Multiple, PeerMultiples};
///
/// let peers = vec![
///     PeerMultiples { name: "A".into(), pe: Some(12.0), ..Default::default() },
///     PeerMultiples { name: "B".into(), pe: Some(0.0), ..Default::default() },
///     PeerMultiples { name: "C".into(), pe: Some(18.0), ..Default::default() },
/// ];
/// assert_eq!(peer_mean(&peers, Multiple::PriceEarnings), Some(15.0));
/// assert_eq!(peer_mean(&peers, Multiple::PriceBook), None);
/// ```
pub fn peer_mean(peers: &[PeerMultiples], multiple: Multiple) -> Option<f64> {
    let values = usable_values(peers, multiple);
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of the usable peer values of `multiple`; the mean of the two
/// middle values for an even count.
pub fn peer_median(peers: &[PeerMultiples], multiple: Multiple) -> Option<f64> {
    let mut values = usable_values(peers, multiple);
    values.sort_by(f64::total_cmp);
    let n = values.len();
    match n {
        0 => None,
        _ if n % 2 == 0 => Some((values[n / 2 - 1] + values[n / 2]) / 2.0),
        _ => Some(values[n / 2]),
    }
}

/// Peer statistic used when no fixed multiple is given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PeerStatistic {
    /// Arithmetic mean
    #[default]
    Mean,
    /// Median
    Median,
}

/// Source of the multiple applied to the company.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetMultiple {
    /// Peer mean or median
    Peer(PeerStatistic),
    /// Caller-supplied multiple
    Fixed(f64),
}

/// Per-multiple target selection for [`relative_valuation`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelativeTargets {
    /// Statistic for multiples without a fixed value
    pub statistic: PeerStatistic,
    /// Fixed P/E
    pub pe: Option<f64>,
    /// Fixed P/B
    pub pb: Option<f64>,
    /// Fixed EV/EBITDA
    pub ev_ebitda: Option<f64>,
}

impl RelativeTargets {
    /// Target for `multiple`: the fixed value if set, else the peer statistic.
    pub fn target(&self, multiple: Multiple) -> TargetMultiple {
        let fixed = match multiple {
            Multiple::PriceEarnings => self.pe,
            Multiple::PriceBook => self.pb,
            Multiple::EvEbitda => self.ev_ebitda,
        };
        fixed.map_or(TargetMultiple::Peer(self.statistic), TargetMultiple::Fixed)
    }
}

/// Company figures the multiples are applied to.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanyMetrics {
    /// Fiscal year the figures come from
    pub year: i32,
    /// Earnings per share, market price unit
    pub eps: f64,
    /// Book value per share, market price unit
    pub bvps: f64,
    /// EBITDA, statement units
    pub ebitda: f64,
    /// Debt less cash, statement units
    pub net_debt: f64,
    /// Shares outstanding
    pub shares: f64,
    /// Market price, when positive and finite
    pub current_price: Option<f64>,
}

impl CompanyMetrics {
    /// Figures from the latest fiscal year of `dataset`.
    ///
    /// # Errors
    ///
    /// `EmptyHistory` without fiscal years, `InvalidSharesOutstanding` for a
    /// non-positive share count.
    pub fn from_dataset(dataset: &FinancialDataset) -> Result<Self, ValuationError> {
        let latest = dataset.latest().ok_or(ValuationError::EmptyHistory)?;
        let price = dataset.market_price;
        Ok(Self {
            year: latest.year,
            eps: latest.eps,
            bvps: dataset.per_share(latest.equity)?,
            ebitda: latest.ebitda,
            net_debt: dataset.debt - dataset.cash_equivalents,
            shares: dataset.checked_shares()?,
            current_price: (price.is_finite() && price > 0.0).then_some(price),
        })
    }

    /// Base figure `multiple` is applied to.
    #[inline]
    pub fn base(&self, multiple: Multiple) -> f64 {
        match multiple {
            Multiple::PriceEarnings => self.eps,
            Multiple::PriceBook => self.bvps,
            Multiple::EvEbitda => self.ebitda,
        }
    }

    /// Multiple implied by the current market price.
    pub fn current_multiple(&self, multiple: Multiple) -> Option<f64> {
        let price = self.current_price?;
        let base = self.base(multiple);
        if base <= 0.0 {
            return None;
        }
        Some(match multiple {
            Multiple::PriceEarnings | Multiple::PriceBook => price / base,
            Multiple::EvEbitda => {
                (price * self.shares / PRICE_UNIT_SCALE + self.net_debt) / base
            }
        })
    }
}

/// Target price from one multiple.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultipleValuation {
    /// Multiple applied
    pub multiple: Multiple,
    /// EPS, book value per share or EBITDA
    pub base: f64,
    /// Multiple actually applied
    pub target_multiple: f64,
    /// Implied price per share
    pub target_price: f64,
    /// Peer mean, if any peer quotes the multiple
    pub peer_mean: Option<f64>,
    /// Peer median, if any peer quotes the multiple
    pub peer_median: Option<f64>,
    /// Multiple implied by the market price
    pub current_multiple: Option<f64>,
    /// `target / price − 1`, when a market price is known
    pub upside: Option<f64>,
    /// Implied enterprise value (EV/EBITDA only)
    pub enterprise_value: Option<f64>,
    /// Implied equity value (EV/EBITDA only)
    pub equity_value: Option<f64>,
}

/// Applies one multiple to the company.
///
/// # Errors
///
/// `NonPositiveBase` when the base is not positive, `InvalidMultiple` for a
/// fixed multiple that is not positive and finite, `NoTargetMultiple` when
/// no peer quotes the multiple.
pub fn value_by_multiple(
    metrics: &CompanyMetrics,
    peers: &[PeerMultiples],
    multiple: Multiple,
    target: TargetMultiple,
) -> Result<MultipleValuation, RelativeError> {
    let base = metrics.base(multiple);
    if !(base.is_finite() && base > 0.0) {
        return Err(RelativeError::NonPositiveBase { multiple, value: base });
    }

    let peer_mean = peer_mean(peers, multiple);
    let peer_median = peer_median(peers, multiple);
    let target_multiple = match target {
        TargetMultiple::Fixed(value) if value.is_finite() && value > 0.0 => Some(value),
        TargetMultiple::Fixed(value) => {
            return Err(RelativeError::InvalidMultiple { multiple, value })
        }
        TargetMultiple::Peer(PeerStatistic::Mean) => peer_mean,
        TargetMultiple::Peer(PeerStatistic::Median) => peer_median,
    }
    .ok_or(RelativeError::NoTargetMultiple(multiple))?;

    let (target_price, enterprise_value, equity_value) = match multiple {
        Multiple::PriceEarnings | Multiple::PriceBook => (base * target_multiple, None, None),
        Multiple::EvEbitda => {
            let ev = base * target_multiple;
            let equity = ev - metrics.net_debt;
            (equity / metrics.shares * PRICE_UNIT_SCALE, Some(ev), Some(equity))
        }
    };

    Ok(MultipleValuation {
        multiple,
        base,
        target_multiple,
        target_price,
        peer_mean,
        peer_median,
        current_multiple: metrics.current_multiple(multiple),
        upside: metrics.current_price.map(|p| target_price / p - 1.0),
        enterprise_value,
        equity_value,
    })
}

/// Multiple that produced no target price.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedMultiple {
    /// Multiple skipped
    pub multiple: Multiple,
    /// Error message
    pub reason: String,
}

/// All three multiples with the resulting fair-value range.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelativeSummary {
    /// Company figures used
    pub metrics: CompanyMetrics,
    /// Successful valuations, in [`Multiple::ALL`] order
    pub valuations: Vec<MultipleValuation>,
    /// Multiples without a target price
    pub skipped: Vec<SkippedMultiple>,
    /// Range over the positive target prices
    pub fair_value: Option<FairValueRange>,
}

impl RelativeSummary {
    /// Valuation for `multiple`, if it succeeded.
    pub fn get(&self, multiple: Multiple) -> Option<&MultipleValuation> {
        self.valuations.iter().find(|v| v.multiple == multiple)
    }
}

/// Runs every multiple; failures are recorded in `skipped`.
pub fn relative_valuation(
    metrics: &CompanyMetrics,
    peers: &[PeerMultiples],
    targets: &RelativeTargets,
) -> RelativeSummary {
    let mut valuations = Vec::with_capacity(Multiple::ALL.len());
    let mut skipped = Vec::new();
    for multiple in Multiple::ALL {
        match value_by_multiple(metrics, peers, multiple, targets.target(multiple)) {
            Ok(valuation) => valuations.push(valuation),
            Err(err) => skipped.push(SkippedMultiple {
                multiple,
                reason: err.to_string(),
            }),
        }
    }
    let fair_value = FairValueRange::from_prices(valuations.iter().map(|v| v.target_price));
    RelativeSummary {
        metrics: *metrics,
        valuations,
        skipped,
        fair_value,
    }
}
