//! Dataset and override loading.

use std::path::Path;

use tracing::{debug, info};
use valuation_core::{AssumptionOverrides, FinancialDataset};
use valuation_fundamentals::relative::PeerMultiples;

use crate::{CliError, Result};

/// Reads and validates a dataset from a JSON file.
///
/// # Errors
///
/// - `Io` when the file cannot be read
/// - `Json` when it is not a dataset document
/// - `Valuation` when the dataset fails validation
pub fn load_dataset(path: &Path) -> Result<FinancialDataset> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_dataset(&content)?;
    info!(
        path = %path.display(),
        company = %dataset.company,
        years = dataset.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parses and validates a dataset from JSON text.
///
/// # Errors
///
/// See [`load_dataset`].
pub fn parse_dataset(json: &str) -> Result<FinancialDataset> {
    let dataset: FinancialDataset = serde_json::from_str(json)?;
    dataset.validate()?;
    Ok(dataset)
}

/// Reads a peer multiples file: a JSON array of `{name, pe, pb, ev_ebitda}`
/// objects in which any multiple may be omitted.
///
/// # Errors
///
/// `Io` when the file cannot be read, `Json` when it is not a peer list.
pub fn load_peers(path: &Path) -> Result<Vec<PeerMultiples>> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let peers = parse_peers(&content)?;
    info!(path = %path.display(), peers = peers.len(), "peer multiples loaded");
    Ok(peers)
}

/// Parses a peer list from JSON text.
///
/// # Errors
///
/// Returns `Json` for malformed input.
pub fn parse_peers(json: &str) -> Result<Vec<PeerMultiples>> {
    Ok(serde_json::from_str(json)?)
}

/// Folds `key=value` assignments into an override set. Later assignments
/// to the same key win.
///
/// # Errors
///
/// Returns `Valuation` for malformed assignments or unknown keys.
pub fn parse_overrides(assignments: &[String]) -> Result<AssumptionOverrides> {
    let mut overrides = AssumptionOverrides::new();
    for assignment in assignments {
        overrides.apply_assignment(assignment)?;
    }
    if !overrides.is_empty() {
        debug!(count = overrides.len(), "assumption overrides parsed");
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation_core::{AssumptionField, ValuationError};

    const MINIMAL: &str = r#"{
        "company": "Minimal",
        "years": [{"year": 2024, "revenue": 100.0}],
        "shares_outstanding": 10.0,
        "cash_equivalents": 5.0,
        "debt": 0.0,
        "market_price": 1000.0,
        "assumptions": {
            "rev_growth": 0.05,
            "ebitda_margin": 0.2,
            "tax_rate": 0.2,
            "wacc": 0.1,
            "terminal_growth": 0.02,
            "capex_pct": 0.03,
            "nwc_pct": 0.05
        }
    }"#;

    #[test]
    fn test_parse_minimal_dataset() {
        let dataset = parse_dataset(MINIMAL).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.years[0].revenue, 100.0);
        // Missing line items default to zero
        assert_eq!(dataset.years[0].inventory, 0.0);
    }

    #[test]
    fn test_parse_rejects_empty_history() {
        let json = MINIMAL.replace(r#"[{"year": 2024, "revenue": 100.0}]"#, "[]");
        assert!(matches!(
            parse_dataset(&json),
            Err(CliError::Valuation(ValuationError::EmptyHistory))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(parse_dataset("{"), Err(CliError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_parse_peers_with_missing_multiples() {
        let peers = parse_peers(
            r#"[
                {"name": "Listed", "pe": 11.0, "pb": 2.0, "ev_ebitda": 7.5},
                {"name": "Loss-making", "pb": 1.2}
            ]"#,
        )
        .unwrap();
        assert_eq!(peers.len(), 2);
        assert_eq!(peers[0].ev_ebitda, Some(7.5));
        assert_eq!(peers[1].pe, None);
        assert_eq!(peers[1].pb, Some(1.2));
    }

    #[test]
    fn test_parse_peers_rejects_object() {
        assert!(matches!(parse_peers(r#"{"name": "x"}"#), Err(CliError::Json(_))));
    }

    #[test]
    fn test_parse_overrides() {
        let overrides = parse_overrides(&[
            "wacc=0.09".to_string(),
            "terminal_growth=0.025".to_string(),
            "wacc=0.12".to_string(),
        ])
        .unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get(AssumptionField::Wacc), Some(0.12));
        assert_eq!(overrides.get(AssumptionField::TerminalGrowth), Some(0.025));
    }

    #[test]
    fn test_parse_overrides_rejects_unknown_key() {
        let err = parse_overrides(&["discount=0.1".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            CliError::Valuation(ValuationError::UnknownAssumption(_))
        ));
    }
}
