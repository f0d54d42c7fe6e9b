//! Peer-multiple valuation command.

use serde::Serialize;
use tracing::info;
use valuation_core::FinancialDataset;
use valuation_fundamentals::relative::{
    relative_valuation, CompanyMetrics, PeerMultiples, PeerStatistic, RelativeSummary,
    RelativeTargets,
};

use crate::config::OutputFormat;
use crate::output::{signed_pct, to_json, Table};
use crate::Result;

#[derive(Serialize)]
struct RelativeReport<'a> {
    company: &'a str,
    peers: &'a [PeerMultiples],
    targets: &'a RelativeTargets,
    summary: RelativeSummary,
}

/// Applies P/E, P/B and EV/EBITDA multiples from `peers` (or the fixed
/// multiples in `targets`) to the latest fiscal year.
///
/// # Errors
///
/// Returns `Valuation` for an empty history or a non-positive share count.
pub fn run(
    dataset: &FinancialDataset,
    peers: &[PeerMultiples],
    targets: &RelativeTargets,
    format: OutputFormat,
) -> Result<String> {
    let metrics = CompanyMetrics::from_dataset(dataset)?;
    let summary = relative_valuation(&metrics, peers, targets);
    info!(
        company = %dataset.company,
        peers = peers.len(),
        valued = summary.valuations.len(),
        skipped = summary.skipped.len(),
        "relative valuation complete"
    );

    let report = RelativeReport {
        company: &dataset.company,
        peers,
        targets,
        summary,
    };
    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => Ok(render(&report)),
    }
}

fn multiple(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

fn render(report: &RelativeReport<'_>) -> String {
    let statistic = match report.targets.statistic {
        PeerStatistic::Mean => "mean",
        PeerStatistic::Median => "median",
    };
    let mut peers = Table::new(["Company", "P/E", "P/B", "EV/EBITDA"]).title(format!(
        "{} - relative valuation (peer {})",
        report.company, statistic
    ));
    for p in report.peers {
        peers.row([p.name.clone(), multiple(p.pe), multiple(p.pb), multiple(p.ev_ebitda)]);
    }

    let s = &report.summary;
    let mut results = Table::new(["Method", "Multiple", "Target price", "Current", "Upside"]);
    for v in &s.valuations {
        results.row([
            v.multiple.to_string(),
            format!("{:.1}x", v.target_multiple),
            format!("{:.0}", v.target_price),
            v.current_multiple.map(|m| format!("{:.2}x", m)).unwrap_or_default(),
            v.upside.map(signed_pct).unwrap_or_default(),
        ]);
    }
    for skipped in &s.skipped {
        results.row([skipped.multiple.to_string(), "n/a".to_string(), "n/a".to_string()]);
    }

    let mut out = [peers.render(), results.render()].join("\n");
    for skipped in &s.skipped {
        out.push_str(&format!("Skipped {}: {}\n", skipped.multiple, skipped.reason));
    }
    match &s.fair_value {
        Some(range) => out.push_str(&format!(
            "Fair value {:.0} to {:.0}, average {:.0} across {} multiples\n",
            range.low, range.high, range.average, range.methods
        )),
        None => out.push_str("No multiple produced a price\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use valuation_core::fixtures::sample_dataset;
    use valuation_fundamentals::relative::Multiple;

    fn peers() -> Vec<PeerMultiples> {
        let peer = |name: &str, pe: f64, pb: f64, ev_ebitda: f64| PeerMultiples {
            name: name.to_string(),
            pe: Some(pe),
            pb: Some(pb),
            ev_ebitda: Some(ev_ebitda),
        };
        vec![
            peer("NTP", 10.0, 1.8, 6.5),
            peer("BMP average", 12.0, 2.5, 7.0),
            peer("Industry", 11.0, 2.0, 7.5),
        ]
    }

    fn summary(out: &str) -> RelativeSummary {
        let value: serde_json::Value = serde_json::from_str(out).unwrap();
        serde_json::from_value(value["summary"].clone()).unwrap()
    }

    #[test]
    fn test_table_output() {
        let out = run(
            &sample_dataset(),
            &peers(),
            &RelativeTargets::default(),
            OutputFormat::Table,
        )
        .unwrap();
        assert!(out.starts_with("Binh Minh Plastics - relative valuation (peer mean)"));
        assert!(out.contains("│ BMP average │ 12.0 │ 2.5 │       7.0 │"));
        assert!(out.contains("│ P/E       │    11.0x │       137060 │"));
        assert!(out.contains("144271"));
        assert!(out.contains("Fair value 107745 to 144271, average 129692 across 3 multiples"));
    }

    #[test]
    fn test_median_targets() {
        let targets = RelativeTargets {
            statistic: PeerStatistic::Median,
            ..Default::default()
        };
        let out = run(&sample_dataset(), &peers(), &targets, OutputFormat::Json).unwrap();
        let pb = summary(&out).get(Multiple::PriceBook).cloned().unwrap();
        assert_eq!(pb.target_multiple, 2.0);
        assert_relative_eq!(pb.target_price, 102_614.21939897386, max_relative = 1e-12);
    }

    #[test]
    fn test_fixed_multiple_without_peers() {
        let targets = RelativeTargets {
            pe: Some(8.0),
            ..Default::default()
        };
        let out = run(&sample_dataset(), &[], &targets, OutputFormat::Table).unwrap();
        assert!(out.contains("99680"));
        assert!(out.contains("Skipped P/B: No target P/B available"));
        assert!(out.contains("Skipped EV/EBITDA: No target EV/EBITDA available"));
        assert!(out.contains("across 1 multiples"));
    }

    #[test]
    fn test_no_usable_multiple() {
        let out = run(
            &sample_dataset(),
            &[],
            &RelativeTargets::default(),
            OutputFormat::Table,
        )
        .unwrap();
        assert!(out.contains("No multiple produced a price"));
    }
}
