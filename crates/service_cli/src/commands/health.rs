//! Ratio analysis and health score command.

use serde::Serialize;
use valuation_core::FinancialDataset;
use valuation_fundamentals::{
    compute_all_years, compute_year, dupont, interpret, radar_scores, score_health, Category,
    DuPont, HealthScore, Interpretation, RatioName, RatioSet,
};

use crate::config::OutputFormat;
use crate::output::{pct, to_json, Table};
use crate::{CliError, Result};

/// One interpreted ratio.
#[derive(Clone, Debug, Serialize)]
pub struct RatioLine {
    /// Ratio identifier
    pub name: RatioName,
    /// Raw value
    pub value: f64,
    /// Formatted value
    pub display: String,
    /// Rating, colour and message
    pub interpretation: Interpretation,
}

/// Rounded score of one category.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RadarPoint {
    /// Category
    pub category: Category,
    /// Rounded category score
    pub score: u8,
}

/// Total health score of one fiscal year.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct YearTotal {
    /// Fiscal year
    pub year: i32,
    /// Weighted total
    pub total: u8,
}

/// Full analysis of one fiscal year.
#[derive(Clone, Debug, Serialize)]
pub struct HealthReport {
    /// Company display name
    pub company: String,
    /// Every ratio of the selected year
    pub ratios: RatioSet,
    /// Interpreted ratios in group order
    pub interpretations: Vec<RatioLine>,
    /// Weighted score
    pub score: HealthScore,
    /// Category scores for a radar chart
    pub radar: Vec<RadarPoint>,
    /// ROE decomposition
    pub dupont: DuPont,
    /// Total score of every year in the history
    pub trend: Vec<YearTotal>,
}

impl HealthReport {
    /// Builds the report for the fiscal year labelled `year`, or the most
    /// recent year when `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when no fiscal year carries the label and
    /// `Valuation` for an empty history.
    pub fn build(dataset: &FinancialDataset, year: Option<i32>) -> Result<Self> {
        let index = match year {
            Some(label) => dataset
                .years
                .iter()
                .position(|fy| fy.year == label)
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!(
                        "fiscal year {} not in dataset for {}",
                        label, dataset.company
                    ))
                })?,
            None => dataset.len().saturating_sub(1),
        };
        let ratios = compute_year(dataset, index)?;

        let interpretations = RatioName::ALL
            .into_iter()
            .map(|name| {
                let value = ratios.value(name);
                RatioLine {
                    name,
                    value,
                    display: name.format_value(value),
                    interpretation: interpret(name, value),
                }
            })
            .collect();

        let radar = Category::ALL
            .into_iter()
            .zip(radar_scores(&ratios))
            .map(|(category, score)| RadarPoint { category, score })
            .collect();

        let trend = compute_all_years(dataset)
            .iter()
            .map(|r| YearTotal {
                year: r.year,
                total: score_health(r).total,
            })
            .collect();

        Ok(Self {
            company: dataset.company.clone(),
            score: score_health(&ratios),
            dupont: dupont(&ratios),
            ratios,
            interpretations,
            radar,
            trend,
        })
    }
}

/// Analyses one fiscal year and renders the report.
///
/// # Errors
///
/// See [`HealthReport::build`].
pub fn run(dataset: &FinancialDataset, year: Option<i32>, format: OutputFormat) -> Result<String> {
    let report = HealthReport::build(dataset, year)?;
    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => Ok(render(&report)),
    }
}

fn render(report: &HealthReport) -> String {
    let mut ratios = Table::new(["Ratio", "Value", "Rating", "Comment"]).title(format!(
        "{} - financial health {}",
        report.company, report.score.year
    ));
    for line in &report.interpretations {
        ratios.row([
            line.name.label().to_string(),
            line.display.clone(),
            line.interpretation.rating.to_string(),
            line.interpretation.message.clone(),
        ]);
    }

    let mut categories = Table::new(["Category", "Weight", "Score"]);
    for point in &report.radar {
        categories.row([
            point.category.to_string(),
            pct(point.category.weight(), 0),
            point.score.to_string(),
        ]);
    }
    categories.row([
        "total".to_string(),
        "100%".to_string(),
        report.score.total.to_string(),
    ]);

    let d = &report.dupont;
    let mut decomposition = Table::new(["DuPont", "Value"]);
    decomposition
        .row(["Net margin".to_string(), pct(d.net_margin, 1)])
        .row(["Asset turnover".to_string(), format!("{:.2}x", d.asset_turnover)])
        .row(["Equity multiplier".to_string(), format!("{:.2}x", d.equity_multiplier)])
        .row(["Implied ROE".to_string(), pct(d.implied_roe, 1)])
        .row(["Reported ROE".to_string(), pct(d.actual_roe, 1)]);

    let mut trend = Table::new(["Year", "Score"]);
    for point in &report.trend {
        trend.row([point.year.to_string(), point.total.to_string()]);
    }

    [
        ratios.render(),
        categories.render(),
        decomposition.render(),
        trend.render(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation_core::fixtures::sample_dataset;

    #[test]
    fn test_latest_year_by_default() {
        let report = HealthReport::build(&sample_dataset(), None).unwrap();
        assert_eq!(report.score.year, 2025);
        assert_eq!(report.score.total, 92);
        let radar: Vec<u8> = report.radar.iter().map(|p| p.score).collect();
        assert_eq!(radar, vec![95, 100, 100, 75, 75]);
        assert_eq!(report.interpretations.len(), RatioName::ALL.len());
    }

    #[test]
    fn test_explicit_year() {
        let report = HealthReport::build(&sample_dataset(), Some(2021)).unwrap();
        assert_eq!(report.score.total, 66);
        let trend: Vec<u8> = report.trend.iter().map(|t| t.total).collect();
        assert_eq!(trend, vec![66, 79, 89, 90, 92]);
    }

    #[test]
    fn test_unknown_year() {
        let err = HealthReport::build(&sample_dataset(), Some(1999)).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_table_output() {
        let out = run(&sample_dataset(), None, OutputFormat::Table).unwrap();
        assert!(out.starts_with("Binh Minh Plastics - financial health 2025"));
        assert!(out.contains("Return on equity"));
        assert!(out.contains("│ total         │   100% │    92 │"));
    }

    #[test]
    fn test_json_output() {
        let out = run(&sample_dataset(), Some(2023), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["score"]["year"], 2023);
        assert_eq!(value["radar"][0]["category"], "profitability");
        assert_eq!(value["interpretations"][0]["name"], "roe");
    }
}
