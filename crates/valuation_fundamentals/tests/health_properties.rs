//! Property tests for ratio scoring and the DuPont identity.

use proptest::prelude::*;
use valuation_core::fixtures::sample_dataset;
use valuation_core::FiscalYear;
use valuation_fundamentals::health::{dupont, radar_scores, score_health, Category};
use valuation_fundamentals::ratios::{compute_all_years, RatioName, RatioSet};
use valuation_fundamentals::{interpret, Rating};

prop_compose! {
    fn arb_fiscal_year()(
        revenue in -100.0f64..10_000.0,
        cogs in 0.0f64..8_000.0,
        operating_income in -500.0f64..2_000.0,
        ebitda in -500.0f64..2_500.0,
        net_income in -500.0f64..1_500.0,
        eps in -5_000.0f64..20_000.0,
        total_assets in 0.0f64..10_000.0,
        total_liabilities in 0.0f64..8_000.0,
        current_assets in 0.0f64..5_000.0,
        current_liabilities in 0.0f64..3_000.0,
        inventory in 0.0f64..2_000.0,
        receivables in 0.0f64..1_000.0,
        cash in 0.0f64..2_000.0,
    ) -> FiscalYear {
        FiscalYear {
            year: 2025,
            revenue,
            cost_of_goods_sold: cogs,
            gross_profit: revenue - cogs,
            operating_income,
            ebitda,
            net_income,
            eps,
            total_assets,
            total_liabilities,
            equity: total_assets - total_liabilities,
            current_assets,
            current_liabilities,
            inventory,
            receivables,
            cash,
            ..FiscalYear::default()
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_total_is_rounded_weighted_sum(fy in arb_fiscal_year(), price in 0.0f64..200_000.0) {
        let ratios = RatioSet::from_fiscal_year(&fy, price, 80.0);
        let score = score_health(&ratios);

        let weighted: f64 = Category::ALL
            .iter()
            .map(|&c| score.categories.get(c) * c.weight())
            .sum();
        prop_assert!(score.total <= 100);
        prop_assert_eq!(score.total, weighted.round() as u8);
        for c in Category::ALL {
            let s = score.categories.get(c);
            prop_assert!((25.0..=100.0).contains(&s));
        }
    }

    #[test]
    fn prop_radar_matches_categories(fy in arb_fiscal_year()) {
        let ratios = RatioSet::from_fiscal_year(&fy, 50_000.0, 80.0);
        let radar = radar_scores(&ratios);
        let categories = score_health(&ratios).categories.as_array();
        for (r, c) in radar.iter().zip(categories) {
            prop_assert_eq!(*r, c.round() as u8);
        }
    }

    #[test]
    fn prop_dupont_identity(fy in arb_fiscal_year()) {
        let ratios = RatioSet::from_fiscal_year(&fy, 50_000.0, 80.0);
        let d = dupont(&ratios);
        let product = d.net_margin * d.asset_turnover * d.equity_multiplier;
        prop_assert!((product - d.implied_roe).abs() < 1e-9);
    }

    #[test]
    fn prop_ratios_are_finite(fy in arb_fiscal_year()) {
        let ratios = RatioSet::from_fiscal_year(&fy, 50_000.0, 80.0);
        for name in RatioName::ALL {
            prop_assert!(ratios.value(name).is_finite(), "{}", name);
        }
    }

    #[test]
    fn prop_non_positive_pe_is_not_applicable(pe in -1_000.0f64..=0.0) {
        prop_assert_eq!(interpret(RatioName::PeRatio, pe).rating, Rating::NotApplicable);
    }
}

#[test]
fn test_sample_history_scores() {
    let totals: Vec<u8> = compute_all_years(&sample_dataset())
        .iter()
        .map(|r| score_health(r).total)
        .collect();
    assert_eq!(totals, vec![66, 79, 89, 90, 92]);
}
