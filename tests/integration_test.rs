//! End-to-end selection tests over a mock data port, plus property tests
//! of the selector.

mod common;

use allocassist::domain::asset_class::AssetClasses;
use allocassist::domain::error::AdvisorError;
use allocassist::domain::profile::{Horizon, UserProfile};
use allocassist::domain::risk::RiskProfile;
use allocassist::domain::selection::{
    LONG_GROWTH_SHARE_PCT, Recommendation, SHORT_SAFE_SHARE_PCT, SelectionBasis, recommend,
    select, tranche_quota,
};
use allocassist::domain::sizing::target_size;
use allocassist::domain::stats::{StatsTable, build_stats_table};
use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;

fn window() -> (chrono::NaiveDate, chrono::NaiveDate) {
    (date("2023-01-01"), date("2024-12-31"))
}

fn mock_universe() -> MockDataPort {
    MockDataPort::new()
        .with_prices("BND", zigzag("2024-01-01", 60, 70.0, 0.001, 0.0005))
        .with_prices("VOO", zigzag("2024-01-01", 60, 400.0, 0.01, 0.0005))
        .with_prices("TSLA", zigzag("2024-01-01", 60, 200.0, 0.02, 0.0005))
        .with_prices("SHORT", make_series("2024-01-01", &[10.0, 11.0]))
        .with_error("GONE", "file not found")
        .with_name("BND", "Vanguard Total Bond Market ETF")
}

fn universe_symbols() -> Vec<String> {
    ["BND", "VOO", "TSLA", "SHORT", "GONE", "MISSING"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn stats_table_skips_failed_and_short_symbols() {
    let (start, end) = window();
    let table = build_stats_table(&mock_universe(), &universe_symbols(), start, end).unwrap();

    let symbols: Vec<&str> = table.records().iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["BND", "VOO", "TSLA"]);

    let [bnd, voo, tsla] = table.records() else {
        panic!("expected three records");
    };
    assert!(bnd.annual_volatility < 0.2);
    assert!(voo.annual_volatility >= 0.2 && voo.annual_volatility < 0.4);
    assert!(tsla.annual_volatility >= 0.4);
    assert!(table.records().iter().all(|s| s.annual_return > 0.0));
}

#[test]
fn stats_table_respects_date_window() {
    let port = MockDataPort::new().with_prices("BND", zigzag("2024-01-01", 60, 70.0, 0.001, 0.0005));
    let table = build_stats_table(
        &port,
        &["BND".to_string()],
        date("2025-01-01"),
        date("2025-12-31"),
    )
    .unwrap();
    assert!(table.is_empty());
}

#[test]
fn pipeline_picks_by_risk_band() {
    let (start, end) = window();
    let table = build_stats_table(&mock_universe(), &universe_symbols(), start, end).unwrap();
    let classes = AssetClasses::defaults();

    let cases = [
        (RiskProfile::Conservative, "BND"),
        (RiskProfile::Balanced, "VOO"),
        (RiskProfile::Aggressive, "TSLA"),
    ];
    for (risk, expected) in cases {
        let profile = UserProfile::new(5_000.0, risk, Horizon::Medium, 1.0);
        match recommend(&table, &classes, &profile).unwrap() {
            Recommendation::Portfolio { selection, summary } => {
                assert_eq!(selection.basis, SelectionBasis::Eligible);
                assert_eq!(selection.symbols(), vec![expected]);
                let only = &selection.instruments[0];
                assert_relative_eq!(summary.average_volatility, only.annual_volatility);
                assert_relative_eq!(summary.average_return, only.annual_return);
            }
            Recommendation::Unavailable => panic!("expected a portfolio for {risk}"),
        }
    }
}

#[test]
fn unreachable_return_falls_back_to_whole_table() {
    let (start, end) = window();
    let table = build_stats_table(&mock_universe(), &universe_symbols(), start, end).unwrap();
    let profile = UserProfile::new(5_000.0, RiskProfile::Conservative, Horizon::Short, 10_000.0);

    let selection = select(&table, &AssetClasses::defaults(), &profile);
    assert_eq!(selection.basis, SelectionBasis::ClosestReturn);
    assert_eq!(selection.len(), 3);
    let distances: Vec<f64> = selection
        .instruments
        .iter()
        .map(|s| (s.annual_return - 100.0).abs())
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn unknown_risk_label_yields_fallback() {
    let table = table(vec![stats("A", 0.1, 0.05), stats("B", 0.3, 0.08)]);
    let profile = UserProfile::new(5_000.0, RiskProfile::from_label("yolo"), Horizon::Medium, 4.0);

    let selection = select(&table, &AssetClasses::defaults(), &profile);
    assert_eq!(selection.basis, SelectionBasis::ClosestReturn);
    assert_eq!(selection.symbols(), vec!["A", "B"]);
}

#[test]
fn abc_scenario_is_not_padded_for_any_horizon() {
    let table = table(vec![
        stats("A", 0.1, 0.05),
        stats("B", 0.3, 0.08),
        stats("C", 0.5, 0.12),
    ]);
    let classes = AssetClasses::new(["A"], ["C"]);
    for horizon in Horizon::ALL {
        let profile = UserProfile::new(5_000.0, RiskProfile::Conservative, horizon, 4.0);
        let selection = select(&table, &classes, &profile);
        assert_eq!(selection.target_size, 3);
        assert_eq!(selection.symbols(), vec!["A"], "horizon {horizon}");
    }
}

#[test]
fn fallback_ties_follow_table_order() {
    let profile = UserProfile::new(5_000.0, RiskProfile::Balanced, Horizon::Long, 50.0);
    let classes = AssetClasses::defaults();

    let forward = table(vec![
        stats("LOW", 0.9, 0.25),
        stats("HIGH", 0.9, 0.75),
        stats("EXACT", 0.9, 0.5),
        stats("FAR", 0.9, -0.5),
    ]);
    let selection = select(&forward, &classes, &profile);
    assert_eq!(selection.basis, SelectionBasis::ClosestReturn);
    assert_eq!(selection.symbols(), vec!["EXACT", "LOW", "HIGH"]);

    let reversed = table(vec![
        stats("HIGH", 0.9, 0.75),
        stats("LOW", 0.9, 0.25),
        stats("EXACT", 0.9, 0.5),
        stats("FAR", 0.9, -0.5),
    ]);
    let selection = select(&reversed, &classes, &profile);
    assert_eq!(selection.symbols(), vec!["EXACT", "HIGH", "LOW"]);
}

#[test]
fn empty_table_gives_no_recommendation() {
    let (start, end) = window();
    let table = build_stats_table(&MockDataPort::new(), &universe_symbols(), start, end).unwrap();
    assert!(table.is_empty());

    let profile = UserProfile::new(600_000.0, RiskProfile::Balanced, Horizon::Long, 5.0);
    assert_eq!(
        recommend(&table, &AssetClasses::defaults(), &profile).unwrap(),
        Recommendation::Unavailable
    );
}

#[test]
fn duplicate_symbols_are_rejected() {
    let err = StatsTable::new(vec![stats("A", 0.1, 0.05), stats("A", 0.2, 0.06)]).unwrap_err();
    assert!(matches!(err, AdvisorError::MalformedTable { .. }));
}

#[test]
fn short_horizon_with_large_safe_pool() {
    let records: Vec<_> = (0..12)
        .map(|i| stats(&format!("G{i}"), 0.1, 0.05))
        .chain((0..12).map(|i| stats(&format!("S{i}"), 0.1, 0.05)))
        .collect();
    let safe: Vec<String> = (0..12).map(|i| format!("S{i}")).collect();
    let classes = AssetClasses::new(safe.iter().map(String::as_str), std::iter::empty::<&str>());
    let profile = UserProfile::new(600_000.0, RiskProfile::Conservative, Horizon::Short, 1.0);

    let selection = select(&table(records), &classes, &profile);
    assert_eq!(
        selection.symbols(),
        vec!["S0", "S1", "S2", "S3", "S4", "S5", "S6", "S7", "G0", "G1"]
    );
}

fn risk_strategy() -> impl Strategy<Value = RiskProfile> {
    prop_oneof![
        Just(RiskProfile::Conservative),
        Just(RiskProfile::Balanced),
        Just(RiskProfile::Aggressive),
        Just(RiskProfile::Unrecognized),
    ]
}

fn horizon_strategy() -> impl Strategy<Value = Horizon> {
    prop_oneof![
        Just(Horizon::Short),
        Just(Horizon::Medium),
        Just(Horizon::Long),
        Just(Horizon::Unrecognized),
    ]
}

/// `(volatility, return, safe, high_growth)` rows, named `I0..In`.
fn rows_strategy(
    returns: std::ops::Range<f64>,
) -> impl Strategy<Value = Vec<(f64, f64, bool, bool)>> {
    prop::collection::vec(
        (0.0f64..1.0, returns, any::<bool>(), any::<bool>()),
        0..30,
    )
}

fn build(rows: &[(f64, f64, bool, bool)]) -> (StatsTable, AssetClasses) {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, &(vol, ret, _, _))| stats(&format!("I{i}"), vol, ret))
        .collect();
    let safe: Vec<String> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.2)
        .map(|(i, _)| format!("I{i}"))
        .collect();
    let growth: Vec<String> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.3)
        .map(|(i, _)| format!("I{i}"))
        .collect();
    (table(records), AssetClasses::new(safe, growth))
}

proptest! {
    #[test]
    fn selection_never_exceeds_target(
        rows in rows_strategy(-0.5..0.5),
        amount in 1.0f64..1_000_000.0,
        desired in 0.1f64..30.0,
        risk in risk_strategy(),
        horizon in horizon_strategy(),
    ) {
        let (table, classes) = build(&rows);
        let profile = UserProfile::new(amount, risk, horizon, desired);
        let selection = select(&table, &classes, &profile);
        prop_assert!(selection.len() <= target_size(amount));
        prop_assert_eq!(selection.target_size, target_size(amount));
    }

    #[test]
    fn selection_is_idempotent(
        rows in rows_strategy(-0.5..0.5),
        amount in 1.0f64..1_000_000.0,
        desired in 0.1f64..30.0,
        risk in risk_strategy(),
        horizon in horizon_strategy(),
    ) {
        let (table, classes) = build(&rows);
        let profile = UserProfile::new(amount, risk, horizon, desired);
        prop_assert_eq!(
            select(&table, &classes, &profile),
            select(&table, &classes, &profile)
        );
    }

    #[test]
    fn short_horizon_puts_safe_first(
        rows in rows_strategy(-0.5..0.5),
        amount in 1.0f64..1_000_000.0,
        desired in 0.1f64..30.0,
        risk in risk_strategy(),
    ) {
        let (table, classes) = build(&rows);
        let profile = UserProfile::new(amount, risk, Horizon::Short, desired);
        let selection = select(&table, &classes, &profile);
        if selection.basis == SelectionBasis::Eligible {
            let band = risk.volatility_band();
            let safe_eligible = table
                .records()
                .iter()
                .filter(|s| band.contains(s.annual_volatility)
                    && s.annual_return >= profile.return_threshold()
                    && classes.is_safe(&s.symbol))
                .count();
            let expected = safe_eligible.min(tranche_quota(selection.target_size, SHORT_SAFE_SHARE_PCT));
            prop_assert!(selection.instruments[..expected].iter().all(|s| classes.is_safe(&s.symbol)));
        }
    }

    #[test]
    fn long_horizon_puts_growth_first(
        rows in rows_strategy(-0.5..0.5),
        amount in 1.0f64..1_000_000.0,
        desired in 0.1f64..30.0,
        risk in risk_strategy(),
    ) {
        let (table, classes) = build(&rows);
        let profile = UserProfile::new(amount, risk, Horizon::Long, desired);
        let selection = select(&table, &classes, &profile);
        if selection.basis == SelectionBasis::Eligible {
            let band = risk.volatility_band();
            let growth_eligible = table
                .records()
                .iter()
                .filter(|s| band.contains(s.annual_volatility)
                    && s.annual_return >= profile.return_threshold()
                    && classes.is_high_growth(&s.symbol))
                .count();
            let expected = growth_eligible.min(tranche_quota(selection.target_size, LONG_GROWTH_SHARE_PCT));
            prop_assert!(selection.instruments[..expected].iter().all(|s| classes.is_high_growth(&s.symbol)));
        }
    }

    #[test]
    fn fallback_orders_by_return_distance(
        rows in rows_strategy(-0.5..0.0),
        amount in 1.0f64..1_000_000.0,
        desired in 0.1f64..30.0,
        risk in risk_strategy(),
        horizon in horizon_strategy(),
    ) {
        let (table, classes) = build(&rows);
        let profile = UserProfile::new(amount, risk, horizon, desired);
        let selection = select(&table, &classes, &profile);
        let threshold = profile.return_threshold();

        prop_assert_eq!(selection.basis, SelectionBasis::ClosestReturn);
        prop_assert_eq!(selection.len(), table.len().min(target_size(amount)));
        let distances: Vec<f64> = selection
            .instruments
            .iter()
            .map(|s| (s.annual_return - threshold).abs())
            .collect();
        prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        if let Some(&worst) = distances.last() {
            let picked: Vec<&str> = selection.symbols();
            let closer_left_out = table
                .records()
                .iter()
                .filter(|s| !picked.contains(&s.symbol.as_str()))
                .any(|s| (s.annual_return - threshold).abs() < worst);
            prop_assert!(!closer_left_out);
        }
    }
}
