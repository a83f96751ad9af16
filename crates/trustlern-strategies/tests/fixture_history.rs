//! Runs every strategy against the shared history fixture.
//!
//! Fixture rounds (mean review / bot / user): 7/9/went, 9/9/went,
//! 9/10/stayed, 5/5/stayed. Disappointment flags are therefore 1, 0, 1, 0.

use std::path::PathBuf;
use std::sync::Arc;

use trustlern_core::config::{
    ADAPTIVE_DISAPPOINTMENT_THRESHOLD, AGGRESSIVE_DIVISOR, AGGRESSIVE_FIXED_INTERVAL,
    CONSERVATIVE_ALPHA, CONSERVATIVE_INITIAL_THRESHOLD, CONSERVATIVE_MIN_THRESHOLD,
};
use trustlern_core::{
    disappointment, Decision, InformationContext, RoundOffer, RoundRecord, Strategy,
    StrategyConfig,
};
use trustlern_strategies::{
    names, ProbabilityTable, ProbabilityTableStrategy, StrategyError, StrategyKind,
    StrategyRegistry,
};

fn fixture(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(rel)
}

fn history() -> Vec<RoundRecord> {
    let content = std::fs::read_to_string(fixture("session/history.ok.json"))
        .expect("Failed to read history fixture");
    serde_json::from_str(&content).expect("Failed to deserialize history fixture")
}

fn config() -> StrategyConfig {
    StrategyConfig::new()
        .with(CONSERVATIVE_INITIAL_THRESHOLD, 0.5)
        .with(CONSERVATIVE_ALPHA, 0.2)
        .with(CONSERVATIVE_MIN_THRESHOLD, 0.3)
        .with(AGGRESSIVE_FIXED_INTERVAL, 1.0)
        .with(AGGRESSIVE_DIVISOR, 2.0)
        .with(ADAPTIVE_DISAPPOINTMENT_THRESHOLD, 0.4)
}

#[test]
fn fixture_disappointment_flags() {
    let map = disappointment(&history()).expect("valid history");
    assert_eq!(
        map.iter().collect::<Vec<_>>(),
        vec![(0, 1), (1, 0), (2, 1), (3, 0)]
    );
}

#[test]
fn registry_decisions_on_fixture() {
    let history = history();
    let offer = RoundOffer::new(8.5).with_hotel_value(9.0);
    let ctx = InformationContext::new(&history, &offer);
    let cfg = config();
    let mut registry = StrategyRegistry::with_defaults().expect("defaults build");

    let expected = [
        (names::CORRECT_ACTION, Decision::Continue),
        (names::USER_RATIONAL_ACTION, Decision::Continue),
        (names::USER_PICKY, Decision::Stop),
        (names::USER_SLOPPY, Decision::Continue),
        // last round was honest
        (names::USER_SHORT_T4T, Decision::Continue),
        // last round's hotel was bad and 8.5 < 9
        (names::USER_PICKY_SHORT_T4T, Decision::Stop),
        // round 0 was a lie
        (names::USER_HARD_T4T, Decision::Stop),
        // ratio 0.5 against a threshold floored at 0.3
        (names::CONSERVATIVE_STRATEGY, Decision::Stop),
        // two disappointments against an allowance of 3
        (names::AGGRESSIVE_PURSUIT, Decision::Continue),
        // recent flags 0, 1, 0
        (names::ADAPTIVE_LEARNING, Decision::Continue),
    ];
    for (name, decision) in expected {
        let got = registry
            .decide(name, &ctx, &cfg)
            .unwrap_or_else(|e| panic!("{name} failed: {e}"));
        assert_eq!(got, decision, "strategy {name}");
    }
}

#[test]
fn history_window_on_fixture() {
    let history = history();
    let offer = RoundOffer::new(8.0);
    let ctx = InformationContext::new(&history, &offer);

    let cases = [
        (0, Decision::Continue),
        (1, Decision::Continue),
        (4, Decision::Stop),
    ];
    for (window, expected) in cases {
        let kind = StrategyKind::HistoryAndReviewQuality {
            history_window: window,
            quality_threshold: 8.0,
        };
        let mut strategy = kind.build().expect("factory builds");
        assert_eq!(
            strategy.decide(&ctx, &StrategyConfig::new()),
            Ok(expected),
            "window {window}"
        );
    }
}

#[test]
fn probability_table_fixture_loads() {
    let table = ProbabilityTable::load(fixture("strategies/proba2go.ok.json"))
        .expect("fixture table loads");
    assert_eq!(table.len(), 5);

    let mut strategy = ProbabilityTableStrategy::deterministic(Arc::new(table));
    let cases = [
        (0, Decision::Continue),
        (1, Decision::Continue),
        (2, Decision::Stop),
        (17, Decision::Continue),
    ];
    for (review_id, expected) in cases {
        let offer = RoundOffer::new(0.0).with_review_id(review_id);
        let ctx = InformationContext::new(&[], &offer);
        assert_eq!(strategy.decide(&ctx, &StrategyConfig::new()), Ok(expected), "review {review_id}");
    }
}

#[test]
fn llm_kind_builds_from_fixture_path() {
    let kind = StrategyKind::LlmBased {
        is_stochastic: true,
        table_path: Some(fixture("strategies/proba2go.ok.json")),
        seed: Some(3),
    };
    let mut a = kind.build().expect("table loads");
    let mut b = kind.build().expect("table loads");

    let offer = RoundOffer::new(0.0).with_review_id(17);
    let ctx = InformationContext::new(&[], &offer);
    let cfg = StrategyConfig::new();
    for _ in 0..50 {
        assert_eq!(a.decide(&ctx, &cfg), b.decide(&ctx, &cfg));
    }
}

#[test]
fn malformed_table_fixture_fails_at_construction() {
    let res =
        ProbabilityTableStrategy::from_path(fixture("strategies/proba2go.bad-key.json"), false);
    assert!(matches!(res, Err(StrategyError::InvalidReviewId(k)) if k == "review-1"));
}
