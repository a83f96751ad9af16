//! Example: play the same sequence of hotels with several strategies and
//! compare how often each user went and how often they were disappointed.
//!
//! Run with: cargo run -p trustlern-session --example compare_strategies

use std::error::Error;

use trustlern_core::config::{
    ADAPTIVE_DISAPPOINTMENT_THRESHOLD, AGGRESSIVE_DIVISOR, AGGRESSIVE_FIXED_INTERVAL,
    CONSERVATIVE_ALPHA, CONSERVATIVE_INITIAL_THRESHOLD, CONSERVATIVE_MIN_THRESHOLD,
};
use trustlern_core::{RoundOffer, StrategyConfig};
use trustlern_session::{aggregate_by_strategy, replay};
use trustlern_strategies::{StrategyKind, PARAMETERLESS};

/// (bot message, mean review of the hotel)
const HOTELS: [(f64, f64); 10] = [
    (9.0, 9.2),
    (8.0, 6.5),
    (9.5, 9.0),
    (7.0, 7.5),
    (10.0, 4.0),
    (8.5, 8.8),
    (6.0, 8.1),
    (9.0, 9.6),
    (8.0, 7.0),
    (9.0, 8.9),
];

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== trustlern: strategy comparison ===\n");

    let config = StrategyConfig::new()
        .with(CONSERVATIVE_INITIAL_THRESHOLD, 0.5)
        .with(CONSERVATIVE_ALPHA, 0.2)
        .with(CONSERVATIVE_MIN_THRESHOLD, 0.3)
        .with(AGGRESSIVE_FIXED_INTERVAL, 2.0)
        .with(AGGRESSIVE_DIVISOR, 3.0)
        .with(ADAPTIVE_DISAPPOINTMENT_THRESHOLD, 0.4);

    let mut kinds = Vec::new();
    for name in PARAMETERLESS {
        kinds.push(match StrategyKind::from_name(name)? {
            StrategyKind::RandomAction { .. } => StrategyKind::RandomAction { seed: Some(7) },
            kind => kind,
        });
    }
    kinds.push(StrategyKind::HistoryAndReviewQuality {
        history_window: 2,
        quality_threshold: 8.0,
    });

    let mut reports = Vec::new();
    for kind in &kinds {
        let rounds = HOTELS.iter().map(|&(message, mean)| {
            (
                RoundOffer::new(message).with_hotel_value(mean),
                vec![mean],
            )
        });
        let (_, report) = replay(kind, &config, rounds)?;
        reports.push(report);
    }

    let mut by_strategy: Vec<_> = aggregate_by_strategy(&reports).into_iter().collect();
    by_strategy.sort_by(|a, b| a.0.cmp(&b.0));

    for (strategy, stats) in by_strategy {
        println!(
            "  {:<28} went {:>2}/{} ({:>5.1}%), disappointed {:>5.1}%",
            strategy,
            stats.continued,
            stats.total,
            stats.continue_rate() * 100.0,
            stats.disappointment_rate() * 100.0
        );
    }

    Ok(())
}
