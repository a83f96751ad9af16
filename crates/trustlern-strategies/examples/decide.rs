//! Reads a decision request as JSON from stdin and prints the decision.
//!
//! ```json
//! {
//!   "strategy": {"strategy": "conservative_strategy"},
//!   "config": {"conservative_strategy_initial_threshold": 0.5, ...},
//!   "previous_rounds": [{"reviews": [7, 7], "bot_action": 9, "user_decision": 1}],
//!   "offer": {"bot_message": 8.5}
//! }
//! ```
//!
//! Run with: cargo run -p trustlern-strategies --example decide < request.json

use std::io::{self, Read};

use serde::{Deserialize, Serialize};
use trustlern_core::{Decision, InformationContext, RoundOffer, RoundRecord, StrategyConfig};
use trustlern_strategies::StrategyKind;

#[derive(Deserialize)]
struct DecisionRequest {
    strategy: StrategyKind,
    #[serde(default)]
    config: StrategyConfig,
    #[serde(default)]
    previous_rounds: Vec<RoundRecord>,
    offer: RoundOffer,
}

#[derive(Serialize)]
struct DecisionRecord<'a> {
    strategy: &'a str,
    rounds_played: usize,
    decision: Decision,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let request: DecisionRequest = serde_json::from_str(&input)?;
    let mut strategy = request.strategy.build()?;
    let ctx = InformationContext::new(&request.previous_rounds, &request.offer);
    let decision = strategy.decide(&ctx, &request.config)?;

    let record = DecisionRecord {
        strategy: request.strategy.name(),
        rounds_played: ctx.rounds_played(),
        decision,
    };
    serde_json::to_writer_pretty(io::stdout(), &record)?;
    println!();

    Ok(())
}
