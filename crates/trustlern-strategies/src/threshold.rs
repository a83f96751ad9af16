//! Strategies driven by the disappointment history.
//!
//! All three trust the bot's message while there is not enough history to
//! judge it, then compare disappointment against limits taken from the
//! [`StrategyConfig`].

use trustlern_core::config::{
    ADAPTIVE_DISAPPOINTMENT_THRESHOLD, AGGRESSIVE_DIVISOR, AGGRESSIVE_FIXED_INTERVAL,
    CONSERVATIVE_ALPHA, CONSERVATIVE_INITIAL_THRESHOLD, CONSERVATIVE_MIN_THRESHOLD,
};
use trustlern_core::{
    disappointment, Decision, EvalError, InformationContext, Result, Strategy, StrategyConfig,
    GOOD_SCORE,
};

use crate::names;
use crate::telemetry;

/// Rounds the adaptive strategy needs before it looks at its own history.
pub const ADAPTIVE_WARMUP_ROUNDS: usize = 3;
const RECENT_WINDOW: usize = 3;

fn trust_bot(ctx: &InformationContext<'_>) -> Decision {
    Decision::from(ctx.bot_message() >= GOOD_SCORE)
}

/// Disappointment-ratio limit after `rounds_played` rounds.
///
/// Decreases by `alpha` per round and never drops below `min_threshold`.
pub fn conservative_threshold(
    initial_threshold: f64,
    alpha: f64,
    min_threshold: f64,
    rounds_played: usize,
) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let rounds = rounds_played as f64;
    (initial_threshold - alpha * rounds).max(min_threshold)
}

/// Number of disappointments tolerated after `rounds_played` rounds.
pub fn aggressive_allowance(fixed_interval: f64, divisor: f64, rounds_played: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let rounds = rounds_played as f64;
    fixed_interval + (rounds / divisor).floor()
}

/// Continues while the disappointment ratio stays below a limit that
/// tightens as the session goes on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conservative;

impl Strategy for Conservative {
    fn name(&self) -> &str {
        names::CONSERVATIVE_STRATEGY
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, config: &StrategyConfig) -> Result<Decision> {
        let map = disappointment(ctx.previous_rounds)?;
        let rounds = ctx.rounds_played();
        if rounds == 0 {
            return Ok(trust_bot(ctx));
        }

        let threshold = conservative_threshold(
            config.require(CONSERVATIVE_INITIAL_THRESHOLD)?,
            config.require(CONSERVATIVE_ALPHA)?,
            config.require(CONSERVATIVE_MIN_THRESHOLD)?,
            rounds,
        );
        let ratio = map.ratio();
        telemetry::threshold(self.name(), ratio, threshold);
        Ok(Decision::from(ratio < threshold))
    }
}

/// Keeps going until the number of disappointments reaches a slowly growing
/// allowance.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggressivePursuit;

impl Strategy for AggressivePursuit {
    fn name(&self) -> &str {
        names::AGGRESSIVE_PURSUIT
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, config: &StrategyConfig) -> Result<Decision> {
        let map = disappointment(ctx.previous_rounds)?;
        let rounds = ctx.rounds_played();
        if rounds == 0 {
            return Ok(trust_bot(ctx));
        }

        let fixed_interval = config.require(AGGRESSIVE_FIXED_INTERVAL)?;
        let divisor = config.require(AGGRESSIVE_DIVISOR)?;
        if divisor == 0.0 {
            return Err(EvalError::InvalidConfig {
                key: AGGRESSIVE_DIVISOR.to_string(),
                reason: "divisor must not be zero".to_string(),
            });
        }

        let allowance = aggressive_allowance(fixed_interval, divisor, rounds);
        #[allow(clippy::cast_precision_loss)]
        let count = map.count() as f64;
        telemetry::threshold(self.name(), count, allowance);
        Ok(Decision::from(count < allowance))
    }
}

/// Weighs the overall disappointment ratio against the last three rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveLearning;

impl Strategy for AdaptiveLearning {
    fn name(&self) -> &str {
        names::ADAPTIVE_LEARNING
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, config: &StrategyConfig) -> Result<Decision> {
        let map = disappointment(ctx.previous_rounds)?;
        let rounds = ctx.rounds_played();
        if rounds < ADAPTIVE_WARMUP_ROUNDS {
            return Ok(trust_bot(ctx));
        }

        let ratio = map.ratio();
        // Indices before the start of the history count as not disappointing.
        let recent: Vec<u8> = (0..RECENT_WINDOW)
            .map(|i| {
                (rounds + i)
                    .checked_sub(RECENT_WINDOW)
                    .and_then(|idx| map.get(idx))
                    .unwrap_or(0)
            })
            .collect();
        let recent_sum: usize = recent.iter().map(|&f| usize::from(f)).sum();
        #[allow(clippy::cast_precision_loss)]
        let recent_ratio = recent_sum as f64 / RECENT_WINDOW as f64;

        let threshold = config.require(ADAPTIVE_DISAPPOINTMENT_THRESHOLD)?;
        telemetry::threshold(self.name(), recent_ratio, threshold);

        // Rule order matters: the first matching rule wins.
        let go = if ratio < threshold && recent_ratio < threshold {
            true
        } else if recent_sum == RECENT_WINDOW {
            false
        } else {
            recent.last() == Some(&0) && recent_sum <= 1
        };
        Ok(Decision::from(go))
    }
}
