//! Fixed-rule users: thresholds on the bot's message, the oracle, a coin
//! flip, and the tit-for-tat family that checks whether the bot told the
//! truth in earlier rounds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trustlern_core::{
    Decision, InformationContext, Result, RoundRecord, Strategy, StrategyConfig, GOOD_SCORE,
};

use crate::names;

const PICKY_SCORE: f64 = 9.0;
const SLOPPY_SCORE: f64 = 7.0;

/// Whether the bot's claim in `record` matched the round's mean review.
///
/// A bot message of exactly 8 only counts as honest if the hotel was good.
pub(crate) fn aligned(record: &RoundRecord, round: usize) -> Result<bool> {
    let mean = record.mean_review(round)?;
    Ok((record.bot_action >= GOOD_SCORE && mean >= GOOD_SCORE)
        || (record.bot_action < GOOD_SCORE && mean < GOOD_SCORE))
}

/// Like [`aligned`], but a bot message of exactly 8 also counts as honest
/// for a bad hotel.
pub(crate) fn aligned_hard(record: &RoundRecord, round: usize) -> Result<bool> {
    let mean = record.mean_review(round)?;
    Ok((record.bot_action >= GOOD_SCORE && mean >= GOOD_SCORE)
        || (record.bot_action <= GOOD_SCORE && mean < GOOD_SCORE))
}

/// Checks every round of `rounds` with [`aligned_hard`]. `offset` is the
/// index of `rounds[0]` in the full history.
pub(crate) fn all_aligned_hard(rounds: &[RoundRecord], offset: usize) -> Result<bool> {
    // Every round is evaluated so that a malformed round anywhere is reported.
    rounds
        .iter()
        .enumerate()
        .try_fold(true, |acc, (i, r)| Ok(aligned_hard(r, offset + i)? && acc))
}

/// Oracle: goes iff the hidden hotel value is good.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrectAction;

impl Strategy for CorrectAction {
    fn name(&self) -> &str {
        names::CORRECT_ACTION
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, _config: &StrategyConfig) -> Result<Decision> {
        Ok(Decision::from(ctx.hotel_value()? >= GOOD_SCORE))
    }
}

/// Uniform coin flip.
#[derive(Debug, Clone)]
pub struct RandomAction {
    rng: StdRng,
}

impl RandomAction {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible variant.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomAction {
    fn name(&self) -> &str {
        names::RANDOM_ACTION
    }

    fn decide(&mut self, _ctx: &InformationContext<'_>, _config: &StrategyConfig) -> Result<Decision> {
        Ok(Decision::from(self.rng.gen::<bool>()))
    }
}

/// Goes iff the bot's message reaches a fixed score, ignoring history.
#[derive(Debug, Clone, Copy)]
pub struct BotMessageThreshold {
    name: &'static str,
    min_score: f64,
}

impl BotMessageThreshold {
    /// `bot_message >= 8`.
    pub fn rational() -> Self {
        Self {
            name: names::USER_RATIONAL_ACTION,
            min_score: GOOD_SCORE,
        }
    }

    /// `bot_message >= 9`.
    pub fn picky() -> Self {
        Self {
            name: names::USER_PICKY,
            min_score: PICKY_SCORE,
        }
    }

    /// `bot_message >= 7`.
    pub fn sloppy() -> Self {
        Self {
            name: names::USER_SLOPPY,
            min_score: SLOPPY_SCORE,
        }
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }
}

impl Strategy for BotMessageThreshold {
    fn name(&self) -> &str {
        self.name
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, _config: &StrategyConfig) -> Result<Decision> {
        Ok(Decision::from(ctx.bot_message() >= self.min_score))
    }
}

/// Trusts the bot as long as it was honest in the previous round.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortTitForTat;

impl Strategy for ShortTitForTat {
    fn name(&self) -> &str {
        names::USER_SHORT_T4T
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, _config: &StrategyConfig) -> Result<Decision> {
        let cooperated = match ctx.last_round() {
            None => true,
            Some(last) => aligned(last, ctx.rounds_played() - 1)?,
        };
        Ok(Decision::from(cooperated && ctx.bot_message() >= GOOD_SCORE))
    }
}

/// Always goes at 9 or more; at 8 only if the previous hotel was good.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickyShortTitForTat;

impl Strategy for PickyShortTitForTat {
    fn name(&self) -> &str {
        names::USER_PICKY_SHORT_T4T
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, _config: &StrategyConfig) -> Result<Decision> {
        let message = ctx.bot_message();
        if message >= PICKY_SCORE {
            return Ok(Decision::Continue);
        }
        if message >= GOOD_SCORE {
            let previous_good = match ctx.last_round() {
                None => true,
                Some(last) => last.mean_review(ctx.rounds_played() - 1)? >= GOOD_SCORE,
            };
            return Ok(Decision::from(previous_good));
        }
        Ok(Decision::Stop)
    }
}

/// Never forgives: one dishonest round anywhere in the history stops the
/// user for good.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardTitForTat;

impl Strategy for HardTitForTat {
    fn name(&self) -> &str {
        names::USER_HARD_T4T
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, _config: &StrategyConfig) -> Result<Decision> {
        let cooperated = all_aligned_hard(ctx.previous_rounds, 0)?;
        Ok(Decision::from(cooperated && ctx.bot_message() >= GOOD_SCORE))
    }
}
