//! Tit-for-tat over a bounded window, with a custom quality bar.

use trustlern_core::{Decision, InformationContext, Result, Strategy, StrategyConfig};

use crate::names;
use crate::rules::all_aligned_hard;

/// Requires the bot to have been honest in each of the last
/// `history_window` rounds, then goes iff `bot_message >= quality_threshold`.
///
/// A window of 0 ignores history entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryWindow {
    pub history_window: usize,
    pub quality_threshold: f64,
}

impl HistoryWindow {
    pub fn new(history_window: usize, quality_threshold: f64) -> Self {
        Self {
            history_window,
            quality_threshold,
        }
    }
}

impl Strategy for HistoryWindow {
    fn name(&self) -> &str {
        names::HISTORY_AND_REVIEW_QUALITY
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, _config: &StrategyConfig) -> Result<Decision> {
        let rounds = ctx.previous_rounds;
        let cooperated = if rounds.is_empty() || self.history_window == 0 {
            true
        } else {
            let start = rounds.len().saturating_sub(self.history_window);
            all_aligned_hard(&rounds[start..], start)?
        };
        Ok(Decision::from(
            cooperated && ctx.bot_message() >= self.quality_threshold,
        ))
    }
}
