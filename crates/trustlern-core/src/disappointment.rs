//! Hindsight evaluation of past rounds.
//!
//! A round is disappointing when the user's decision turned out to be
//! misaligned with the round's mean review: the user went although the mean
//! was below [`GOOD_SCORE`], or stayed away although it was at or above it.

use serde::Serialize;

use crate::error::Result;
use crate::round::{RoundRecord, GOOD_SCORE};
use crate::Decision;

/// Per-round disappointment flags, indexed like the history they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisappointmentMap {
    flags: Vec<u8>,
}

impl DisappointmentMap {
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Flag of round `round`, `None` past the end of the history.
    pub fn get(&self, round: usize) -> Option<u8> {
        self.flags.get(round).copied()
    }

    /// Number of disappointing rounds.
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&f| f == 1).count()
    }

    /// Share of disappointing rounds, 0.0 for an empty history.
    pub fn ratio(&self) -> f64 {
        if self.flags.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.count() as f64 / self.flags.len() as f64;
        ratio
    }

    /// `(round, flag)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.flags.iter().copied().enumerate()
    }
}

/// Computes the disappointment flag of every round in `previous_rounds`.
///
/// Fails on the first round without reviews.
pub fn disappointment(previous_rounds: &[RoundRecord]) -> Result<DisappointmentMap> {
    let flags = previous_rounds
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mean = r.mean_review(i)?;
            let went = r.user_decision == Decision::Continue;
            Ok(u8::from((mean < GOOD_SCORE && went) || (mean >= GOOD_SCORE && !went)))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DisappointmentMap { flags })
}
