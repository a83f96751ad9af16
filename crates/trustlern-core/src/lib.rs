#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Core types for trustlern.
//!
//! A simulated user repeatedly decides whether to trust a hotel a bot
//! recommends. Every completed round becomes a [`RoundRecord`]; a
//! [`Strategy`] looks at the history plus the current [`RoundOffer`] and
//! returns a [`Decision`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod disappointment;
pub mod error;
pub mod round;

pub use config::StrategyConfig;
pub use disappointment::{disappointment, DisappointmentMap};
pub use error::{EvalError, Result};
pub use round::{InformationContext, RoundOffer, RoundRecord, GOOD_SCORE};

/// Binary continuance decision. Serialized as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Decision {
    Stop,
    Continue,
}

impl Decision {
    pub fn as_u8(self) -> u8 {
        u8::from(self)
    }

    pub fn is_continue(self) -> bool {
        self == Decision::Continue
    }
}

impl From<bool> for Decision {
    fn from(go: bool) -> Self {
        if go {
            Decision::Continue
        } else {
            Decision::Stop
        }
    }
}

impl From<Decision> for u8 {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Stop => 0,
            Decision::Continue => 1,
        }
    }
}

impl TryFrom<u8> for Decision {
    type Error = String;

    fn try_from(v: u8) -> std::result::Result<Self, Self::Error> {
        match v {
            0 => Ok(Decision::Stop),
            1 => Ok(Decision::Continue),
            other => Err(format!("decision must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A decision function over the history of one session.
///
/// Implementations rebuild all derived state from `ctx.previous_rounds` on
/// every call. `&mut self` exists only for strategies that own a random
/// source.
pub trait Strategy: fmt::Debug + Send {
    /// Registry name of the strategy.
    fn name(&self) -> &str;

    fn decide(&mut self, ctx: &InformationContext<'_>, config: &StrategyConfig)
        -> Result<Decision>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn decide(
        &mut self,
        ctx: &InformationContext<'_>,
        config: &StrategyConfig,
    ) -> Result<Decision> {
        (**self).decide(ctx, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_converts_from_bool_and_to_u8() {
        assert_eq!(Decision::from(true), Decision::Continue);
        assert_eq!(Decision::from(false).as_u8(), 0);
        assert_eq!(Decision::try_from(1), Ok(Decision::Continue));
        assert!(Decision::try_from(7).is_err());
        assert_eq!(Decision::Continue.to_string(), "1");
    }
}
