#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Session driver and outcome statistics.
//!
//! A [`Session`] owns the growing history of one simulated user. Each round
//! it asks a strategy for a decision on the current offer and appends the
//! resulting [`RoundRecord`]. Histories are summarized into
//! [`SessionStatistics`] and [`SessionReport`]s for comparing strategies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use trustlern_core::{
    disappointment, Decision, EvalError, InformationContext, Result, RoundOffer, RoundRecord,
    Strategy, StrategyConfig,
};
use trustlern_strategies::{StrategyError, StrategyKind};

/// Fallback timestamp when formatting fails
const FALLBACK_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

/// History of one simulated user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    history: Vec<RoundRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a session from earlier rounds.
    pub fn with_history(history: Vec<RoundRecord>) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn rounds_played(&self) -> usize {
        self.history.len()
    }

    /// Plays one round.
    ///
    /// `reviews` are the peer reviews of the offered hotel as revealed after
    /// the decision. A round without reviews is rejected before the strategy
    /// runs, so it never enters the history.
    pub fn step(
        &mut self,
        strategy: &mut dyn Strategy,
        config: &StrategyConfig,
        offer: &RoundOffer,
        reviews: Vec<f64>,
    ) -> Result<Decision> {
        if reviews.is_empty() {
            return Err(EvalError::EmptyReviews {
                round: self.history.len(),
            });
        }

        let decision = strategy.decide(&InformationContext::new(&self.history, offer), config)?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            strategy = strategy.name(),
            round = self.history.len(),
            bot_message = offer.bot_message,
            decision = decision.as_u8(),
            "round played"
        );

        self.history
            .push(RoundRecord::new(reviews, offer.bot_message, decision));
        Ok(decision)
    }

    pub fn statistics(&self) -> Result<SessionStatistics> {
        SessionStatistics::from_history(&self.history)
    }

    /// Summary of this session, stamped with the current time.
    pub fn report(&self, strategy: &str) -> Result<SessionReport> {
        Ok(SessionReport {
            strategy: strategy.to_string(),
            ts: iso8601_now(),
            statistics: self.statistics()?,
        })
    }

    /// Ends the session and hands back its history.
    pub fn into_history(self) -> Vec<RoundRecord> {
        self.history
    }
}

/// Counts aggregated from one or more session histories.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatistics {
    /// Total number of rounds.
    pub total: usize,
    /// Rounds in which the user went.
    pub continued: usize,
    /// Rounds flagged as disappointing in hindsight.
    pub disappointments: usize,
}

impl SessionStatistics {
    pub fn from_history(history: &[RoundRecord]) -> Result<Self> {
        let map = disappointment(history)?;
        Ok(Self {
            total: history.len(),
            continued: history
                .iter()
                .filter(|r| r.user_decision.is_continue())
                .count(),
            disappointments: map.count(),
        })
    }

    /// Share of rounds in which the user went (0.0 to 1.0).
    #[must_use]
    pub fn continue_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.continued as f64 / self.total as f64;
        rate
    }

    /// Share of disappointing rounds (0.0 to 1.0).
    #[must_use]
    pub fn disappointment_rate(&self) -> f64 {
        debug_assert!(
            self.disappointments <= self.total,
            "SessionStatistics counts are inconsistent"
        );
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.disappointments as f64 / self.total as f64;
        rate
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            continued: self.continued + other.continued,
            disappointments: self.disappointments + other.disappointments,
        }
    }
}

/// Statistics of one finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Registry name of the strategy that played the session.
    pub strategy: String,
    /// RFC 3339 timestamp of when the report was generated.
    pub ts: String,
    pub statistics: SessionStatistics,
}

/// Sums session statistics per strategy name.
#[must_use]
pub fn aggregate_by_strategy(reports: &[SessionReport]) -> HashMap<String, SessionStatistics> {
    let mut stats: HashMap<String, SessionStatistics> = HashMap::new();
    for report in reports {
        let entry = stats.entry(report.strategy.clone()).or_default();
        *entry = entry.merge(report.statistics);
    }
    stats
}

/// Builds `kind` and plays every `(offer, reviews)` round through a fresh
/// session. Stops at the first failing round.
pub fn replay<I>(
    kind: &StrategyKind,
    config: &StrategyConfig,
    rounds: I,
) -> std::result::Result<(Session, SessionReport), StrategyError>
where
    I: IntoIterator<Item = (RoundOffer, Vec<f64>)>,
{
    let mut strategy = kind.build()?;
    let mut session = Session::new();
    for (offer, reviews) in rounds {
        session.step(&mut *strategy, config, &offer, reviews)?;
    }
    let report = session.report(kind.name())?;
    Ok((session, report))
}

fn iso8601_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| FALLBACK_TIMESTAMP.to_string())
}
