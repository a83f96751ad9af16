//! Lookup of strategies by name.
//!
//! [`StrategyKind`] is the serializable description of a strategy, including
//! the parameters of the factory strategies. [`StrategyRegistry`] holds built
//! strategies under their names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use trustlern_core::{Decision, InformationContext, Strategy, StrategyConfig};

use crate::error::{Result, StrategyError};
use crate::names;
use crate::rules::{
    BotMessageThreshold, CorrectAction, HardTitForTat, PickyShortTitForTat, RandomAction,
    ShortTitForTat,
};
use crate::table::{ProbabilityTable, ProbabilityTableStrategy, DEFAULT_TABLE_PATH};
use crate::telemetry;
use crate::threshold::{AdaptiveLearning, AggressivePursuit, Conservative};
use crate::topic::TopicBased;
use crate::window::HistoryWindow;

/// Every strategy, as it appears in experiment configuration.
///
/// ```json
/// {"strategy": "history_and_review_quality", "history_window": 2, "quality_threshold": 8.5}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyKind {
    CorrectAction,
    RandomAction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
    UserRationalAction,
    UserPicky,
    UserSloppy,
    UserShortT4t,
    UserPickyShortT4t,
    UserHardT4t,
    ConservativeStrategy,
    AggressivePursuit,
    AdaptiveLearning,
    HistoryAndReviewQuality {
        history_window: usize,
        quality_threshold: f64,
    },
    TopicBased {
        positive_topics: Vec<String>,
        negative_topics: Vec<String>,
        quality_threshold: f64,
    },
    #[serde(rename = "LLM_based")]
    LlmBased {
        is_stochastic: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_path: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

/// Strategies that need no construction parameters.
pub const PARAMETERLESS: [&str; 11] = [
    names::CORRECT_ACTION,
    names::RANDOM_ACTION,
    names::USER_RATIONAL_ACTION,
    names::USER_PICKY,
    names::USER_SLOPPY,
    names::USER_SHORT_T4T,
    names::USER_PICKY_SHORT_T4T,
    names::USER_HARD_T4T,
    names::CONSERVATIVE_STRATEGY,
    names::AGGRESSIVE_PURSUIT,
    names::ADAPTIVE_LEARNING,
];

impl StrategyKind {
    /// Kind of a parameterless strategy.
    pub fn from_name(name: &str) -> Result<Self> {
        let kind = match name {
            names::CORRECT_ACTION => Self::CorrectAction,
            names::RANDOM_ACTION => Self::RandomAction { seed: None },
            names::USER_RATIONAL_ACTION => Self::UserRationalAction,
            names::USER_PICKY => Self::UserPicky,
            names::USER_SLOPPY => Self::UserSloppy,
            names::USER_SHORT_T4T => Self::UserShortT4t,
            names::USER_PICKY_SHORT_T4T => Self::UserPickyShortT4t,
            names::USER_HARD_T4T => Self::UserHardT4t,
            names::CONSERVATIVE_STRATEGY => Self::ConservativeStrategy,
            names::AGGRESSIVE_PURSUIT => Self::AggressivePursuit,
            names::ADAPTIVE_LEARNING => Self::AdaptiveLearning,
            names::HISTORY_AND_REVIEW_QUALITY | names::TOPIC_BASED | names::LLM_BASED => {
                return Err(StrategyError::MissingParameters(name.to_string()))
            }
            other => return Err(StrategyError::UnknownStrategy(other.to_string())),
        };
        Ok(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CorrectAction => names::CORRECT_ACTION,
            Self::RandomAction { .. } => names::RANDOM_ACTION,
            Self::UserRationalAction => names::USER_RATIONAL_ACTION,
            Self::UserPicky => names::USER_PICKY,
            Self::UserSloppy => names::USER_SLOPPY,
            Self::UserShortT4t => names::USER_SHORT_T4T,
            Self::UserPickyShortT4t => names::USER_PICKY_SHORT_T4T,
            Self::UserHardT4t => names::USER_HARD_T4T,
            Self::ConservativeStrategy => names::CONSERVATIVE_STRATEGY,
            Self::AggressivePursuit => names::AGGRESSIVE_PURSUIT,
            Self::AdaptiveLearning => names::ADAPTIVE_LEARNING,
            Self::HistoryAndReviewQuality { .. } => names::HISTORY_AND_REVIEW_QUALITY,
            Self::TopicBased { .. } => names::TOPIC_BASED,
            Self::LlmBased { .. } => names::LLM_BASED,
        }
    }

    /// Builds the strategy. Only `LLM_based` can fail, when its table
    /// cannot be loaded.
    pub fn build(&self) -> Result<Box<dyn Strategy>> {
        let strategy: Box<dyn Strategy> = match self {
            Self::CorrectAction => Box::new(CorrectAction),
            Self::RandomAction { seed } => Box::new(match seed {
                Some(seed) => RandomAction::with_seed(*seed),
                None => RandomAction::new(),
            }),
            Self::UserRationalAction => Box::new(BotMessageThreshold::rational()),
            Self::UserPicky => Box::new(BotMessageThreshold::picky()),
            Self::UserSloppy => Box::new(BotMessageThreshold::sloppy()),
            Self::UserShortT4t => Box::new(ShortTitForTat),
            Self::UserPickyShortT4t => Box::new(PickyShortTitForTat),
            Self::UserHardT4t => Box::new(HardTitForTat),
            Self::ConservativeStrategy => Box::new(Conservative),
            Self::AggressivePursuit => Box::new(AggressivePursuit),
            Self::AdaptiveLearning => Box::new(AdaptiveLearning),
            Self::HistoryAndReviewQuality {
                history_window,
                quality_threshold,
            } => Box::new(HistoryWindow::new(*history_window, *quality_threshold)),
            Self::TopicBased {
                positive_topics,
                negative_topics,
                quality_threshold,
            } => Box::new(TopicBased::new(
                positive_topics.clone(),
                negative_topics.clone(),
                *quality_threshold,
            )),
            Self::LlmBased {
                is_stochastic,
                table_path,
                seed,
            } => {
                let path = table_path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE_PATH));
                let table = Arc::new(ProbabilityTable::load(&path)?);
                Box::new(match seed {
                    Some(seed) if *is_stochastic => {
                        ProbabilityTableStrategy::stochastic_seeded(table, *seed)
                    }
                    _ => ProbabilityTableStrategy::new(table, *is_stochastic),
                })
            }
        };
        Ok(strategy)
    }
}

/// Built strategies keyed by name.
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Box<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every parameterless strategy under its own name.
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        for name in PARAMETERLESS {
            registry.register(name, StrategyKind::from_name(name)?.build()?)?;
        }
        Ok(registry)
    }

    /// Adds `strategy` under `name`; names are never overwritten.
    pub fn register(&mut self, name: impl Into<String>, strategy: Box<dyn Strategy>) -> Result<()> {
        let name = name.into();
        if self.strategies.contains_key(&name) {
            return Err(StrategyError::AlreadyRegistered(name));
        }
        self.strategies.insert(name, strategy);
        Ok(())
    }

    /// Builds `kind` and registers it under `name`.
    pub fn register_kind(&mut self, name: impl Into<String>, kind: &StrategyKind) -> Result<()> {
        self.register(name, kind.build()?)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Strategy>> {
        self.strategies.get_mut(name)
    }

    pub fn decide(
        &mut self,
        name: &str,
        ctx: &InformationContext<'_>,
        config: &StrategyConfig,
    ) -> Result<Decision> {
        let Some(strategy) = self.strategies.get_mut(name) else {
            telemetry::warn(&format!("no strategy registered as {name}"));
            return Err(StrategyError::UnknownStrategy(name.to_string()));
        };
        let decision = strategy.decide(ctx, config)?;
        telemetry::decided(name, ctx.rounds_played(), decision);
        Ok(decision)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use trustlern_core::RoundOffer;

    #[test]
    fn parameterless_names_roundtrip() {
        for name in PARAMETERLESS {
            let kind = StrategyKind::from_name(name).expect("known name");
            assert_eq!(kind.name(), name);
            let strategy = kind.build().expect("parameterless build");
            assert_eq!(strategy.name(), name);

            let value = serde_json::to_value(&kind).expect("serializable");
            assert_eq!(value["strategy"], json!(name));
        }
    }

    #[test]
    fn factory_names_need_parameters() {
        for name in [names::HISTORY_AND_REVIEW_QUALITY, names::TOPIC_BASED, names::LLM_BASED] {
            assert!(matches!(
                StrategyKind::from_name(name),
                Err(StrategyError::MissingParameters(_))
            ));
        }
        assert!(matches!(
            StrategyKind::from_name("user_paranoid"),
            Err(StrategyError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn factory_kinds_deserialize_from_config() {
        let kind: StrategyKind = serde_json::from_value(json!({
            "strategy": "topic_based",
            "positive_topics": ["location"],
            "negative_topics": [],
            "quality_threshold": 8.0
        }))
        .expect("valid kind");
        assert_eq!(kind.name(), names::TOPIC_BASED);

        let kind: StrategyKind = serde_json::from_value(json!({
            "strategy": "LLM_based",
            "is_stochastic": false
        }))
        .expect("valid kind");
        assert_eq!(
            kind,
            StrategyKind::LlmBased {
                is_stochastic: false,
                table_path: None,
                seed: None
            }
        );
    }

    #[test]
    fn llm_kind_with_missing_table_fails_to_build() {
        let kind = StrategyKind::LlmBased {
            is_stochastic: true,
            table_path: Some(PathBuf::from("/nonexistent/trustlern/proba2go.json")),
            seed: Some(1),
        };
        assert!(matches!(kind.build(), Err(StrategyError::TableIo { .. })));
    }

    #[test]
    fn registry_dispatches_by_name() {
        let mut registry = StrategyRegistry::with_defaults().expect("defaults build");
        assert_eq!(registry.names().count(), PARAMETERLESS.len());

        let offer = RoundOffer::new(8.5).with_hotel_value(3.0);
        let ctx = InformationContext::new(&[], &offer);
        let cfg = StrategyConfig::new();

        let d = registry.decide(names::USER_PICKY, &ctx, &cfg).expect("decides");
        assert_eq!(d, Decision::Stop);
        let d = registry.decide(names::USER_SLOPPY, &ctx, &cfg).expect("decides");
        assert_eq!(d, Decision::Continue);
        let d = registry.decide(names::CORRECT_ACTION, &ctx, &cfg).expect("decides");
        assert_eq!(d, Decision::Stop);

        assert!(matches!(
            registry.decide("nobody", &ctx, &cfg),
            Err(StrategyError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn registry_refuses_duplicates_and_accepts_factories() {
        let mut registry = StrategyRegistry::with_defaults().expect("defaults build");
        assert!(matches!(
            registry.register(names::USER_PICKY, Box::new(BotMessageThreshold::picky())),
            Err(StrategyError::AlreadyRegistered(_))
        ));

        let window = StrategyKind::HistoryAndReviewQuality {
            history_window: 0,
            quality_threshold: 6.0,
        };
        registry
            .register_kind("window_0_q6", &window)
            .expect("fresh name");
        assert!(registry.contains("window_0_q6"));

        let offer = RoundOffer::new(6.0);
        let ctx = InformationContext::new(&[], &offer);
        assert_eq!(
            registry.decide("window_0_q6", &ctx, &StrategyConfig::new()).ok(),
            Some(Decision::Continue)
        );
    }

    #[test]
    fn evaluation_errors_pass_through() {
        let mut registry = StrategyRegistry::with_defaults().expect("defaults build");
        let offer = RoundOffer::new(9.0);
        let ctx = InformationContext::new(&[], &offer);
        assert!(matches!(
            registry.decide(names::CORRECT_ACTION, &ctx, &StrategyConfig::new()),
            Err(StrategyError::Eval(trustlern_core::EvalError::MissingHotelValue))
        ));
    }
}
