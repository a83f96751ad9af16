//! Personalised scoring over review topics.
//!
//! The user cares about some topics more than others. A topic at rank `r`
//! (0-based) that is present in the current review moves the bot's score by
//! `2 / (r + 1)`, up for positive topics and down for negative ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use trustlern_core::{Decision, EvalError, InformationContext, Result, Strategy, StrategyConfig};

use crate::names;

const TOPIC_WEIGHT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicBased {
    /// Most important first.
    pub positive_topics: Vec<String>,
    /// Most important first.
    pub negative_topics: Vec<String>,
    pub quality_threshold: f64,
}

/// Truthiness of a feature value: booleans as is, numbers by their integer
/// part.
fn truthy(topic: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => n
            .as_f64()
            .map(|f| f.trunc() != 0.0)
            .ok_or_else(|| EvalError::InvalidFeature(topic.to_string())),
        _ => Err(EvalError::InvalidFeature(topic.to_string())),
    }
}

fn rank_weight(rank: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let r = rank as f64;
    TOPIC_WEIGHT / (r + 1.0)
}

impl TopicBased {
    pub fn new(
        positive_topics: Vec<String>,
        negative_topics: Vec<String>,
        quality_threshold: f64,
    ) -> Self {
        Self {
            positive_topics,
            negative_topics,
            quality_threshold,
        }
    }

    /// Bot message adjusted by the topics present in the current review.
    pub fn personal_score(&self, ctx: &InformationContext<'_>) -> Result<f64> {
        let mut score = ctx.bot_message();
        for (rank, topic) in self.positive_topics.iter().enumerate() {
            if truthy(topic, ctx.feature(topic)?)? {
                score += rank_weight(rank);
            }
        }
        for (rank, topic) in self.negative_topics.iter().enumerate() {
            if truthy(topic, ctx.feature(topic)?)? {
                score -= rank_weight(rank);
            }
        }
        Ok(score)
    }
}

impl Strategy for TopicBased {
    fn name(&self) -> &str {
        names::TOPIC_BASED
    }

    fn decide(&mut self, ctx: &InformationContext<'_>, _config: &StrategyConfig) -> Result<Decision> {
        Ok(Decision::from(
            self.personal_score(ctx)? >= self.quality_threshold,
        ))
    }
}
