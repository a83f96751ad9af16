//! Data structures describing a single interaction round.
//!
//! A [`RoundRecord`] is what remains of a round once the user has decided:
//! the peer reviews of the offered hotel, the score the bot declared and the
//! user's decision. A [`RoundOffer`] carries the signals of the round that is
//! currently being decided.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{EvalError, Result};
use crate::Decision;

/// Score at or above which a hotel counts as good.
pub const GOOD_SCORE: f64 = 8.0;

/// Immutable snapshot of one completed round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundRecord {
    /// Peer review scores of the offered hotel, in the order they were shown.
    pub reviews: Vec<f64>,
    /// The bot's declared assessment (0-10).
    pub bot_action: f64,
    /// What the user decided in this round.
    pub user_decision: Decision,
}

impl RoundRecord {
    pub fn new(reviews: Vec<f64>, bot_action: f64, user_decision: Decision) -> Self {
        Self {
            reviews,
            bot_action,
            user_decision,
        }
    }

    /// Mean of the review scores.
    ///
    /// `round` is only used to label the error when `reviews` is empty.
    pub fn mean_review(&self, round: usize) -> Result<f64> {
        if self.reviews.is_empty() {
            return Err(EvalError::EmptyReviews { round });
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.reviews.len() as f64;
        Ok(self.reviews.iter().sum::<f64>() / count)
    }
}

/// Signals of the round currently being decided.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoundOffer {
    /// The bot's score for the current hotel.
    pub bot_message: f64,
    /// Ground-truth quality. Only the oracle strategy reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_value: Option<f64>,
    /// Key into an external probability table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<i64>,
    /// Topic name to numeric or boolean feature value.
    #[serde(default)]
    pub review_features: BTreeMap<String, Value>,
}

impl RoundOffer {
    pub fn new(bot_message: f64) -> Self {
        Self {
            bot_message,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_hotel_value(mut self, hotel_value: f64) -> Self {
        self.hotel_value = Some(hotel_value);
        self
    }

    #[must_use]
    pub fn with_review_id(mut self, review_id: i64) -> Self {
        self.review_id = Some(review_id);
        self
    }

    #[must_use]
    pub fn with_feature(mut self, topic: impl Into<String>, value: impl Into<Value>) -> Self {
        self.review_features.insert(topic.into(), value.into());
        self
    }
}

/// Input of a single decision call. Borrowed, never stored.
#[derive(Debug, Clone, Copy)]
pub struct InformationContext<'a> {
    /// Completed rounds, oldest first.
    pub previous_rounds: &'a [RoundRecord],
    pub offer: &'a RoundOffer,
}

impl<'a> InformationContext<'a> {
    pub fn new(previous_rounds: &'a [RoundRecord], offer: &'a RoundOffer) -> Self {
        Self {
            previous_rounds,
            offer,
        }
    }

    pub fn rounds_played(&self) -> usize {
        self.previous_rounds.len()
    }

    pub fn bot_message(&self) -> f64 {
        self.offer.bot_message
    }

    pub fn last_round(&self) -> Option<&'a RoundRecord> {
        self.previous_rounds.last()
    }

    pub fn hotel_value(&self) -> Result<f64> {
        self.offer.hotel_value.ok_or(EvalError::MissingHotelValue)
    }

    pub fn review_id(&self) -> Result<i64> {
        self.offer.review_id.ok_or(EvalError::MissingReviewId)
    }

    pub fn feature(&self, topic: &str) -> Result<&'a Value> {
        self.offer
            .review_features
            .get(topic)
            .ok_or_else(|| EvalError::MissingFeature(topic.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_record_roundtrip() {
        let record = RoundRecord::new(vec![7.0, 9.0], 9.0, Decision::Continue);

        let serialized = serde_json::to_string(&record).expect("Serialization failed");
        assert!(serialized.contains("\"user_decision\":1"));

        let deserialized: RoundRecord =
            serde_json::from_str(&serialized).expect("Deserialization failed");
        assert_eq!(record, deserialized);
    }

    #[test]
    fn round_record_rejects_non_binary_decision() {
        let res = serde_json::from_value::<RoundRecord>(json!({
            "reviews": [8.0],
            "bot_action": 8.0,
            "user_decision": 2
        }));
        assert!(res.is_err());
    }

    #[test]
    fn mean_review_of_empty_reviews_fails() {
        let record = RoundRecord::new(vec![], 9.0, Decision::Continue);
        assert_eq!(
            record.mean_review(4),
            Err(EvalError::EmptyReviews { round: 4 })
        );
    }

    #[test]
    fn round_offer_from_json_fixture() {
        let offer: RoundOffer = serde_json::from_value(json!({
            "bot_message": 8.5,
            "review_id": 17,
            "review_features": {"wifi": true, "noise": 0}
        }))
        .expect("Deserialization failed");

        assert!((offer.bot_message - 8.5).abs() < f64::EPSILON);
        assert_eq!(offer.review_id, Some(17));
        assert_eq!(offer.hotel_value, None);
        assert_eq!(offer.review_features.len(), 2);
    }

    #[test]
    fn context_accessors_report_missing_fields() {
        let offer = RoundOffer::new(7.0).with_feature("wifi", true);
        let ctx = InformationContext::new(&[], &offer);

        assert_eq!(ctx.hotel_value(), Err(EvalError::MissingHotelValue));
        assert_eq!(ctx.review_id(), Err(EvalError::MissingReviewId));
        assert_eq!(ctx.feature("wifi").expect("present"), &json!(true));
        assert_eq!(
            ctx.feature("pool"),
            Err(EvalError::MissingFeature("pool".into()))
        );
        assert!(ctx.last_round().is_none());
    }
}
