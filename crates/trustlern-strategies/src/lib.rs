#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Decision strategies for the simulated hotel-trust game.
//!
//! Each strategy implements [`Strategy`](trustlern_core::Strategy): given the
//! history of completed rounds and the bot's message for the current hotel,
//! it decides whether the user goes (1) or not (0). Apart from the random
//! source of [`RandomAction`] and the stochastic
//! [`ProbabilityTableStrategy`], no strategy keeps state between calls.
//!
//! Strategies are looked up by their registry name through
//! [`StrategyKind`] or [`StrategyRegistry`].

pub mod error;
pub mod registry;
pub mod rules;
pub mod table;
mod telemetry;
pub mod threshold;
pub mod topic;
pub mod window;

pub use error::{Result, StrategyError};
pub use registry::{StrategyKind, StrategyRegistry, PARAMETERLESS};
pub use rules::{
    BotMessageThreshold, CorrectAction, HardTitForTat, PickyShortTitForTat, RandomAction,
    ShortTitForTat,
};
pub use table::{ProbabilityTable, ProbabilityTableStrategy, DEFAULT_TABLE_PATH};
pub use threshold::{
    aggressive_allowance, conservative_threshold, AdaptiveLearning, AggressivePursuit,
    Conservative,
};
pub use topic::TopicBased;
pub use window::HistoryWindow;

/// Registry names, as used in experiment configuration.
pub mod names {
    pub const CORRECT_ACTION: &str = "correct_action";
    pub const RANDOM_ACTION: &str = "random_action";
    pub const USER_RATIONAL_ACTION: &str = "user_rational_action";
    pub const USER_PICKY: &str = "user_picky";
    pub const USER_SLOPPY: &str = "user_sloppy";
    pub const USER_SHORT_T4T: &str = "user_short_t4t";
    pub const USER_PICKY_SHORT_T4T: &str = "user_picky_short_t4t";
    pub const USER_HARD_T4T: &str = "user_hard_t4t";
    pub const CONSERVATIVE_STRATEGY: &str = "conservative_strategy";
    pub const AGGRESSIVE_PURSUIT: &str = "aggressive_pursuit";
    pub const ADAPTIVE_LEARNING: &str = "adaptive_learning";
    pub const HISTORY_AND_REVIEW_QUALITY: &str = "history_and_review_quality";
    pub const TOPIC_BASED: &str = "topic_based";
    pub const LLM_BASED: &str = "LLM_based";
}
