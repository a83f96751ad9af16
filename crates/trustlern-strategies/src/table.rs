//! Strategy backed by a precomputed table of continuance probabilities.
//!
//! The table maps review ids to the probability that a user goes to the
//! hotel. It is produced elsewhere and only read here: loaded once when the
//! strategy is built and shared read-only afterwards.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use trustlern_core::{Decision, EvalError, InformationContext, Strategy, StrategyConfig};

use crate::error::{Result, StrategyError};
use crate::names;
use crate::telemetry;

/// Location of the table relative to the working directory.
pub const DEFAULT_TABLE_PATH: &str = "data/baseline_proba2go.txt";

/// Probability at or above which the deterministic mode goes.
pub const DETERMINISTIC_CUTOFF: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbabilityTable {
    entries: HashMap<i64, f64>,
}

impl ProbabilityTable {
    /// Reads a JSON object `{"<review id>": <probability>, ...}` from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StrategyError::TableIo {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        telemetry::table_loaded(&path.display().to_string(), table.len());
        Ok(table)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw: HashMap<String, f64> = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: HashMap<String, f64> = serde_json::from_str(s)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: HashMap<String, f64>) -> Result<Self> {
        let entries = raw
            .into_iter()
            .map(|(k, v)| {
                k.trim()
                    .parse::<i64>()
                    .map(|id| (id, v))
                    .map_err(|_| StrategyError::InvalidReviewId(k))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { entries })
    }

    pub fn get(&self, review_id: i64) -> Option<f64> {
        self.entries.get(&review_id).copied()
    }

    /// Probability for `review_id`, failing for ids the table does not know.
    pub fn probability(&self, review_id: i64) -> trustlern_core::Result<f64> {
        self.get(review_id).ok_or_else(|| {
            telemetry::warn(&format!("review id {review_id} missing from probability table"));
            EvalError::UnknownReviewId(review_id)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(i64, f64)> for ProbabilityTable {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for ProbabilityTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = HashMap::<String, f64>::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Deterministic,
    Stochastic(StdRng),
}

/// Decides from the table entry of the current review.
///
/// Deterministic mode goes iff the probability is at least
/// [`DETERMINISTIC_CUTOFF`]; stochastic mode goes iff a uniform draw from
/// `[0, 1)` does not exceed it.
#[derive(Debug, Clone)]
pub struct ProbabilityTableStrategy {
    table: Arc<ProbabilityTable>,
    mode: Mode,
}

impl ProbabilityTableStrategy {
    pub fn new(table: Arc<ProbabilityTable>, is_stochastic: bool) -> Self {
        if is_stochastic {
            Self::stochastic(table, StdRng::from_entropy())
        } else {
            Self::deterministic(table)
        }
    }

    pub fn deterministic(table: Arc<ProbabilityTable>) -> Self {
        Self {
            table,
            mode: Mode::Deterministic,
        }
    }

    pub fn stochastic(table: Arc<ProbabilityTable>, rng: StdRng) -> Self {
        Self {
            table,
            mode: Mode::Stochastic(rng),
        }
    }

    pub fn stochastic_seeded(table: Arc<ProbabilityTable>, seed: u64) -> Self {
        Self::stochastic(table, StdRng::seed_from_u64(seed))
    }

    /// Loads the table from `path`. Fails before any round is played if the
    /// file is missing or malformed.
    pub fn from_path(path: impl AsRef<Path>, is_stochastic: bool) -> Result<Self> {
        let table = ProbabilityTable::load(path)?;
        Ok(Self::new(Arc::new(table), is_stochastic))
    }

    /// Loads the table from [`DEFAULT_TABLE_PATH`].
    pub fn from_default_path(is_stochastic: bool) -> Result<Self> {
        Self::from_path(DEFAULT_TABLE_PATH, is_stochastic)
    }

    pub fn is_stochastic(&self) -> bool {
        matches!(self.mode, Mode::Stochastic(_))
    }

    pub fn table(&self) -> &Arc<ProbabilityTable> {
        &self.table
    }
}

impl Strategy for ProbabilityTableStrategy {
    fn name(&self) -> &str {
        names::LLM_BASED
    }

    fn decide(
        &mut self,
        ctx: &InformationContext<'_>,
        _config: &StrategyConfig,
    ) -> trustlern_core::Result<Decision> {
        let p = self.table.probability(ctx.review_id()?)?;
        let go = match &mut self.mode {
            Mode::Deterministic => p >= DETERMINISTIC_CUTOFF,
            Mode::Stochastic(rng) => rng.gen::<f64>() <= p,
        };
        Ok(Decision::from(go))
    }
}
