//! Ruleset: round count, choice sizes, scoring and advance policies.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{FIXED_MULTI_SIZE, GRADUATED_MULTI_POINTS, ScoringPolicy, SetupError};

/// What happens after an answer is scored.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AdvancePolicy {
    /// Reveal the answer and wait for "Next Round".
    #[default]
    Manual,
    /// Start the next round straight away.
    Auto,
}

/// Tunable game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Rounds per game.
    pub max_rounds: u32,
    /// Capitals offered per round, answer included.
    pub choice_count: usize,
    /// Most capitals the multiple selector holds.
    pub multi_cap: usize,
    /// Multiple-selection scoring.
    pub scoring: ScoringPolicy,
    /// Round advance behavior.
    pub advance: AdvancePolicy,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            choice_count: 5,
            multi_cap: 3,
            scoring: ScoringPolicy::Fixed,
            advance: AdvancePolicy::Manual,
        }
    }
}

impl RuleSet {
    /// Rejects rules under which a game cannot be played.
    #[instrument]
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.max_rounds == 0 {
            return Err(SetupError::new("max_rounds must be at least 1"));
        }
        if self.choice_count < 2 {
            return Err(SetupError::new("choice_count must be at least 2"));
        }
        if self.multi_cap == 0 || self.multi_cap > self.choice_count {
            return Err(SetupError::new(format!(
                "multi_cap must be between 1 and choice_count ({})",
                self.choice_count
            )));
        }
        if self.scoring == ScoringPolicy::Fixed && self.multi_cap < FIXED_MULTI_SIZE {
            return Err(SetupError::new(format!(
                "fixed scoring needs multi_cap of at least {}",
                FIXED_MULTI_SIZE
            )));
        }
        if self.scoring == ScoringPolicy::Graduated
            && self.multi_cap > GRADUATED_MULTI_POINTS.len()
        {
            return Err(SetupError::new(format!(
                "graduated scoring allows multi_cap of at most {}",
                GRADUATED_MULTI_POINTS.len()
            )));
        }
        Ok(())
    }
}
