//! Answer validation and round scoring.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::Selection;

/// Points for a correct single selection.
pub const SINGLE_POINTS: u32 = 100;

/// Points for a correct pair under [`ScoringPolicy::Fixed`].
pub const FIXED_MULTI_POINTS: u32 = 70;

/// Selection size required under [`ScoringPolicy::Fixed`].
pub const FIXED_MULTI_SIZE: usize = 2;

/// Points by selection size (1, 2, 3) under [`ScoringPolicy::Graduated`].
pub const GRADUATED_MULTI_POINTS: [u32; 3] = [100, 50, 20];

/// Transient message explaining why a submission was not accepted.
///
/// Advisories never change game state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Advisory {
    /// Neither selector holds a choice.
    #[display("Please select a method of selection.")]
    NoSelection,

    /// The multiple selection must have exactly this many capitals.
    #[display("Please select exactly {} capitals for multiple selection.", _0)]
    ExactCount(usize),

    /// The multiple selection must have between one and this many capitals.
    #[display("Please select between 1 and {} capitals for multiple selection.", _0)]
    CountRange(usize),
}

/// How multiple selections are validated and scored.
///
/// Single selections always score [`SINGLE_POINTS`] when correct.
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
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScoringPolicy {
    /// Exactly two capitals; [`FIXED_MULTI_POINTS`] if one is the answer.
    #[default]
    Fixed,
    /// One to three capitals; points shrink as the selection grows.
    Graduated,
}

impl ScoringPolicy {
    /// Checks that a selection may be submitted.
    #[instrument(skip(selection))]
    pub fn validate(self, selection: &Selection, cap: usize) -> Result<(), Advisory> {
        match selection {
            Selection::None => Err(Advisory::NoSelection),
            Selection::Single(_) => Ok(()),
            Selection::Multiple(facts) => match self {
                Self::Fixed if facts.len() != FIXED_MULTI_SIZE => {
                    Err(Advisory::ExactCount(FIXED_MULTI_SIZE))
                }
                Self::Graduated if facts.is_empty() || facts.len() > cap => {
                    Err(Advisory::CountRange(cap))
                }
                _ => Ok(()),
            },
        }
    }

    /// Points earned by a (validated) selection against the answer.
    #[instrument(skip(selection))]
    pub fn score(self, selection: &Selection, answer: &str) -> u32 {
        let points = match selection {
            Selection::None => 0,
            Selection::Single(fact) if fact.has_capital(answer) => SINGLE_POINTS,
            Selection::Single(_) => 0,
            Selection::Multiple(facts) => {
                if selection.count_capital(answer) != 1 {
                    0
                } else {
                    match self {
                        Self::Fixed if facts.len() == FIXED_MULTI_SIZE => FIXED_MULTI_POINTS,
                        Self::Fixed => 0,
                        Self::Graduated => facts
                            .len()
                            .checked_sub(1)
                            .and_then(|i| GRADUATED_MULTI_POINTS.get(i))
                            .copied()
                            .unwrap_or(0),
                    }
                }
            }
        };
        debug!(points, "Selection scored");
        points
    }

    /// Points label shown beside the multiple selector.
    pub fn multiple_label(self) -> String {
        match self {
            Self::Fixed => format!("({} points)", FIXED_MULTI_POINTS),
            Self::Graduated => {
                let [one, two, three] = GRADUATED_MULTI_POINTS;
                format!("({}/{}/{} points)", one, two, three)
            }
        }
    }

    /// Points label shown beside the single selector.
    pub fn single_label(self) -> String {
        format!("({} points)", SINGLE_POINTS)
    }
}
