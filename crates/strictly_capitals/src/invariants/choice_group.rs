//! Choice group invariant: the answer appears exactly once.

use rand::Rng;
use tracing::{instrument, warn};

use super::Invariant;
use crate::RoundController;

/// The choice group has the configured size, holds the asked capital
/// exactly once, and repeats no capital.
pub struct ChoiceGroupInvariant;

impl<R: Rng> Invariant<RoundController<R>> for ChoiceGroupInvariant {
    #[instrument(skip(state))]
    fn holds(state: &RoundController<R>) -> bool {
        let group = &state.round.choice_group;
        let answer = state.round.asked.capital();

        let valid = group.len() == state.rules.choice_count
            && group.occurrences(answer) == 1
            && group.is_distinct();
        if !valid {
            warn!(size = group.len(), %answer, "Choice group invariant violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Choice group holds the answer exactly once among distinct capitals"
    }
}
