//! Round bounds invariant.

use rand::Rng;

use super::Invariant;
use crate::RoundController;

/// Round number stays within `1..=max_rounds`.
pub struct RoundBoundsInvariant;

impl<R: Rng> Invariant<RoundController<R>> for RoundBoundsInvariant {
    fn holds(state: &RoundController<R>) -> bool {
        (1..=state.rules.max_rounds).contains(&state.game.round)
    }

    fn description() -> &'static str {
        "Round number within 1..=max_rounds"
    }
}
