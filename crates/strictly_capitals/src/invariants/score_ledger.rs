//! Score ledger invariant: the total matches the recorded rounds.

use rand::Rng;
use tracing::{instrument, warn};

use super::Invariant;
use crate::{Phase, RoundController};

/// Score equals the sum of results, results are numbered 1, 2, … and
/// their count matches the phase.
///
/// While a round is open or locked, every earlier round has a result.
/// After game over, every round including the current one has one.
pub struct ScoreLedgerInvariant;

impl<R: Rng> Invariant<RoundController<R>> for ScoreLedgerInvariant {
    #[instrument(skip(state))]
    fn holds(state: &RoundController<R>) -> bool {
        let game = &state.game;
        let total: u32 = game.results.iter().map(|r| *r.score()).sum();
        let numbered = game
            .results
            .iter()
            .enumerate()
            .all(|(i, r)| *r.round() as usize == i + 1);
        let expected_len = match game.phase {
            Phase::GameOver => game.round as usize,
            Phase::Active | Phase::Locked => game.round.saturating_sub(1) as usize,
        };

        let valid = total == game.score && numbered && game.results.len() == expected_len;
        if !valid {
            warn!(
                total,
                score = game.score,
                results = game.results.len(),
                expected_len,
                "Score ledger invariant violated"
            );
        }
        valid
    }

    fn description() -> &'static str {
        "Score equals the sum of numbered round results"
    }
}
