//! Selection invariant: chosen capitals come from the group, within the cap.

use rand::Rng;

use super::Invariant;
use crate::{RoundController, Selection};

/// A multiple selection holds at most `multi_cap` distinct capitals, and
/// every chosen capital is on offer this round.
pub struct SelectionCapInvariant;

impl<R: Rng> Invariant<RoundController<R>> for SelectionCapInvariant {
    fn holds(state: &RoundController<R>) -> bool {
        let selection = &state.round.selection;
        let group = &state.round.choice_group;

        let within_cap = match selection {
            Selection::Multiple(facts) => facts.len() <= state.rules.multi_cap,
            _ => true,
        };
        let offered = selection
            .facts()
            .iter()
            .all(|f| group.occurrences(f.capital()) == 1);
        let distinct = selection
            .facts()
            .iter()
            .all(|f| selection.count_capital(f.capital()) == 1);

        within_cap && offered && distinct
    }

    fn description() -> &'static str {
        "Selection within cap, distinct, and drawn from the choice group"
    }
}
