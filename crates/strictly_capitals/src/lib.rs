//! Pure guess-the-capital game logic.
//!
//! # Architecture
//!
//! - **Facts**: [`CapitalFact`] pairs held in a validated [`Dataset`]
//! - **Choices**: a shuffled [`ChoiceGroup`] per round
//! - **Selection**: one tagged [`Selection`] value, fed by two
//!   [`ChoiceSelector`] widgets (single and multiple)
//! - **Rounds**: [`RoundController`] owns questions, scoring, and game over
//! - **Invariants**: checked after every transition in debug builds
//!
//! # Example
//!
//! ```
//! use strictly_capitals::{Dataset, RoundController, RuleSet, Selection, SubmitOutcome};
//!
//! let mut game = RoundController::seeded(Dataset::builtin(), RuleSet::default(), 7)?;
//! let answer = game.round().asked().clone();
//! game.select(Selection::Single(answer));
//! assert!(matches!(game.submit_answer(), SubmitOutcome::Scored(_)));
//! assert_eq!(*game.game().score(), 100);
//! # Ok::<(), strictly_capitals::SetupError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builtin;
mod choice;
mod controller;
mod error;
mod fact;
pub mod invariants;
mod rules;
mod scoring;
mod selection;
mod selector;

pub use choice::ChoiceGroup;
pub use controller::{
    GAME_OVER_MESSAGE, GameState, Phase, RoundController, RoundResult, RoundState, SubmitOutcome,
};
pub use error::SetupError;
pub use fact::{CapitalFact, Dataset};
pub use rules::{AdvancePolicy, RuleSet};
pub use scoring::{
    Advisory, FIXED_MULTI_POINTS, FIXED_MULTI_SIZE, GRADUATED_MULTI_POINTS, SINGLE_POINTS,
    ScoringPolicy,
};
pub use selection::{SelectMode, Selection};
pub use selector::ChoiceSelector;
