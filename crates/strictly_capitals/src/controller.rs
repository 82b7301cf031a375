//! Round controller: the question, answer, and score lifecycle.
//!
//! ```text
//! new() ─► Active(1) ─submit─► Locked ─next_round─► Active(2) ─► … ─► GameOver
//!                      └─(auto advance)──────────────┘                 │
//!                                      reset_game() ◄──────────────────┘
//! ```

use derive_getters::Getters;
use derive_new::new;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    Advisory, AdvancePolicy, CapitalFact, ChoiceGroup, Dataset, RuleSet, Selection, SetupError,
};

/// Message shown once the last round is scored.
pub const GAME_OVER_MESSAGE: &str = "Game Over!";

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// Accepting selections and submissions.
    Active,
    /// Answer revealed; waiting for the next round.
    Locked,
    /// All rounds played; only a reset leaves this phase.
    GameOver,
}

/// Points earned in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct RoundResult {
    /// Round number, starting at 1.
    round: u32,
    /// Points earned.
    score: u32,
}

/// Running totals for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameState {
    /// Sum of all round scores.
    pub(crate) score: u32,
    /// Current round number.
    pub(crate) round: u32,
    /// One entry per scored round, in order.
    pub(crate) results: Vec<RoundResult>,
    /// Lifecycle phase.
    pub(crate) phase: Phase,
}

impl GameState {
    /// A fresh game at round 1.
    pub fn new() -> Self {
        Self {
            score: 0,
            round: 1,
            results: Vec::new(),
            phase: Phase::Active,
        }
    }

    /// Returns true once all rounds are played.
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// The question on screen and the answer being assembled for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RoundState {
    /// Fact whose capital is asked for.
    pub(crate) asked: CapitalFact,
    /// Capitals on offer.
    pub(crate) choice_group: ChoiceGroup,
    /// The user's current answer.
    pub(crate) selection: Selection,
    /// Whether the correct answer is shown.
    pub(crate) revealed: bool,
}

/// Result of [`RoundController::submit_answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The round is locked or the game is over; nothing happened.
    Ignored,
    /// The selection could not be submitted; state is unchanged.
    Rejected(Advisory),
    /// The round was scored.
    Scored(RoundResult),
}

/// Drives rounds: picks questions, accepts selections, scores answers.
///
/// All transitions are synchronous and run to completion.
#[derive(Debug)]
pub struct RoundController<R = StdRng> {
    pub(crate) dataset: Dataset,
    pub(crate) rules: RuleSet,
    pub(crate) rng: R,
    pub(crate) game: GameState,
    pub(crate) round: RoundState,
    pub(crate) alert: Option<Advisory>,
}

impl RoundController<StdRng> {
    /// Creates a controller seeded from the operating system.
    #[instrument(skip(dataset), fields(facts = dataset.len()))]
    pub fn new(dataset: Dataset, rules: RuleSet) -> Result<Self, SetupError> {
        Self::with_rng(dataset, rules, StdRng::from_os_rng())
    }

    /// Creates a controller with a reproducible question sequence.
    #[instrument(skip(dataset), fields(facts = dataset.len()))]
    pub fn seeded(dataset: Dataset, rules: RuleSet, seed: u64) -> Result<Self, SetupError> {
        Self::with_rng(dataset, rules, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RoundController<R> {
    /// Creates a controller and starts round 1.
    ///
    /// Fails if the rules are unplayable or the dataset is too small for a
    /// full choice group.
    #[instrument(skip(dataset, rng), fields(facts = dataset.len()))]
    pub fn with_rng(dataset: Dataset, rules: RuleSet, mut rng: R) -> Result<Self, SetupError> {
        rules.validate()?;
        dataset.ensure_choices(rules.choice_count)?;

        let round = Self::generate_round(&dataset, &rules, &mut rng)?;
        info!(max_rounds = rules.max_rounds, "Round controller ready");

        let controller = Self {
            dataset,
            rules,
            rng,
            game: GameState::new(),
            round,
            alert: None,
        };
        controller.check_invariants();
        Ok(controller)
    }

    fn generate_round(
        dataset: &Dataset,
        rules: &RuleSet,
        rng: &mut R,
    ) -> Result<RoundState, SetupError> {
        let asked = dataset
            .facts()
            .choose(rng)
            .cloned()
            .ok_or_else(|| SetupError::new("dataset contains no facts"))?;
        let choice_group = ChoiceGroup::generate(dataset, &asked, rules.choice_count, rng);

        Ok(RoundState {
            asked,
            choice_group,
            selection: Selection::None,
            revealed: false,
        })
    }

    /// Asks a new question and clears the selection, reveal, and alert.
    ///
    /// Does nothing once the game is over.
    #[instrument(skip(self), fields(round = self.game.round))]
    pub fn start_new_round(&mut self) {
        if self.game.is_game_over() {
            debug!("Game over, not starting a new round");
            return;
        }

        // Construction proved the dataset non-empty and large enough.
        match Self::generate_round(&self.dataset, &self.rules, &mut self.rng) {
            Ok(round) => self.round = round,
            Err(e) => {
                tracing::error!(error = %e, "Could not generate round");
                return;
            }
        }
        self.game.phase = Phase::Active;
        self.alert = None;

        info!(country = %self.round.asked.country(), "New round started");
        self.check_invariants();
    }

    /// Applies a selection change reported by a selector.
    ///
    /// Returns false, leaving the selection untouched, unless the round is
    /// active and the selection only uses offered capitals within the cap.
    #[instrument(skip(self))]
    pub fn select(&mut self, selection: Selection) -> bool {
        if self.game.phase != Phase::Active {
            debug!(phase = %self.game.phase, "Selection ignored");
            return false;
        }

        let group = &self.round.choice_group;
        let offered = selection
            .facts()
            .iter()
            .all(|f| group.occurrences(f.capital()) == 1 && selection.count_capital(f.capital()) == 1);
        let within_cap = selection.len() <= self.rules.multi_cap.max(1);
        if !offered || !within_cap {
            debug!(offered, within_cap, "Selection rejected");
            return false;
        }

        self.round.selection = selection;
        true
    }

    /// Scores the current selection and advances the game.
    #[instrument(skip(self), fields(round = self.game.round))]
    pub fn submit_answer(&mut self) -> SubmitOutcome {
        if self.game.phase != Phase::Active {
            debug!(phase = %self.game.phase, "Submission ignored");
            return SubmitOutcome::Ignored;
        }

        if let Err(advisory) = self
            .rules
            .scoring
            .validate(&self.round.selection, self.rules.multi_cap)
        {
            debug!(%advisory, "Submission rejected");
            self.alert = Some(advisory.clone());
            return SubmitOutcome::Rejected(advisory);
        }

        let points = self
            .rules
            .scoring
            .score(&self.round.selection, self.round.asked.capital());
        let result = RoundResult::new(self.game.round, points);

        self.game.score += points;
        self.game.results.push(result);
        self.round.revealed = true;
        self.alert = None;
        info!(points, total = self.game.score, "Round scored");

        if self.game.round >= self.rules.max_rounds {
            info!(final_score = self.game.score, "Game over");
            self.game.phase = Phase::GameOver;
        } else {
            self.game.round += 1;
            match self.rules.advance {
                AdvancePolicy::Manual => self.game.phase = Phase::Locked,
                AdvancePolicy::Auto => self.start_new_round(),
            }
        }

        self.check_invariants();
        SubmitOutcome::Scored(result)
    }

    /// Leaves a locked round for the next question.
    ///
    /// Returns false unless the round was locked.
    #[instrument(skip(self))]
    pub fn next_round(&mut self) -> bool {
        if self.game.phase != Phase::Locked {
            return false;
        }
        self.start_new_round();
        true
    }

    /// Starts over: score 0, round 1, no results, fresh question.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        info!("Resetting game");
        self.game = GameState::new();
        self.start_new_round();
    }

    /// Game totals.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Current question and answer.
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Active rules.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The dataset questions come from.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Advisory from the last rejected submission, until cleared.
    pub fn alert(&self) -> Option<&Advisory> {
        self.alert.as_ref()
    }

    /// Candidates for the selectors, capitals paired with countries.
    pub fn candidates(&self) -> Vec<CapitalFact> {
        self.round.choice_group.candidates(&self.dataset)
    }

    /// Round number for display, never above the maximum.
    pub fn displayed_round(&self) -> u32 {
        self.game.round.min(self.rules.max_rounds)
    }

    /// The correct capital, once revealed.
    pub fn revealed_answer(&self) -> Option<&str> {
        self.round
            .revealed
            .then(|| self.round.asked.capital().as_str())
    }

    /// Returns true once all rounds are played.
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Game-over banner, when the game has ended.
    pub fn game_over_message(&self) -> Option<&'static str> {
        self.is_game_over().then_some(GAME_OVER_MESSAGE)
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        use crate::invariants::{InvariantSet, QuizInvariants};

        if let Err(violations) = QuizInvariants::check_all(self) {
            for v in &violations {
                tracing::warn!(invariant = %v.description, "Invariant violated");
            }
            debug_assert!(violations.is_empty(), "Quiz invariants violated");
        }
    }

    #[cfg(not(debug_assertions))]
    fn check_invariants(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScoringPolicy, SelectMode};

    fn six_countries() -> Dataset {
        Dataset::new(vec![
            CapitalFact::new("France", "Paris"),
            CapitalFact::new("Spain", "Madrid"),
            CapitalFact::new("Italy", "Rome"),
            CapitalFact::new("Germany", "Berlin"),
            CapitalFact::new("Austria", "Vienna"),
            CapitalFact::new("Portugal", "Lisbon"),
        ])
        .unwrap()
    }

    fn controller(rules: RuleSet) -> RoundController {
        RoundController::seeded(six_countries(), rules, 11).unwrap()
    }

    fn answer_correctly(c: &mut RoundController) -> SubmitOutcome {
        let asked = c.round().asked().clone();
        assert!(c.select(Selection::Single(asked)));
        c.submit_answer()
    }

    #[test]
    fn test_initial_state() {
        let c = controller(RuleSet::default());
        assert_eq!(*c.game().score(), 0);
        assert_eq!(*c.game().round(), 1);
        assert!(c.game().results().is_empty());
        assert_eq!(*c.game().phase(), Phase::Active);
        assert_eq!(c.round().choice_group().len(), 5);
        assert_eq!(c.revealed_answer(), None);
    }

    #[test]
    fn test_correct_single_scores_hundred() {
        let mut c = controller(RuleSet::default());
        let outcome = answer_correctly(&mut c);
        assert_eq!(outcome, SubmitOutcome::Scored(RoundResult::new(1, 100)));
        assert_eq!(*c.game().score(), 100);
        assert_eq!(*c.game().round(), 2);
        assert_eq!(*c.game().phase(), Phase::Locked);
        assert_eq!(c.revealed_answer(), Some(c.round().asked().capital().as_str()));
    }

    #[test]
    fn test_empty_submission_changes_nothing() {
        let mut c = controller(RuleSet::default());
        let before = c.game().clone();
        let outcome = c.submit_answer();
        assert_eq!(outcome, SubmitOutcome::Rejected(Advisory::NoSelection));
        assert_eq!(c.game(), &before);
        assert_eq!(c.alert(), Some(&Advisory::NoSelection));
    }

    #[test]
    fn test_locked_round_ignores_selection_and_submit() {
        let mut c = controller(RuleSet::default());
        answer_correctly(&mut c);
        assert!(!c.select(Selection::None));
        assert_eq!(c.submit_answer(), SubmitOutcome::Ignored);
        assert_eq!(*c.game().score(), 100);
    }

    #[test]
    fn test_next_round_only_from_locked() {
        let mut c = controller(RuleSet::default());
        assert!(!c.next_round());
        answer_correctly(&mut c);
        assert!(c.next_round());
        assert_eq!(*c.game().phase(), Phase::Active);
        assert_eq!(*c.round().selection(), Selection::None);
        assert!(!*c.round().revealed());
    }

    #[test]
    fn test_game_over_after_max_rounds() {
        let mut c = controller(RuleSet::default());
        for round in 1..=5 {
            assert_eq!(c.displayed_round(), round);
            answer_correctly(&mut c);
            c.next_round();
        }
        assert!(c.is_game_over());
        assert_eq!(*c.game().round(), 5);
        assert_eq!(*c.game().score(), 500);
        assert_eq!(c.game().results().len(), 5);
        assert_eq!(c.game_over_message(), Some("Game Over!"));

        // Terminal until reset.
        assert!(!c.next_round());
        assert_eq!(c.submit_answer(), SubmitOutcome::Ignored);
        let asked = c.round().asked().clone();
        c.start_new_round();
        assert_eq!(c.round().asked(), &asked);
    }

    #[test]
    fn test_auto_advance_starts_next_round() {
        let rules = RuleSet {
            advance: AdvancePolicy::Auto,
            ..RuleSet::default()
        };
        let mut c = controller(rules);
        answer_correctly(&mut c);
        assert_eq!(*c.game().phase(), Phase::Active);
        assert_eq!(*c.game().round(), 2);
        assert_eq!(*c.round().selection(), Selection::None);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut c = controller(RuleSet::default());
        answer_correctly(&mut c);
        c.reset_game();
        assert_eq!(*c.game().score(), 0);
        assert_eq!(*c.game().round(), 1);
        assert!(c.game().results().is_empty());
        assert_eq!(*c.game().phase(), Phase::Active);
        assert_eq!(c.round().choice_group().occurrences(c.round().asked().capital()), 1);
    }

    #[test]
    fn test_multiple_pair_under_each_policy() {
        for (policy, expected) in [(ScoringPolicy::Fixed, 70), (ScoringPolicy::Graduated, 50)] {
            let mut c = controller(RuleSet {
                scoring: policy,
                ..RuleSet::default()
            });
            let answer = c.round().asked().capital().clone();
            let distractor = c
                .candidates()
                .into_iter()
                .find(|f| !f.has_capital(&answer))
                .unwrap();
            let pair = Selection::Multiple(vec![c.round().asked().clone(), distractor]);
            assert_eq!(pair.mode(), Some(SelectMode::Multiple));
            c.select(pair);
            assert_eq!(
                c.submit_answer(),
                SubmitOutcome::Scored(RoundResult::new(1, expected))
            );
        }
    }

    #[test]
    fn test_selection_outside_group_rejected() {
        let mut c = controller(RuleSet::default());
        let stranger = Selection::Single(CapitalFact::new("Atlantis", "Poseidonia"));
        assert!(!c.select(stranger));
        assert_eq!(*c.round().selection(), Selection::None);
    }

    #[test]
    fn test_too_small_dataset_rejected() {
        let dataset = Dataset::new(vec![
            CapitalFact::new("France", "Paris"),
            CapitalFact::new("Spain", "Madrid"),
        ])
        .unwrap();
        let err = RoundController::seeded(dataset, RuleSet::default(), 0).unwrap_err();
        assert!(err.message.contains("distinct capitals"));
    }

    #[test]
    fn test_graduated_cap_beyond_points_table_rejected() {
        let rules = RuleSet {
            scoring: ScoringPolicy::Graduated,
            multi_cap: 5,
            ..RuleSet::default()
        };
        let err = RoundController::seeded(six_countries(), rules, 11).unwrap_err();
        assert!(err.message.contains("graduated"));
    }
}
