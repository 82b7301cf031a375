//! Application state: the round controller plus its two selectors.

use crossterm::event::KeyEvent;
use derive_getters::Getters;
use strictly_capitals::{
    ChoiceGroup, ChoiceSelector, RoundController, SelectMode, Selection, SubmitOutcome,
};
use tracing::{debug, info, instrument};

use super::input::{Action, Focus, action_for};

/// Main application state.
#[derive(Debug, Getters)]
pub struct App {
    /// Game rules and state.
    controller: RoundController,
    /// Multiple-selection dropdown.
    multiple: ChoiceSelector,
    /// Single-selection dropdown.
    single: ChoiceSelector,
    /// Focused control.
    focus: Focus,
    /// Choice group the selectors were last filled from.
    shown_group: ChoiceGroup,
    /// Set once the user asks to leave.
    should_quit: bool,
}

impl App {
    /// Creates the app around a ready controller.
    #[instrument(skip(controller))]
    pub fn new(controller: RoundController) -> Self {
        let mut multiple = ChoiceSelector::multiple(controller.rules().multi_cap);
        let mut single = ChoiceSelector::single();
        let candidates = controller.candidates();
        multiple.set_candidates(candidates.clone());
        single.set_candidates(candidates);

        Self {
            shown_group: controller.round().choice_group().clone(),
            controller,
            multiple,
            single,
            focus: Focus::default(),
            should_quit: false,
        }
    }

    /// The selector for `mode`.
    pub fn selector(&self, mode: SelectMode) -> &ChoiceSelector {
        match mode {
            SelectMode::Single => &self.single,
            SelectMode::Multiple => &self.multiple,
        }
    }

    /// Whether the Next Round button is shown.
    pub fn next_round_visible(&self) -> bool {
        self.controller.revealed_answer().is_some() && !self.controller.is_game_over()
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = action_for(key);
        debug!(?action, focus = %self.focus, "Handling key");

        match action {
            Action::FocusNext => self.move_focus(self.focus.next()),
            Action::FocusPrevious => self.move_focus(self.focus.previous()),
            Action::Activate => self.activate(),
            Action::HighlightUp => {
                if let Some(selector) = self.focused_selector_mut() {
                    selector.highlight_previous();
                }
            }
            Action::HighlightDown => {
                if let Some(selector) = self.focused_selector_mut() {
                    if !*selector.is_open() {
                        selector.open();
                    }
                    selector.highlight_next();
                }
            }
            Action::Clear => self.clear_focused(),
            Action::Check => self.check(),
            Action::NextRound => self.next_round(),
            Action::NewGame => self.new_game(),
            Action::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
            Action::Nothing => {}
        }
    }

    fn focused_mode(&self) -> Option<SelectMode> {
        match self.focus {
            Focus::Multiple => Some(SelectMode::Multiple),
            Focus::Single => Some(SelectMode::Single),
            _ => None,
        }
    }

    fn focused_selector_mut(&mut self) -> Option<&mut ChoiceSelector> {
        match self.focused_mode()? {
            SelectMode::Single => Some(&mut self.single),
            SelectMode::Multiple => Some(&mut self.multiple),
        }
    }

    /// Moves focus, closing the selector that lost it.
    #[instrument(skip(self))]
    fn move_focus(&mut self, focus: Focus) {
        if let Some(selector) = self.focused_selector_mut() {
            selector.blur();
        }
        self.focus = focus;
    }

    #[instrument(skip(self))]
    fn activate(&mut self) {
        match self.focus {
            Focus::Multiple | Focus::Single => self.press_selector(),
            Focus::Check => self.check(),
            Focus::NextRound => self.next_round(),
            Focus::NewGame => self.new_game(),
        }
    }

    /// Opens or closes the focused dropdown, or picks its highlighted entry.
    fn press_selector(&mut self) {
        let current = self.controller.round().selection().clone();
        let Some(selector) = self.focused_selector_mut() else {
            return;
        };

        if *selector.is_open() && selector.highlighted().is_some() {
            if let Some(change) = selector.select_highlighted(&current) {
                self.report(change);
            }
        } else {
            selector.toggle_open();
        }
    }

    fn clear_focused(&mut self) {
        let Some(mode) = self.focused_mode() else {
            return;
        };
        if let Some(change) = self.selector(mode).clear(self.controller.round().selection()) {
            self.report(change);
        }
    }

    /// Passes a selector's change report to the controller.
    fn report(&mut self, change: Selection) {
        if !self.controller.select(change) {
            debug!("Controller declined selection change");
        }
    }

    #[instrument(skip(self))]
    fn check(&mut self) {
        match self.controller.submit_answer() {
            SubmitOutcome::Scored(result) => {
                info!(round = result.round(), score = result.score(), "Answer checked");
                self.multiple.close();
                self.single.close();
            }
            SubmitOutcome::Rejected(advisory) => debug!(%advisory, "Answer rejected"),
            SubmitOutcome::Ignored => debug!("Check ignored"),
        }
        self.sync_candidates();
    }

    #[instrument(skip(self))]
    fn next_round(&mut self) {
        if self.controller.next_round() {
            self.sync_candidates();
        }
    }

    #[instrument(skip(self))]
    fn new_game(&mut self) {
        self.controller.reset_game();
        self.move_focus(Focus::default());
        self.sync_candidates();
    }

    /// Refills both selectors when the question changed.
    fn sync_candidates(&mut self) {
        let group = self.controller.round().choice_group();
        if *group == self.shown_group {
            return;
        }
        self.shown_group = group.clone();
        let candidates = self.controller.candidates();
        self.multiple.set_candidates(candidates.clone());
        self.single.set_candidates(candidates);
        debug!("Selectors refilled for new round");
    }
}
