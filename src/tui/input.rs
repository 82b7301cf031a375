//! Keyboard mapping and focus order.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator;

/// Focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::EnumIter, strum::Display)]
pub enum Focus {
    /// The multiple selector.
    #[default]
    #[strum(to_string = "multiple selector")]
    Multiple,
    /// The single selector.
    #[strum(to_string = "single selector")]
    Single,
    /// The Check button.
    #[strum(to_string = "Check")]
    Check,
    /// The Next Round button.
    #[strum(to_string = "Next Round")]
    NextRound,
    /// The New Game button.
    #[strum(to_string = "New Game")]
    NewGame,
}

impl Focus {
    fn position(self) -> usize {
        Self::iter().position(|f| f == self).unwrap_or(0)
    }

    /// The control after this one, wrapping.
    pub fn next(self) -> Self {
        let count = Self::iter().count();
        Self::iter()
            .nth((self.position() + 1) % count)
            .unwrap_or_default()
    }

    /// The control before this one, wrapping.
    pub fn previous(self) -> Self {
        let count = Self::iter().count();
        Self::iter()
            .nth((self.position() + count - 1) % count)
            .unwrap_or_default()
    }
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move focus forward.
    FocusNext,
    /// Move focus backward.
    FocusPrevious,
    /// Press the focused control.
    Activate,
    /// Move the dropdown highlight up.
    HighlightUp,
    /// Move the dropdown highlight down.
    HighlightDown,
    /// Clear the focused selector.
    Clear,
    /// Submit the answer.
    Check,
    /// Go to the next round.
    NextRound,
    /// Start a new game.
    NewGame,
    /// Leave the app.
    Quit,
    /// Key has no binding.
    Nothing,
}

/// Maps a key press to an [`Action`].
pub fn action_for(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrevious,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Activate,
        KeyCode::Up => Action::HighlightUp,
        KeyCode::Down => Action::HighlightDown,
        KeyCode::Backspace | KeyCode::Delete => Action::Clear,
        KeyCode::Char('c') | KeyCode::Char('C') => Action::Check,
        KeyCode::Char('n') | KeyCode::Char('N') => Action::NextRound,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::NewGame,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps_both_ways() {
        assert_eq!(Focus::Multiple.next(), Focus::Single);
        assert_eq!(Focus::NewGame.next(), Focus::Multiple);
        assert_eq!(Focus::Multiple.previous(), Focus::NewGame);
    }

    #[test]
    fn test_key_bindings() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(action_for(press(KeyCode::Tab)), Action::FocusNext);
        assert_eq!(action_for(press(KeyCode::Char('c'))), Action::Check);
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(action_for(press(KeyCode::F(5))), Action::Nothing);
    }
}
