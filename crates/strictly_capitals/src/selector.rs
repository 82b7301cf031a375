//! Dropdown choice selector.
//!
//! The selector owns only presentational state (open/closed, keyboard
//! highlight, the candidate list). The selection itself lives with the
//! round controller: every operation that would change it returns the new
//! [`Selection`] as a change report and leaves applying it to the caller.

use derive_getters::Getters;
use tracing::{debug, instrument};

use crate::{CapitalFact, SelectMode, Selection};

/// A dropdown over a fixed candidate list in single or multiple mode.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ChoiceSelector {
    /// Single or multiple.
    mode: SelectMode,
    /// Most capitals a multiple selection may hold.
    cap: usize,
    /// Candidates in display order.
    candidates: Vec<CapitalFact>,
    /// Whether the option list is showing.
    is_open: bool,
    /// Keyboard-highlighted candidate index.
    highlighted: Option<usize>,
}

impl ChoiceSelector {
    /// Creates a single-mode selector.
    #[instrument]
    pub fn single() -> Self {
        Self::with_mode(SelectMode::Single, 1)
    }

    /// Creates a multiple-mode selector holding at most `cap` capitals.
    #[instrument]
    pub fn multiple(cap: usize) -> Self {
        Self::with_mode(SelectMode::Multiple, cap)
    }

    fn with_mode(mode: SelectMode, cap: usize) -> Self {
        Self {
            mode,
            cap,
            candidates: Vec::new(),
            is_open: false,
            highlighted: None,
        }
    }

    /// Replaces the candidate list (a new round), closing the dropdown.
    #[instrument(skip(self, candidates), fields(mode = %self.mode, count = candidates.len()))]
    pub fn set_candidates(&mut self, candidates: Vec<CapitalFact>) {
        self.candidates = candidates;
        self.close();
    }

    /// Shows the option list and drops any stale highlight.
    pub fn open(&mut self) {
        self.is_open = true;
        self.highlighted = None;
    }

    /// Hides the option list.
    pub fn close(&mut self) {
        self.is_open = false;
        self.highlighted = None;
    }

    /// Flips between open and closed.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn toggle_open(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Focus left the selector.
    pub fn blur(&mut self) {
        self.close();
    }

    /// Moves the highlight down, wrapping; starts at the top.
    pub fn highlight_next(&mut self) {
        let count = self.candidates.len();
        if count == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    /// Moves the highlight up, wrapping; starts at the bottom.
    pub fn highlight_previous(&mut self) {
        let count = self.candidates.len();
        if count == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        });
    }

    /// Computes the selection after choosing `candidate`.
    ///
    /// Single mode replaces unconditionally. Multiple mode toggles by
    /// capital and adds only while below the cap. Returns `None` when the
    /// request is ignored.
    #[instrument(skip(self, current), fields(mode = %self.mode, capital = %candidate.capital()))]
    pub fn select(&self, current: &Selection, candidate: &CapitalFact) -> Option<Selection> {
        match self.mode {
            SelectMode::Single => Some(Selection::Single(candidate.clone())),
            SelectMode::Multiple => {
                let mut picked = match current {
                    Selection::Multiple(facts) => facts.clone(),
                    _ => Vec::new(),
                };

                if picked.iter().any(|f| f.has_capital(candidate.capital())) {
                    picked.retain(|f| !f.has_capital(candidate.capital()));
                    debug!("Removed from multiple selection");
                } else if picked.len() < self.cap {
                    picked.push(candidate.clone());
                    debug!("Added to multiple selection");
                } else {
                    debug!(cap = self.cap, "Multiple selection full, ignoring");
                    return None;
                }

                Some(Selection::multiple(picked))
            }
        }
    }

    /// Chooses the highlighted candidate.
    ///
    /// The single dropdown closes after a pick; the multiple one stays open
    /// so several capitals can be toggled in a row.
    #[instrument(skip(self, current), fields(mode = %self.mode))]
    pub fn select_highlighted(&mut self, current: &Selection) -> Option<Selection> {
        let candidate = self.highlighted.and_then(|i| self.candidates.get(i))?.clone();
        let change = self.select(current, &candidate);
        if self.mode == SelectMode::Single {
            self.close();
        }
        change
    }

    /// Computes the cleared selection.
    ///
    /// Only clears a selection made in this selector's mode, so the other
    /// selector's choice is left alone.
    pub fn clear(&self, current: &Selection) -> Option<Selection> {
        (current.mode() == Some(self.mode)).then_some(Selection::None)
    }

    /// Returns true if `candidate` is part of `current` for this mode.
    pub fn is_selected(&self, current: &Selection, candidate: &CapitalFact) -> bool {
        current.mode() == Some(self.mode) && current.contains_capital(candidate.capital())
    }

    /// Capitals this selector currently shows as chosen.
    pub fn chosen<'a>(&self, current: &'a Selection) -> &'a [CapitalFact] {
        if current.mode() == Some(self.mode) {
            current.facts()
        } else {
            &[]
        }
    }

    /// Text shown when nothing is chosen.
    pub fn placeholder(&self) -> &'static str {
        match self.mode {
            SelectMode::Single => "Select an option",
            SelectMode::Multiple => "Choose more than one",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<CapitalFact> {
        vec![
            CapitalFact::new("France", "Paris"),
            CapitalFact::new("Spain", "Madrid"),
            CapitalFact::new("Italy", "Rome"),
            CapitalFact::new("Germany", "Berlin"),
            CapitalFact::new("Austria", "Vienna"),
        ]
    }

    #[test]
    fn test_single_replaces_selection() {
        let selector = ChoiceSelector::single();
        let c = candidates();
        let first = selector.select(&Selection::None, &c[0]).unwrap();
        let second = selector.select(&first, &c[1]).unwrap();
        assert_eq!(second, Selection::Single(c[1].clone()));
    }

    #[test]
    fn test_single_pick_replaces_multiple() {
        let selector = ChoiceSelector::single();
        let c = candidates();
        let current = Selection::Multiple(vec![c[0].clone(), c[1].clone()]);
        assert_eq!(
            selector.select(&current, &c[2]),
            Some(Selection::Single(c[2].clone()))
        );
    }

    #[test]
    fn test_multiple_toggles_membership() {
        let selector = ChoiceSelector::multiple(3);
        let c = candidates();
        let one = selector.select(&Selection::None, &c[0]).unwrap();
        let two = selector.select(&one, &c[1]).unwrap();
        assert_eq!(two.len(), 2);
        let back = selector.select(&two, &c[0]).unwrap();
        assert_eq!(back, Selection::Multiple(vec![c[1].clone()]));
        let none = selector.select(&back, &c[1]).unwrap();
        assert_eq!(none, Selection::None);
    }

    #[test]
    fn test_multiple_cap_ignores_fourth() {
        let selector = ChoiceSelector::multiple(3);
        let c = candidates();
        let full = Selection::Multiple(c[..3].to_vec());
        assert_eq!(selector.select(&full, &c[3]), None);
        assert_eq!(full.len(), 3);
        // Removing still works at the cap.
        assert_eq!(selector.select(&full, &c[2]).unwrap().len(), 2);
    }

    #[test]
    fn test_multiple_membership_by_value() {
        let selector = ChoiceSelector::multiple(3);
        let current = Selection::Multiple(vec![CapitalFact::new("France", "Paris")]);
        // Structurally equal but distinct value still matches.
        let again = CapitalFact::new("France", "Paris");
        assert!(selector.is_selected(&current, &again));
        assert_eq!(selector.select(&current, &again), Some(Selection::None));
    }

    #[test]
    fn test_clear_only_touches_own_mode() {
        let single = ChoiceSelector::single();
        let multiple = ChoiceSelector::multiple(3);
        let current = Selection::Single(CapitalFact::new("France", "Paris"));
        assert_eq!(multiple.clear(&current), None);
        assert_eq!(single.clear(&current), Some(Selection::None));
        assert!(!multiple.is_selected(&current, &CapitalFact::new("France", "Paris")));
    }

    #[test]
    fn test_open_close_and_highlight() {
        let mut selector = ChoiceSelector::single();
        selector.set_candidates(candidates());
        selector.toggle_open();
        assert!(*selector.is_open());
        assert_eq!(*selector.highlighted(), None);

        selector.highlight_previous();
        assert_eq!(*selector.highlighted(), Some(4));
        selector.highlight_next();
        assert_eq!(*selector.highlighted(), Some(0));

        let change = selector.select_highlighted(&Selection::None);
        assert_eq!(change, Some(Selection::Single(CapitalFact::new("France", "Paris"))));
        assert!(!*selector.is_open());

        selector.open();
        selector.highlight_next();
        selector.blur();
        assert!(!*selector.is_open());
        assert_eq!(*selector.highlighted(), None);
    }

    #[test]
    fn test_multiple_stays_open_after_pick() {
        let mut selector = ChoiceSelector::multiple(3);
        selector.set_candidates(candidates());
        selector.open();
        selector.highlight_next();
        let change = selector.select_highlighted(&Selection::None);
        assert_eq!(change.map(|s| s.len()), Some(1));
        assert!(*selector.is_open());
    }

    #[test]
    fn test_select_highlighted_without_highlight_is_noop() {
        let mut selector = ChoiceSelector::single();
        selector.set_candidates(candidates());
        assert_eq!(selector.select_highlighted(&Selection::None), None);
    }
}
