//! The user's current answer, as a single tagged value.
//!
//! Single and multiple selection are mutually exclusive by construction:
//! choosing in one mode replaces whatever the other mode held.

use serde::{Deserialize, Serialize};

use crate::CapitalFact;

/// Which selector a selection came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    /// Exactly one capital.
    #[strum(to_string = "single")]
    Single,
    /// Several capitals, up to a cap.
    #[strum(to_string = "multiple")]
    Multiple,
}

/// The answer currently held for a round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing chosen yet.
    #[default]
    None,
    /// One capital from the single selector.
    Single(CapitalFact),
    /// One or more capitals from the multiple selector, in pick order.
    Multiple(Vec<CapitalFact>),
}

impl Selection {
    /// Builds a multiple selection; an empty list collapses to `None`.
    pub fn multiple(facts: Vec<CapitalFact>) -> Self {
        if facts.is_empty() {
            Self::None
        } else {
            Self::Multiple(facts)
        }
    }

    /// The mode this selection belongs to, if any.
    pub fn mode(&self) -> Option<SelectMode> {
        match self {
            Self::None => None,
            Self::Single(_) => Some(SelectMode::Single),
            Self::Multiple(_) => Some(SelectMode::Multiple),
        }
    }

    /// Chosen facts as a slice.
    pub fn facts(&self) -> &[CapitalFact] {
        match self {
            Self::None => &[],
            Self::Single(fact) => std::slice::from_ref(fact),
            Self::Multiple(facts) => facts,
        }
    }

    /// Number of chosen capitals.
    pub fn len(&self) -> usize {
        self.facts().len()
    }

    /// Returns true if nothing is chosen.
    pub fn is_empty(&self) -> bool {
        self.facts().is_empty()
    }

    /// Returns true if a chosen fact has `capital`.
    pub fn contains_capital(&self, capital: &str) -> bool {
        self.facts().iter().any(|f| f.has_capital(capital))
    }

    /// How many chosen facts have `capital`.
    pub fn count_capital(&self, capital: &str) -> usize {
        self.facts().iter().filter(|f| f.has_capital(capital)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_multiple_collapses_to_none() {
        assert_eq!(Selection::multiple(Vec::new()), Selection::None);
        assert_eq!(Selection::None.mode(), None);
    }

    #[test]
    fn test_membership_is_by_capital() {
        let selection = Selection::Single(CapitalFact::new("France", "Paris"));
        assert!(selection.contains_capital("Paris"));
        assert!(!selection.contains_capital("Rome"));
        assert_eq!(selection.mode(), Some(SelectMode::Single));
        assert_eq!(selection.len(), 1);
    }
}
