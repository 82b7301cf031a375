//! Country/capital facts and the dataset they are drawn from.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::SetupError;

/// A country paired with its capital.
///
/// Two facts are the same answer when their capitals match; equality on the
/// whole struct is only used for bookkeeping.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new, derive_more::Display,
)]
#[display("{capital} ({country})")]
pub struct CapitalFact {
    /// Country name shown as the question.
    #[new(into)]
    country: String,
    /// Capital city, the answer key.
    #[new(into)]
    capital: String,
}

impl CapitalFact {
    /// Returns true if this fact answers with the given capital.
    pub fn has_capital(&self, capital: &str) -> bool {
        self.capital == capital
    }
}

/// Validated, read-only list of facts.
///
/// Order is preserved from the source. Capitals may repeat across
/// countries; lookups by capital return the first match.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Dataset {
    /// Facts in source order.
    facts: Vec<CapitalFact>,
}

impl Dataset {
    /// Builds a dataset, rejecting empty lists and blank entries.
    #[instrument(skip(facts), fields(count = facts.len()))]
    pub fn new(facts: Vec<CapitalFact>) -> Result<Self, SetupError> {
        if facts.is_empty() {
            return Err(SetupError::new("dataset contains no facts"));
        }

        if let Some(blank) = facts
            .iter()
            .position(|f| f.country.trim().is_empty() || f.capital.trim().is_empty())
        {
            return Err(SetupError::new(format!(
                "fact #{} has a blank country or capital",
                blank + 1
            )));
        }

        debug!("Dataset validated");
        Ok(Self { facts })
    }

    /// The dataset shipped with the game.
    #[instrument]
    pub fn builtin() -> Self {
        let facts = crate::builtin::FACTS
            .iter()
            .map(|(country, capital)| CapitalFact::new(*country, *capital))
            .collect();
        Self { facts }
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true when the dataset holds no facts.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Capitals without repeats, in first-seen order.
    #[instrument(skip(self))]
    pub fn distinct_capitals(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.facts
            .iter()
            .map(|f| f.capital.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Finds the country for a capital, if any fact has it.
    #[instrument(skip(self))]
    pub fn country_for(&self, capital: &str) -> Option<&str> {
        self.facts
            .iter()
            .find(|f| f.has_capital(capital))
            .map(|f| f.country.as_str())
    }

    /// Checks that a full choice group of `choice_count` can be built.
    #[instrument(skip(self))]
    pub fn ensure_choices(&self, choice_count: usize) -> Result<(), SetupError> {
        let available = self.distinct_capitals().len();
        if available < choice_count {
            return Err(SetupError::new(format!(
                "dataset needs at least {} distinct capitals, found {}",
                choice_count, available
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(country: &str, capital: &str) -> CapitalFact {
        CapitalFact::new(country, capital)
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = Dataset::new(Vec::new()).unwrap_err();
        assert!(err.message.contains("no facts"));
    }

    #[test]
    fn test_blank_capital_rejected() {
        let err = Dataset::new(vec![fact("France", "Paris"), fact("Spain", "  ")]).unwrap_err();
        assert!(err.message.contains("#2"));
    }

    #[test]
    fn test_distinct_capitals_keeps_first_seen_order() {
        let dataset = Dataset::new(vec![
            fact("France", "Paris"),
            fact("Texas town", "Paris"),
            fact("Spain", "Madrid"),
        ])
        .unwrap();
        assert_eq!(dataset.distinct_capitals(), ["Paris", "Madrid"]);
        assert_eq!(dataset.country_for("Paris"), Some("France"));
        assert_eq!(dataset.country_for("Rome"), None);
    }

    #[test]
    fn test_ensure_choices_counts_distinct_capitals() {
        let dataset = Dataset::new(vec![
            fact("France", "Paris"),
            fact("Elsewhere", "Paris"),
            fact("Spain", "Madrid"),
        ])
        .unwrap();
        assert!(dataset.ensure_choices(2).is_ok());
        let err = dataset.ensure_choices(3).unwrap_err();
        assert!(err.message.contains("found 2"));
    }

    #[test]
    fn test_builtin_dataset_is_usable() {
        let dataset = Dataset::builtin();
        assert!(dataset.len() >= 5);
        assert!(Dataset::new(dataset.facts().clone()).is_ok());
        assert!(dataset.ensure_choices(5).is_ok());
    }

    #[test]
    fn test_fact_display_and_serde() {
        let paris = fact("France", "Paris");
        assert_eq!(paris.to_string(), "Paris (France)");
        let json = serde_json::to_string(&paris).unwrap();
        assert_eq!(json, r#"{"country":"France","capital":"Paris"}"#);
    }
}
