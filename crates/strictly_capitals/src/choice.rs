//! Choice groups: the shuffled candidate capitals for one round.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{CapitalFact, Dataset};

/// Ordered capitals offered in one round: the answer plus distractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceGroup {
    capitals: Vec<String>,
}

impl ChoiceGroup {
    /// Builds a group for `asked` with `size - 1` distinct distractors.
    ///
    /// Distractors are sampled without replacement from the dataset's
    /// distinct capitals, excluding the answer, and the combined list is
    /// shuffled uniformly. The caller guarantees the dataset has at least
    /// `size` distinct capitals (see [`Dataset::ensure_choices`]).
    #[instrument(skip(dataset, rng), fields(asked = %asked.capital()))]
    pub fn generate<R: Rng + ?Sized>(
        dataset: &Dataset,
        asked: &CapitalFact,
        size: usize,
        rng: &mut R,
    ) -> Self {
        let pool: Vec<&str> = dataset
            .distinct_capitals()
            .into_iter()
            .filter(|capital| !asked.has_capital(capital))
            .collect();

        let mut capitals: Vec<String> = pool
            .choose_multiple(rng, size.saturating_sub(1))
            .map(|capital| (*capital).to_string())
            .collect();
        capitals.push(asked.capital().clone());
        capitals.shuffle(rng);

        debug!(?capitals, "Choice group generated");
        Self { capitals }
    }

    /// Wraps an explicit list of capitals, keeping its order.
    pub fn from_capitals(capitals: Vec<String>) -> Self {
        Self { capitals }
    }

    /// Capitals in display order.
    pub fn capitals(&self) -> &[String] {
        &self.capitals
    }

    /// Number of capitals offered.
    pub fn len(&self) -> usize {
        self.capitals.len()
    }

    /// Returns true if nothing is offered.
    pub fn is_empty(&self) -> bool {
        self.capitals.is_empty()
    }

    /// How many times `capital` appears.
    pub fn occurrences(&self, capital: &str) -> usize {
        self.capitals.iter().filter(|c| *c == capital).count()
    }

    /// Returns true if every capital appears once.
    pub fn is_distinct(&self) -> bool {
        self.capitals
            .iter()
            .enumerate()
            .all(|(i, c)| !self.capitals[..i].contains(c))
    }

    /// Pairs each capital with its country for display and selection.
    ///
    /// Capitals missing from the dataset get an empty country.
    #[instrument(skip(self, dataset))]
    pub fn candidates(&self, dataset: &Dataset) -> Vec<CapitalFact> {
        self.capitals
            .iter()
            .map(|capital| {
                CapitalFact::new(dataset.country_for(capital).unwrap_or_default(), capital.as_str())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

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

    #[test]
    fn test_group_contains_answer_once() {
        let dataset = six_countries();
        let mut rng = StdRng::seed_from_u64(7);

        for asked in dataset.facts() {
            for _ in 0..50 {
                let group = ChoiceGroup::generate(&dataset, asked, 5, &mut rng);
                assert_eq!(group.len(), 5);
                assert_eq!(group.occurrences(asked.capital()), 1);
                assert!(group.is_distinct());
            }
        }
    }

    #[test]
    fn test_duplicate_capitals_do_not_leak_into_group() {
        let dataset = Dataset::new(vec![
            CapitalFact::new("France", "Paris"),
            CapitalFact::new("Paris, Texas", "Paris"),
            CapitalFact::new("Spain", "Madrid"),
            CapitalFact::new("Italy", "Rome"),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let group = ChoiceGroup::generate(&dataset, &dataset.facts()[0], 3, &mut rng);
            assert_eq!(group.occurrences("Paris"), 1);
            assert!(group.is_distinct());
        }
    }

    #[test]
    fn test_answer_position_varies() {
        let dataset = six_countries();
        let asked = &dataset.facts()[0];
        let mut rng = StdRng::seed_from_u64(42);
        let mut positions = [0usize; 5];

        for _ in 0..500 {
            let group = ChoiceGroup::generate(&dataset, asked, 5, &mut rng);
            let idx = group
                .capitals()
                .iter()
                .position(|c| c == "Paris")
                .unwrap();
            positions[idx] += 1;
        }

        assert!(positions.iter().all(|&n| n > 0), "{positions:?}");
    }

    #[test]
    fn test_candidates_map_countries() {
        let dataset = six_countries();
        let group = ChoiceGroup::from_capitals(vec!["Rome".into(), "Atlantis".into()]);
        let candidates = group.candidates(&dataset);
        assert_eq!(candidates[0], CapitalFact::new("Italy", "Rome"));
        assert_eq!(candidates[1], CapitalFact::new("", "Atlantis"));
    }
}
