use rand::prelude::*;

use super::*;

/// Deals the catalog prefix for the difficulty with every card position shuffled. Symbol identity
/// is never randomized, only where each card lands.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffledDeckGenerator {
    seed: u64,
}

impl ShuffledDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for ShuffledDeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Vec<Symbol> {
        let mut deck = paired_symbols(difficulty);
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // Fisher-Yates, back to front
        for i in (1..deck.len()).rev() {
            let j = rng.random_range(0..=i);
            deck.swap(i, j);
        }

        log::debug!("dealt {} cards for {} (seed {})", deck.len(), difficulty, self.seed);
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;

    fn symbol_counts(deck: &[Symbol]) -> BTreeMap<Symbol, usize> {
        let mut counts = BTreeMap::new();
        for &symbol in deck {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn every_symbol_appears_exactly_twice() {
        for difficulty in Difficulty::ALL {
            for seed in 0..32 {
                let deck = ShuffledDeckGenerator::new(seed).generate(difficulty);
                assert_eq!(deck.len(), usize::from(difficulty.total_cards()));

                let counts = symbol_counts(&deck);
                assert_eq!(counts.len(), usize::from(difficulty.pairs()));
                assert!(counts.values().all(|&count| count == 2));
            }
        }
    }

    #[test]
    fn uses_catalog_prefix() {
        let deck = ShuffledDeckGenerator::new(7).generate(Difficulty::Medium);
        let counts = symbol_counts(&deck);
        let expected: Vec<_> = Symbol::CATALOG[..6].to_vec();
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn hard_uses_whole_catalog() {
        let deck = ShuffledDeckGenerator::new(3).generate(Difficulty::Hard);
        let counts = symbol_counts(&deck);
        assert!(Symbol::CATALOG.iter().all(|symbol| counts[symbol] == 2));
    }

    #[test]
    fn same_seed_same_deal() {
        let a = ShuffledDeckGenerator::new(42).generate(Difficulty::Hard);
        let b = ShuffledDeckGenerator::new(42).generate(Difficulty::Hard);
        assert_eq!(a, b);
    }

    #[test]
    fn positions_are_shuffled() {
        let unshuffled = paired_symbols(Difficulty::Hard);
        let shuffled_any = (0..16).any(|seed| {
            ShuffledDeckGenerator::new(seed).generate(Difficulty::Hard) != unshuffled
        });
        assert!(shuffled_any);
    }
}
