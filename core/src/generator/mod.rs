use alloc::vec::Vec;

use crate::*;
pub use preset::*;
pub use shuffled::*;

mod preset;
mod shuffled;

pub trait DeckGenerator {
    /// Symbols in board order, one entry per card.
    fn generate(self, difficulty: Difficulty) -> Vec<Symbol>;
}

/// The catalog prefix used for `difficulty`, each symbol listed twice, not yet shuffled.
pub fn paired_symbols(difficulty: Difficulty) -> Vec<Symbol> {
    let pairs = usize::from(difficulty.pairs()).min(Symbol::CATALOG.len());
    Symbol::CATALOG[..pairs]
        .iter()
        .flat_map(|&symbol| [symbol, symbol])
        .collect()
}
