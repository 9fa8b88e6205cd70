use super::*;

/// Replays a known deal verbatim, ignoring the difficulty.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetDeckGenerator {
    symbols: Vec<Symbol>,
}

impl PresetDeckGenerator {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }
}

impl DeckGenerator for PresetDeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Vec<Symbol> {
        if self.symbols.len() != usize::from(difficulty.total_cards()) {
            log::warn!(
                "Preset deck size mismatch, actual: {}, expected for {}: {}",
                self.symbols.len(),
                difficulty,
                difficulty.total_cards()
            );
        }
        self.symbols
    }
}
