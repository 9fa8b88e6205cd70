use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    #[default]
    Idle,
    Dealing,
    AwaitingSelection,
    Evaluating,
    Won,
}

impl RoundStatus {
    /// The round clock only counts while the board is in play.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::AwaitingSelection | Self::Evaluating)
    }
}

/// State change notifications for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    CardsDealt(Vec<Card>),
    CardRevealed { position: CardIndex, symbol: Symbol },
    CardHidden(CardIndex),
    CardMatched(CardIndex),
    ScoreChanged(Score),
    TimeChanged(Seconds),
    RoundWon { elapsed_seconds: Seconds },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoChange,
    Revealed,
    /// Second card of a pair was revealed, the board is locked until the pair is evaluated.
    PairComplete,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PairOutcome {
    Matched,
    Mismatched,
    Won,
}

/// Cards, selection, score and clock of one round. Every method here is a pure transition, the
/// timing of deferred work lives in [`Session`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    difficulty: Difficulty,
    cards: Vec<Card>,
    selection: SmallVec<[CardIndex; 2]>,
    score: Score,
    elapsed_seconds: Seconds,
    status: RoundStatus,
}

impl RoundState {
    pub fn idle(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            cards: Vec::new(),
            selection: SmallVec::new(),
            score: 0,
            elapsed_seconds: 0,
            status: RoundStatus::Idle,
        }
    }

    /// Fresh round waiting for its deck.
    pub fn dealing(difficulty: Difficulty) -> Self {
        Self {
            status: RoundStatus::Dealing,
            ..Self::idle(difficulty)
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_at(&self, position: CardIndex) -> Option<&Card> {
        self.cards.get(usize::from(position))
    }

    pub fn selection(&self) -> &[CardIndex] {
        &self.selection
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn elapsed_seconds(&self) -> Seconds {
        self.elapsed_seconds
    }

    pub fn total_pairs(&self) -> PairCount {
        self.difficulty.pairs()
    }

    pub fn matched_pairs(&self) -> PairCount {
        (self.score / POINTS_PER_PAIR).try_into().unwrap_or(PairCount::MAX)
    }

    pub fn is_won(&self) -> bool {
        self.matched_pairs() == self.total_pairs()
    }

    /// Whether a click on `position` would currently do anything.
    pub fn can_select(&self, position: CardIndex) -> bool {
        self.status == RoundStatus::AwaitingSelection
            && self.selection.len() < 2
            && !self.selection.contains(&position)
            && self.card_at(position).is_some_and(|card| !card.is_matched())
    }

    pub fn deal(&mut self, symbols: Vec<Symbol>) -> Vec<SessionEvent> {
        self.cards = symbols
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| {
                Card::new(position.try_into().unwrap_or(CardIndex::MAX), symbol)
            })
            .collect();
        self.selection.clear();
        self.score = 0;
        self.elapsed_seconds = 0;
        self.status = RoundStatus::AwaitingSelection;

        alloc::vec![
            SessionEvent::CardsDealt(self.cards.clone()),
            SessionEvent::ScoreChanged(self.score),
            SessionEvent::TimeChanged(self.elapsed_seconds),
        ]
    }

    pub fn select(
        &mut self,
        position: CardIndex,
        events: &mut Vec<SessionEvent>,
    ) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        if self.status != RoundStatus::AwaitingSelection {
            return Err(GameError::InputLocked);
        }

        let index = usize::from(position);
        let card = self.cards.get(index).ok_or(GameError::InvalidPosition)?;

        if card.is_matched() || self.selection.len() >= 2 || self.selection.contains(&position) {
            return Ok(NoChange);
        }

        let symbol = card.symbol();
        self.cards[index].reveal();
        self.selection.push(position);
        events.push(SessionEvent::CardRevealed { position, symbol });

        if self.selection.len() == 2 {
            self.status = RoundStatus::Evaluating;
            Ok(PairComplete)
        } else {
            Ok(Revealed)
        }
    }

    pub fn evaluate(&mut self, events: &mut Vec<SessionEvent>) -> Result<PairOutcome> {
        let [first, second] = match (self.status, self.selection.as_slice()) {
            (RoundStatus::Evaluating, &[first, second]) => [first, second],
            _ => return Err(GameError::NothingToEvaluate),
        };
        let (first, second) = (usize::from(first), usize::from(second));

        let outcome = if self.cards[first].symbol() == self.cards[second].symbol() {
            for index in [first, second] {
                self.cards[index].mark_matched();
                events.push(SessionEvent::CardMatched(self.cards[index].position()));
            }
            self.score += POINTS_PER_PAIR;
            events.push(SessionEvent::ScoreChanged(self.score));
            PairOutcome::Matched
        } else {
            for index in [first, second] {
                self.cards[index].hide();
                events.push(SessionEvent::CardHidden(self.cards[index].position()));
            }
            PairOutcome::Mismatched
        };
        self.selection.clear();

        if self.is_won() {
            self.status = RoundStatus::Won;
            events.push(SessionEvent::RoundWon {
                elapsed_seconds: self.elapsed_seconds,
            });
            Ok(PairOutcome::Won)
        } else {
            self.status = RoundStatus::AwaitingSelection;
            Ok(outcome)
        }
    }

    /// Advances the clock by one second, only while the round is in play.
    pub fn tick(&mut self) -> Option<Seconds> {
        if !self.status.is_active() {
            return None;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        Some(self.elapsed_seconds)
    }

    /// Leaves a won round, the board stays as it was until the next deal.
    pub fn close(&mut self) -> bool {
        if self.status == RoundStatus::Won {
            self.status = RoundStatus::Idle;
            true
        } else {
            false
        }
    }
}
