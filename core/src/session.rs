use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long two revealed cards stay face up before the pair is evaluated.
    pub peek_delay: Duration,
    pub tick_period: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            peek_delay: Duration::from_secs(1),
            tick_period: Duration::from_secs(1),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Deferred {
    EvaluatePair,
    Tick,
}

/// Drives rounds from user intents and deferred callbacks. Intents that make no sense in the
/// current state are ignored rather than reported, every method hands back the resulting events.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    difficulty: Difficulty,
    round: RoundState,
    round_id: RoundId,
    scheduler: Scheduler<Deferred>,
    timer: RoundTimer,
}

impl Session {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(difficulty, SessionConfig::default())
    }

    pub fn with_config(difficulty: Difficulty, config: SessionConfig) -> Self {
        Self {
            config,
            difficulty,
            round: RoundState::idle(difficulty),
            round_id: RoundId::default(),
            scheduler: Scheduler::new(),
            timer: RoundTimer::new(config.tick_period),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Difficulty used by the next `start_game`, the current round keeps its own.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_id(&self) -> RoundId {
        self.round_id
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// When `advance` next has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.difficulty == difficulty {
            return false;
        }
        log::debug!("difficulty: {}", difficulty);
        self.difficulty = difficulty;
        true
    }

    /// Abandons whatever round was going on and deals a new one.
    pub fn start_game(
        &mut self,
        now: Instant,
        generator: impl DeckGenerator,
    ) -> Vec<SessionEvent> {
        let stale = self.scheduler.cancel_round(self.round_id);
        if stale > 0 {
            log::debug!("dropped {} pending callbacks from round {:?}", stale, self.round_id);
        }
        self.timer.stop(&mut self.scheduler);
        self.round_id = self.round_id.next();

        self.round = RoundState::dealing(self.difficulty);
        let symbols = generator.generate(self.difficulty);
        let events = self.round.deal(symbols);

        self.timer
            .start(&mut self.scheduler, now, self.round_id, Deferred::Tick);
        log::debug!(
            "round {:?} started: {} with {} cards",
            self.round_id,
            self.difficulty,
            self.round.cards().len()
        );
        events
    }

    pub fn select_card(&mut self, now: Instant, position: CardIndex) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        match self.round.select(position, &mut events) {
            Ok(SelectOutcome::PairComplete) => {
                self.scheduler.schedule(
                    now + self.config.peek_delay,
                    self.round_id,
                    Deferred::EvaluatePair,
                );
            }
            Ok(outcome) if outcome.has_update() => {
                log::trace!("select {}: {:?}", position, outcome)
            }
            Ok(_) => log::debug!("select {} ignored: nothing to change", position),
            Err(err) => log::debug!("select {} ignored: {}", position, err),
        }

        events
    }

    /// Runs every deferred callback due at `now`, in fire order.
    pub fn advance(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        while let Some(fired) = self.scheduler.pop_due(now) {
            if fired.round != self.round_id {
                log::debug!("stale {:?} from round {:?} discarded", fired.task, fired.round);
                continue;
            }

            match fired.task {
                Deferred::EvaluatePair => self.evaluate_pair(&mut events),
                Deferred::Tick => {
                    if let Some(elapsed) = self.round.tick() {
                        events.push(SessionEvent::TimeChanged(elapsed));
                    }
                    self.timer.rearm(
                        &mut self.scheduler,
                        fired.due,
                        self.round_id,
                        Deferred::Tick,
                    );
                }
            }
        }

        events
    }

    /// Goes back to idle after a won round, once the result was shown.
    pub fn close_round(&mut self) -> bool {
        self.round.close()
    }

    fn evaluate_pair(&mut self, events: &mut Vec<SessionEvent>) {
        match self.round.evaluate(events) {
            Ok(PairOutcome::Won) => {
                self.timer.stop(&mut self.scheduler);
                log::info!(
                    "round {:?} won in {} seconds",
                    self.round_id,
                    self.round.elapsed_seconds()
                );
            }
            Ok(outcome) => log::debug!("pair evaluated: {:?}", outcome),
            Err(err) => log::warn!("pair evaluation skipped: {}", err),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use Symbol::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn easy_deck() -> PresetDeckGenerator {
        PresetDeckGenerator::new(vec![
            Unicorn, Fairy, Unicorn, Fairy, Elf, Tulip, Elf, Tulip,
        ])
    }

    fn started(t0: Instant) -> Session {
        let mut session = Session::new(Difficulty::Easy);
        session.start_game(t0, easy_deck());
        session
    }

    fn revealed(session: &Session) -> Vec<CardIndex> {
        session
            .round()
            .cards()
            .iter()
            .filter(|card| card.is_revealed())
            .map(Card::position)
            .collect()
    }

    #[test]
    fn start_game_deals_for_chosen_difficulty() {
        let t0 = Instant::now();
        let mut session = Session::default();
        assert_eq!(session.round().status(), RoundStatus::Idle);
        assert!(session.set_difficulty(Difficulty::Medium));
        assert!(!session.set_difficulty(Difficulty::Medium));

        let events = session.start_game(t0, ShuffledDeckGenerator::new(1));

        assert_eq!(session.round().cards().len(), 12);
        assert_eq!(session.round().status(), RoundStatus::AwaitingSelection);
        assert!(session.is_timer_running());
        assert!(matches!(&events[0], SessionEvent::CardsDealt(cards) if cards.len() == 12));
    }

    #[test]
    fn difficulty_change_waits_for_next_round() {
        let t0 = Instant::now();
        let mut session = started(t0);

        session.set_difficulty(Difficulty::Hard);

        assert_eq!(session.round().difficulty(), Difficulty::Easy);
        assert_eq!(session.round().total_pairs(), 4);
    }

    #[test]
    fn selecting_matching_pair_scores_after_peek_delay() {
        let t0 = Instant::now();
        let mut session = started(t0);

        let events = session.select_card(t0, 0);
        assert_eq!(
            events,
            vec![SessionEvent::CardRevealed {
                position: 0,
                symbol: Unicorn
            }]
        );
        assert!(session.select_card(t0, 0).is_empty());
        session.select_card(t0 + millis(200), 2);
        assert_eq!(session.round().status(), RoundStatus::Evaluating);

        // still peeking
        assert!(session.advance(t0 + millis(900)).is_empty());
        assert_eq!(revealed(&session), vec![0, 2]);

        let events = session.advance(t0 + millis(1200));
        assert!(events.contains(&SessionEvent::ScoreChanged(10)));
        assert!(events.contains(&SessionEvent::CardMatched(0)));
        assert!(events.contains(&SessionEvent::CardMatched(2)));
        assert_eq!(session.round().score(), 10);
        assert_eq!(revealed(&session), vec![0, 2]);
        assert!(session.round().selection().is_empty());
    }

    #[test]
    fn mismatched_pair_hides_after_peek_delay() {
        let t0 = Instant::now();
        let mut session = started(t0);

        session.select_card(t0, 0);
        session.select_card(t0, 1);
        let events = session.advance(t0 + secs(1));

        assert!(events.contains(&SessionEvent::CardHidden(0)));
        assert!(events.contains(&SessionEvent::CardHidden(1)));
        assert!(revealed(&session).is_empty());
        assert_eq!(session.round().score(), 0);
        assert_eq!(session.round().status(), RoundStatus::AwaitingSelection);
    }

    #[test]
    fn selection_never_exceeds_two_cards() {
        let t0 = Instant::now();
        let mut session = started(t0);

        session.select_card(t0, 4);
        session.select_card(t0, 5);
        assert!(session.select_card(t0, 6).is_empty());
        assert!(session.select_card(t0, 200).is_empty());

        assert_eq!(session.round().selection(), &[4, 5]);
        assert_eq!(revealed(&session), vec![4, 5]);
    }

    #[test]
    fn reselecting_matched_card_schedules_nothing() {
        let t0 = Instant::now();
        let mut session = started(t0);

        session.select_card(t0, 0);
        session.select_card(t0, 2);
        session.advance(t0 + secs(1));
        let deadline = session.next_deadline();

        assert!(session.select_card(t0 + secs(1), 0).is_empty());
        assert!(session.round().selection().is_empty());
        assert_eq!(session.next_deadline(), deadline);
    }

    #[test]
    fn timer_ticks_once_per_second() {
        let t0 = Instant::now();
        let mut session = started(t0);

        assert!(session.advance(t0 + millis(999)).is_empty());
        assert_eq!(
            session.advance(t0 + secs(1)),
            vec![SessionEvent::TimeChanged(1)]
        );
        assert_eq!(
            session.advance(t0 + millis(3500)),
            vec![SessionEvent::TimeChanged(2), SessionEvent::TimeChanged(3)]
        );
        assert_eq!(session.round().elapsed_seconds(), 3);
        assert_eq!(session.next_deadline(), Some(t0 + secs(4)));
    }

    #[test]
    fn winning_round_stops_timer_and_reports_time() {
        let t0 = Instant::now();
        let mut session = started(t0);
        let mut won = None;

        for (i, (a, b)) in [(0, 2), (1, 3), (4, 6), (5, 7)].into_iter().enumerate() {
            let now = t0 + secs(2 * i as u64) + millis(500);
            session.select_card(now, a);
            session.select_card(now, b);
            for event in session.advance(now + secs(1)) {
                if let SessionEvent::RoundWon { elapsed_seconds } = event {
                    won = Some(elapsed_seconds);
                }
            }
        }

        assert_eq!(session.round().status(), RoundStatus::Won);
        assert_eq!(session.round().score(), 40);
        assert_eq!(won, Some(7));
        assert!(!session.is_timer_running());
        assert!(session.advance(t0 + secs(60)).is_empty());
        assert_eq!(session.round().elapsed_seconds(), 7);

        // board stays locked until a new round
        assert!(session.select_card(t0 + secs(61), 0).is_empty());
        assert!(session.close_round());
        assert_eq!(session.round().status(), RoundStatus::Idle);
    }

    #[test]
    fn won_is_gated_by_difficulty_pair_count() {
        let t0 = Instant::now();
        let mut session = Session::new(Difficulty::Hard);
        let unshuffled = paired_symbols(Difficulty::Hard);
        session.start_game(t0, PresetDeckGenerator::new(unshuffled));

        for pair in 0..8u8 {
            session.select_card(t0, pair * 2);
            session.select_card(t0, pair * 2 + 1);
            session.advance(t0 + secs(1));
            let expected = if pair == 7 {
                RoundStatus::Won
            } else {
                RoundStatus::AwaitingSelection
            };
            // four pairs would already end an easy round, not a hard one
            assert_eq!(session.round().status(), expected);
        }
        assert_eq!(session.round().matched_pairs(), 8);
    }

    #[test]
    fn new_round_ignores_stale_evaluation() {
        let t0 = Instant::now();
        let mut session = started(t0);

        session.select_card(t0, 0);
        session.select_card(t0, 1);
        session.start_game(t0 + millis(500), easy_deck());
        session.select_card(t0 + millis(600), 4);

        let events = session.advance(t0 + millis(1100));

        assert!(events.is_empty());
        assert_eq!(revealed(&session), vec![4]);
        assert_eq!(session.round().selection(), &[4]);
        assert_eq!(session.round().status(), RoundStatus::AwaitingSelection);
    }

    #[test]
    fn new_round_restarts_clock() {
        let t0 = Instant::now();
        let mut session = started(t0);
        session.advance(t0 + secs(5));
        assert_eq!(session.round().elapsed_seconds(), 5);

        session.start_game(t0 + millis(5500), easy_deck());

        assert_eq!(session.round().elapsed_seconds(), 0);
        assert!(session.advance(t0 + secs(6)).is_empty());
        assert_eq!(
            session.advance(t0 + millis(6500)),
            vec![SessionEvent::TimeChanged(1)]
        );
    }
}
