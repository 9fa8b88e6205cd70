use crate::scores::{HighScoresView, WinDialog, win_message};
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Interval;
use memorito_core as game;
use web_sys::HtmlSelectElement;
use web_time::Instant;
use yew::prelude::*;

impl StorageKey for game::Difficulty {
    const KEY: &'static str = "memorito:difficulty";
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCardState {
    Hidden,
    Revealed(game::Symbol),
    Matched(game::Symbol),
}

impl From<&game::Card> for ViewCardState {
    fn from(card: &game::Card) -> Self {
        match (card.is_matched(), card.is_revealed()) {
            (true, _) => Self::Matched(card.symbol()),
            (false, true) => Self::Revealed(card.symbol()),
            (false, false) => Self::Hidden,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SetDifficulty(game::Difficulty),
    NewGame,
    SelectCard(game::CardIndex),
    Advance,
    SubmitName(String),
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    position: game::CardIndex,
    card_state: ViewCardState,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use ViewCardState::*;

    let CardProps {
        position,
        card_state,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "card",
        match card_state {
            Hidden => classes!(),
            Revealed(_) => classes!("flipped"),
            Matched(_) => classes!("flipped", "matched"),
        }
    );
    if locked {
        class.push("locked");
    }

    let glyph = match card_state {
        Hidden => "",
        Revealed(symbol) | Matched(symbol) => symbol.glyph(),
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", position);
        callback.emit(position);
    });

    html! {
        <div {class} {onclick}>{glyph}</div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::Session,
    scores: game::Leaderboard,
    /// Set while the win dialog waits for a name.
    won_in: Option<game::Seconds>,
    last_result: Option<String>,
    _advance_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(100, move || link.send_message(Msg::Advance))
    }

    fn deal_seed(ctx: &Context<Self>) -> u64 {
        ctx.props().seed.unwrap_or_else(js_random_seed)
    }

    fn on_event(&mut self, event: &game::SessionEvent) {
        use game::SessionEvent::*;

        log::debug!("{:?}", event);
        if let RoundWon { elapsed_seconds } = *event {
            self.won_in = Some(elapsed_seconds);
            self.last_result = None;
        }
    }

    fn submit_name(&mut self, name: &str) -> bool {
        let Some(elapsed_seconds) = self.won_in.take() else {
            log::debug!("no finished round to record");
            return false;
        };

        self.scores = high_scores().submit(Some(name), elapsed_seconds);
        self.last_result = Some(win_message(Some(name), elapsed_seconds));
        self.session.close_round();
        true
    }

    fn view_difficulty_select(&self, ctx: &Context<Self>) -> Html {
        let current = self.session.difficulty();
        let onchange = ctx.link().callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::SetDifficulty(game::Difficulty::from_name(&select.value()))
        });

        html! {
            <select id="difficulty" {onchange}>
                {
                    for game::Difficulty::ALL.into_iter().map(|difficulty| html! {
                        <option value={difficulty.name()} selected={difficulty == current}>
                            {difficulty_label(difficulty)}
                        </option>
                    })
                }
            </select>
        }
    }
}

fn difficulty_label(difficulty: game::Difficulty) -> &'static str {
    use game::Difficulty::*;
    match difficulty {
        Easy => "Easy",
        Medium => "Medium",
        Hard => "Hard",
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: game::Session::new(LocalOrDefault::local_or_default()),
            scores: high_scores().list(),
            won_in: None,
            last_result: None,
            _advance_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let now = Instant::now();
        let events = match msg {
            SetDifficulty(difficulty) => {
                let updated = self.session.set_difficulty(difficulty);
                if updated {
                    difficulty.local_save();
                }
                return updated;
            }
            NewGame => {
                let seed = GameView::deal_seed(ctx);
                log::debug!("new game, seed: {}", seed);
                self.won_in = None;
                self.last_result = None;
                self.session
                    .start_game(now, game::ShuffledDeckGenerator::new(seed))
            }
            SelectCard(position) => self.session.select_card(now, position),
            Advance => self.session.advance(now),
            SubmitName(name) => return self.submit_name(&name),
        };

        for event in &events {
            self.on_event(event);
        }
        !events.is_empty()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let round = self.session.round();
        let locked = round.status() != game::RoundStatus::AwaitingSelection;
        let score = round.score();
        let elapsed_time = format_for_counter(round.elapsed_seconds());

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_select = ctx.link().callback(SelectCard);
        let cb_submit_name = ctx.link().callback(SubmitName);

        html! {
            <div class="memorito">
                <nav>
                    {self.view_difficulty_select(ctx)}
                    <button id="start-btn" onclick={cb_new_game}>{"Start"}</button>
                    <aside id="score">{score}</aside>
                    <aside id="timer">{elapsed_time}</aside>
                </nav>
                if let Some(result) = &self.last_result {
                    <p class="result">{result.clone()}</p>
                }
                <div class={classes!("game-board", round.difficulty().name(), locked.then_some("locked"))}>
                    {
                        for round.cards().iter().map(|card| {
                            let position = card.position();
                            let card_state = ViewCardState::from(card);
                            let locked = !round.can_select(position);
                            let callback = cb_select.clone();
                            html! {
                                <CardView key={position} {position} {card_state} {locked} {callback}/>
                            }
                        })
                    }
                </div>
                <HighScoresView board={self.scores.clone()}/>
                <Modal>
                    <WinDialog
                        open={self.won_in.is_some()}
                        elapsed_seconds={self.won_in.unwrap_or_default()}
                        on_submit={cb_submit_name}
                    />
                </Modal>
            </div>
        }
    }
}
