use memorito_core as game;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub(crate) fn format_entry(entry: &game::LeaderboardEntry) -> String {
    format!("{}: {} seconds", entry.name, entry.time_seconds)
}

pub(crate) fn win_message(name: Option<&str>, elapsed_seconds: game::Seconds) -> String {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!(
            "Congratulations, {}! You have completed the game in {} seconds!",
            name, elapsed_seconds
        ),
        None => format!(
            "Congratulations! You have completed the game in {} seconds!",
            elapsed_seconds
        ),
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct HighScoresProps {
    pub board: game::Leaderboard,
}

#[function_component]
pub(crate) fn HighScoresView(props: &HighScoresProps) -> Html {
    html! {
        <section class="high-scores">
            <h2>{"High Scores"}</h2>
            <ul class="high-scores-list">
                { for props.board.entries().iter().map(|entry| html! { <li>{format_entry(entry)}</li> }) }
            </ul>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct WinDialogProps {
    #[prop_or_default]
    pub open: bool,
    pub elapsed_seconds: game::Seconds,
    pub on_submit: Callback<String>,
}

/// Asks for a name once a round is won. An empty name is recorded as anonymous.
#[function_component]
pub(crate) fn WinDialog(props: &WinDialogProps) -> Html {
    let input = use_node_ref();

    let onsubmit = {
        let input = input.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = input
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            log::trace!("name submitted: {:?}", name);
            on_submit.emit(name);
        })
    };

    html! {
        <dialog id="win" open={props.open}>
            <article>
                <h2>{win_message(None, props.elapsed_seconds)}</h2>
                <form {onsubmit}>
                    <input ref={input} type="text" placeholder="Enter your name"/>
                    <footer>
                        <button type="submit">{"Save"}</button>
                    </footer>
                </form>
            </article>
        </dialog>
    }
}
