use clap::Parser;
use memorito_core::{BlobStore, LeaderboardStore};
use wasm_bindgen::prelude::*;

mod game;
mod scores;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Keep high scores from earlier visits instead of wiping them on load
    #[arg(long)]
    keep_scores: bool,

    #[command(flatten)]
    game: game::GameProps,
}

/// Every page load starts with an empty leaderboard unless `--keep-scores` was given.
fn reset_scores_on_load<S: BlobStore>(keep_scores: bool, scores: &mut LeaderboardStore<S>) {
    if keep_scores {
        log::debug!("keeping previous high scores");
    } else {
        scores.clear();
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}", args.game.seed);

    reset_scores_on_load(args.keep_scores, &mut utils::high_scores());

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use memorito_core::MemoryStore;

    fn prefilled() -> LeaderboardStore<MemoryStore> {
        let mut scores = LeaderboardStore::new(MemoryStore::new());
        scores.submit(Some("Alice"), 30);
        scores.submit(Some("Bob"), 45);
        scores
    }

    #[test]
    fn default_load_wipes_high_scores() {
        let args = Args::try_parse_from("".split(['#', '&'])).unwrap();
        let mut scores = prefilled();

        reset_scores_on_load(args.keep_scores, &mut scores);

        assert!(scores.list().is_empty());
    }

    #[test]
    fn keep_scores_flag_leaves_board_alone() {
        let args = Args::try_parse_from("#--keep-scores".split(['#', '&'])).unwrap();
        let mut scores = prefilled();
        let before = scores.list();

        reset_scores_on_load(args.keep_scores, &mut scores);

        assert_eq!(before.len(), 2);
        assert_eq!(scores.list(), before);
    }
}
