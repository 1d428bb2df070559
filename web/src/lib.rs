use arcade_core::{ArcadeConfig, Difficulty, GameKind, MemoryConfig};
use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod scheduler;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Let the tic-tac-toe computer skip wins and blocks
    #[arg(long)]
    casual: bool,

    /// Number of pairs in the memory deck
    #[arg(long, default_value_t = MemoryConfig::default().pairs)]
    pairs: u8,
}

impl Args {
    fn from_location_hash(hash: &str) -> Self {
        // The leading empty segment stands in for the program name.
        Self::try_parse_from(hash.split(['#', '&'])).unwrap_or_else(|_| Self::parse_from([""]))
    }

    fn arcade_config(&self) -> ArcadeConfig {
        let defaults = ArcadeConfig::default();
        ArcadeConfig {
            difficulty: if self.casual {
                Difficulty::Casual
            } else {
                Difficulty::Standard
            },
            memory: MemoryConfig::new(self.pairs, defaults.memory.mismatch_delay),
            ..defaults
        }
    }

    fn forced_seed(&self) -> Option<u64> {
        self.seed.as_deref().map(utils::seed_from_str)
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

    let args = Args::from_location_hash(&location_hash);
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            web_sys::console::error_1(&format!("Error initializing logger: {}", err).into());
        }
    }
    log::debug!("seed: {:?}", args.seed);

    let config = args.arcade_config();
    let seed = args.forced_seed();

    for kind in GameKind::ALL {
        let Some(root) = document().get_element_by_id(kind.container_id()) else {
            log::warn!("no id=\"{}\" element, skipping {:?}", kind.container_id(), kind);
            continue;
        };
        let props = game::GameProps { kind, config, seed };
        yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
        log::debug!("{:?} mounted", kind);
    }
}
