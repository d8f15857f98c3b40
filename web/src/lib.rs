use clap::Parser;
use wasm_bindgen::prelude::*;

pub use game::MergeGame;

mod game;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Longest gap in milliseconds between two presses that still counts as a double activation
    #[arg(long, default_value_t = sandmerge_core::DOUBLE_ACTIVATION_MS)]
    threshold_ms: u64,
}

impl Args {
    /// Arguments come from the page hash, e.g. `#-vv&--seed=42`.
    fn from_hash(hash: &str) -> Self {
        Self::try_parse_from(hash.split(['#', '&'])).unwrap_or_else(|err| {
            log::warn!("Ignoring page arguments: {}", err);
            Self {
                threshold_ms: sandmerge_core::DOUBLE_ACTIVATION_MS,
                ..Self::default()
            }
        })
    }

    fn from_page() -> Self {
        let location_hash = gloo::utils::window()
            .location()
            .hash()
            .unwrap_or_else(|_| "".to_string());
        Self::from_hash(&location_hash)
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let args = Args::from_page();
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {}", err));
        }
    }

    log::debug!("App started");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_arguments_are_parsed() {
        let args = Args::from_hash("#-vvv&--seed=42&--threshold-ms=250");

        assert_eq!(args.seed, Some(42));
        assert_eq!(args.threshold_ms, 250);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Debug));
    }

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_hash("");

        assert_eq!(args.seed, None);
        assert_eq!(args.threshold_ms, sandmerge_core::DOUBLE_ACTIVATION_MS);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }

    #[test]
    fn malformed_hash_falls_back_to_defaults() {
        let args = Args::from_hash("#--seed=banana");

        assert_eq!(args.seed, None);
        assert_eq!(args.threshold_ms, sandmerge_core::DOUBLE_ACTIVATION_MS);
    }
}
