// src/main.rs
//
// Scratch game command line entry point.
// Loads the game configuration, plays one card for the given bet and prints
// the result document as JSON on stdout. Logs go to stderr.
//
// CLI Options:
// - --config: path of the JSON game configuration
// - --betting-amount: amount wagered on this card

use std::error::Error;

use scratch_game::cli;
use scratch_game::defs::USAGE;
use scratch_game::logging::log_error;
use scratch_game::settings::Settings;
use scratch_game::{GameConfig, ScratchGame};

fn main() -> Result<(), Box<dyn Error>> {
    // Bad arguments only print the usage line; no result is produced
    let raw: Vec<String> = std::env::args().collect();
    let Some(args) = cli::parse_args(&raw) else {
        println!("{USAGE}");
        return Ok(());
    };

    // Applies the configured log level before anything else is logged
    let settings = Settings::load_or_default();

    let config = GameConfig::from_file(&args.config).inspect_err(|e| log_error(&e.to_string()))?;
    let mut rng = settings.rng();
    let outcome = ScratchGame::new(&config)
        .play(args.betting_amount, &mut rng)
        .inspect_err(|e| log_error(&e.to_string()))?;

    println!("{}", outcome.to_json()?);
    Ok(())
}
