// src/cli.rs
// Command line arguments. The binary takes exactly
// `--config <path> --betting-amount <amount>`, in that order.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "scratch-game")]
#[command(about = "Scratch Game - Generate a scratch card and compute its reward")]
pub struct Args {
    /// Path of the game configuration (JSON)
    #[arg(long)]
    pub config: PathBuf,

    /// Amount wagered on this card
    #[arg(long)]
    pub betting_amount: f64,
}

const CONFIG_FLAG: &str = "--config";
const BETTING_AMOUNT_FLAG: &str = "--betting-amount";

/// Parse the raw argument list, program name included.
///
/// Only the fixed four-argument sequence is accepted; reordered flags,
/// `--flag=value` spellings and any other arity give `None`, as does an
/// amount that is not a number.
pub fn parse_args(args: &[String]) -> Option<Args> {
    match args {
        [_, config, _, amount, _] if config == CONFIG_FLAG && amount == BETTING_AMOUNT_FLAG => {
            Args::try_parse_from(args).ok()
        }
        _ => None,
    }
}
