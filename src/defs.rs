// src/defs.rs
// Shared identifiers and constants for the scratch game engine.

pub type SymbolId = String;
pub type CombinationId = String;
pub type Weight = u32;

// Runtime settings file, relative to the working directory
pub const SETTINGS_PATH: &str = "conf/scratch.conf";

pub const USAGE: &str = "Usage: scratch-game --config <config_file> --betting-amount <amount>";
