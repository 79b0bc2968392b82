// lib.rs
// Library modules for the scratch game reward engine

pub mod cli;
pub mod defs;
pub mod error;
pub mod logging;
pub mod settings;
pub mod weighted;
pub mod config;
pub mod matrix;
pub mod tally;
pub mod combination;
pub mod reward;
pub mod game;

pub use config::GameConfig;
pub use error::{Result, ScratchError};
pub use game::{GameOutcome, ScratchGame};
