use std::fs::File;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::SnakeError;

/// Routes `log` output to `path`; the terminal is owned by the game.
pub fn init(path: &Path, verbose: bool) -> Result<(), SnakeError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = File::create(path)?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}
