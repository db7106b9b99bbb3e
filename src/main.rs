//! Terminal runner (default binary).
//!
//! Builds the game from environment configuration, drives one `update` per
//! frame and exits once the game reports a status other than `None`.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::tty::IsTty;

use stc_tetris::core::{Game, GameConfig};
use stc_tetris::term::TerminalPlatform;
use stc_tetris::types::{ErrorCode, TICK_MS};

fn main() -> Result<()> {
    if !io::stdout().is_tty() {
        bail!("stdout is not a terminal");
    }

    let config = GameConfig::from_env();
    let mut game = Game::new(TerminalPlatform::from_env(), config);
    game.initialize()?;

    run(&mut game);

    // Always restore the terminal before reporting anything.
    let failure = game.platform_mut().take_failure();
    let status = game.error_code();
    let stats = *game.stats();
    game.end();

    if let Some(err) = failure {
        return Err(err.context("terminal I/O failed"));
    }
    match status {
        ErrorCode::None | ErrorCode::PlayerQuits => {
            println!(
                "score {}  level {}  lines {}  pieces {}",
                stats.score, stats.level, stats.lines, stats.total_pieces
            );
            Ok(())
        }
        code => bail!("game stopped: {} ({})", code, code as i32),
    }
}

fn run(game: &mut Game<TerminalPlatform>) {
    let tick_duration = Duration::from_millis(TICK_MS);

    while game.error_code().is_nominal() {
        let frame_start = Instant::now();

        game.update();
        game.on_change_processed();

        if let Some(rest) = tick_duration.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}
