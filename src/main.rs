//! Tetratui — classic falling-block puzzle game in the terminal.

mod app;
mod board;
mod game;
mod input;
mod piece;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use theme::Theme;

/// Options that shape a session: starting speed, bag seed, starting colours.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub base_tick: f32,
    pub seed: Option<u64>,
    pub initial_theme: Theme,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut initial_theme = Theme::initial();
    if let Some(hex) = args.empty_color.as_deref() {
        initial_theme.empty = theme::parse_hex(hex)?;
    }
    if let Some(hex) = args.filled_color.as_deref() {
        initial_theme.filled = theme::parse_hex(hex)?;
    }
    if let Some(hex) = args.background_color.as_deref() {
        initial_theme.background = theme::parse_hex(hex)?;
    }
    let config = GameConfig {
        base_tick: args.tick,
        seed: args.seed,
        initial_theme,
    };
    let mut app = App::new(&config);
    app.run()?;
    Ok(())
}

/// Classic falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "tetratui",
    version,
    about = "Classic falling-block puzzle in the terminal. Complete horizontal lines to score; the game speeds up and changes colours as you level.",
    long_about = "Tetratui is a terminal rendition of the classic falling-block puzzle.\n\n\
        Pieces drop from the top of the board; complete horizontal lines to clear them \
        and score. Every 50 points per level the game levels up: gravity gets faster and \
        the board picks a new colour theme. Stack past the top and the board wipes clean.\n\n\
        CONTROLS:\n  a / Left    Move left     d / Right   Move right\n  r / Up      Rotate        s / Down    Soft drop\n  q / Esc     Quit\n\n\
        MOUSE/TOUCH:\n  Click left/right half   Move        Scroll wheel   Rotate\n  Hold in bottom quarter  Soft drop\n\n\
        Hold a movement key to auto-repeat. Use --seed for a reproducible piece order."
)]
pub struct Args {
    /// Gravity interval at level 1, in seconds.
    #[arg(long, default_value = "0.8", value_name = "SECS")]
    pub tick: f32,

    /// Seed for the 7-bag randomizer; OS entropy when not set.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Empty-cell colour of the starting theme ("#RRGGBB").
    #[arg(long, value_name = "HEX")]
    pub empty_color: Option<String>,

    /// Filled-cell colour of the starting theme ("#RRGGBB").
    #[arg(long, value_name = "HEX")]
    pub filled_color: Option<String>,

    /// Background colour of the starting theme ("#RRGGBB").
    #[arg(long, value_name = "HEX")]
    pub background_color: Option<String>,
}
