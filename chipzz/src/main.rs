use std::path::PathBuf;

use clap::Parser;

use chipzz_core::constants::STEPS_PER_FRAME;
use chipzz_display::DEFAULT_SCALE;

use crate::run::{run, Config};

/// Largest scale whose window still fits a 4K screen
const MAX_SCALE: i64 = 64;

mod audio;
mod keymap;
mod run;

/// Runs a CHIP-8 ROM in an SDL2 window
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the ROM image
    rom: PathBuf,

    /// Window pixels per CHIP-8 pixel
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SCALE,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE)
    )]
    scale: u32,

    /// Instructions executed per 60Hz frame
    #[arg(long, default_value_t = STEPS_PER_FRAME)]
    steps_per_frame: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(Config {
        rom: args.rom,
        scale: args.scale,
        steps_per_frame: args.steps_per_frame,
    })
}
