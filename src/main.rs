use clap::Parser;
use log::info;
use std::error::Error;

use qixlines::animation::{self, Animation, Config};
use qixlines::display::{DisplayMode, TermDisplay};
use qixlines::input::StdinInput;

/// Draw QIX lines with drifting colours until a key is pressed.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// display mode
    #[arg(value_enum, default_value_t = DisplayMode::Lo)]
    mode: DisplayMode,

    /// how many lines stay on screen
    #[arg(long, default_value_t = animation::HISTORY_SIZE)]
    history: usize,

    /// average phase advance per tick, in degrees
    #[arg(long, default_value_t = animation::STEP)]
    step: u16,

    /// random variation of the phase advance, in degrees
    #[arg(long, default_value_t = animation::STEP_RANGE)]
    step_range: u16,

    /// vertical retraces (at 70Hz) to wait between ticks
    #[arg(long, default_value_t = animation::RETRACES_PER_TICK)]
    retraces: u32,

    /// seed for a reproducible animation
    #[arg(long)]
    seed: Option<u64>,

    /// stop after this many ticks
    #[arg(long)]
    frames: Option<u64>,

    /// show every colour of the mode instead of animating
    #[arg(long)]
    test_card: bool,

    /// draw the Bresenham sweep demo instead of animating
    #[arg(long, conflicts_with = "test_card")]
    sweep: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            history_size: self.history,
            step: self.step,
            step_range: self.step_range,
            retraces_per_tick: self.retraces,
            seed: self.seed,
            max_ticks: self.frames,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    // validate before touching the terminal, so errors stay readable
    let config = args.config();
    config.validate()?;
    info!("starting in {:?} mode with {:?}", args.mode, config);

    let mut display = TermDisplay::new(args.mode, config.frame_interval())?;
    let mut input = StdinInput::new()?;
    if args.test_card {
        animation::run_test_card(&mut display, &mut input)?;
    } else if args.sweep {
        animation::run_sweep(&mut display, &mut input)?;
    } else {
        Animation::new(&mut display, &mut input, &config)?.run()?;
    }
    Ok(())
}
