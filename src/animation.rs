use crate::display::{draw_test_card, Display, Resolution};
use crate::error::QixError;
use crate::history::HistoryRing;
use crate::input::Input;
use crate::line::{Line, MAX_DEGREE};
use crate::motion::MotionEngine;
use crate::palette::{PaletteCycler, PaletteMode, COLOR_BG};
use crate::raster;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// how many lines stay on screen
pub const HISTORY_SIZE: usize = 10;
/// average phase advance per tick, in degrees
pub const STEP: u16 = 8;
/// the phase advance varies by up to this much either way
pub const STEP_RANGE: u16 = 6;
/// vertical retraces to wait between ticks
pub const RETRACES_PER_TICK: u32 = 3;
/// refresh rate the retrace pacing is modelled on
pub const RETRACE_HZ: u32 = 70;

/// tunables for a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub history_size: usize,
    pub step: u16,
    pub step_range: u16,
    pub retraces_per_tick: u32,
    /// fixed seed for a reproducible run; entropy otherwise
    pub seed: Option<u64>,
    /// stop after this many ticks even if nobody asks
    pub max_ticks: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            history_size: HISTORY_SIZE,
            step: STEP,
            step_range: STEP_RANGE,
            retraces_per_tick: RETRACES_PER_TICK,
            seed: None,
            max_ticks: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), QixError> {
        if self.history_size == 0 {
            return Err(QixError::Config(
                "history size must be at least 1".to_string(),
            ));
        }
        if self.retraces_per_tick == 0 {
            return Err(QixError::Config(
                "must wait at least one retrace per tick".to_string(),
            ));
        }
        if self.step as u32 + self.step_range as u32 >= MAX_DEGREE as u32 {
            return Err(QixError::Config(format!(
                "step {} plus step range {} must stay below {} degrees",
                self.step, self.step_range, MAX_DEGREE
            )));
        }
        Ok(())
    }

    /// time budget for one tick
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(self.retraces_per_tick as f64 / RETRACE_HZ as f64)
    }
}

/// One animation session. Owns all of the moving state and borrows the
/// devices it draws on and listens to.
pub struct Animation<'a> {
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    engine: MotionEngine,
    cycler: PaletteCycler,
    history: HistoryRing,
    rng: StdRng,
    max_ticks: Option<u64>,
    ticks: u64,
}

impl<'a> Animation<'a> {
    pub fn new(
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        config: &Config,
    ) -> Result<Animation<'a>, QixError> {
        config.validate()?;

        let resolution = *display.resolution();
        let bounds = match (
            u16::try_from(resolution.width()),
            u16::try_from(resolution.height()),
        ) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => {
                return Err(QixError::Config(format!(
                    "unsupported display size {}x{}",
                    resolution.width(),
                    resolution.height()
                )))
            }
        };
        let mode = PaletteMode::for_display(display.supports_palette_cycling());
        let cycler = PaletteCycler::new(resolution.color_count(), mode)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let engine = MotionEngine::random(
            bounds,
            config.step,
            config.step_range,
            COLOR_BG,
            &mut rng,
        );
        let history = HistoryRing::new(config.history_size, *engine.line())?;

        // start from a black palette
        if mode == PaletteMode::Cycling {
            for (index, rgb) in cycler.palette().iter() {
                display.set_palette_entry(index, rgb);
            }
        }

        Ok(Animation {
            display,
            input,
            engine,
            cycler,
            history,
            rng,
            max_ticks: config.max_ticks,
            ticks: 0,
        })
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn current_line(&self) -> &Line {
        self.engine.line()
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    /// erase the oldest line, move, draw the new line, wait for the next frame
    pub fn tick(&mut self) -> Result<(), QixError> {
        let evicted = self.history.push_and_get_evicted(*self.engine.line());
        raster::draw_line(&evicted.with_color(COLOR_BG), &mut *self.display);

        let color = self.cycler.next(&mut self.rng);
        if self.cycler.mode() == PaletteMode::Cycling {
            self.display
                .set_palette_entry(color, self.cycler.palette().get(color));
        }
        self.engine.advance(color, &mut self.rng);
        raster::draw_line(self.engine.line(), &mut *self.display);

        self.display.wait_frame()?;
        self.ticks += 1;
        Ok(())
    }

    /// tick until cancelled (or `max_ticks` is reached); returns the tick count
    pub fn run(&mut self) -> Result<u64, QixError> {
        let resolution = *self.display.resolution();
        info!(
            "animating {}x{} with {} colours, palette {:?}, {} lines of history",
            resolution.width(),
            resolution.height(),
            resolution.color_count(),
            self.cycler.mode(),
            self.history.capacity()
        );
        while !self.input.cancel_requested()? {
            if matches!(self.max_ticks, Some(max) if self.ticks >= max) {
                break;
            }
            self.tick()?;
        }
        info!("stopped after {} ticks", self.ticks);
        Ok(self.ticks)
    }
}

/// colour the sweep is drawn in
pub const SWEEP_COLOR: u8 = 1;

/// The lines of the sweep demo, in drawing order: anchored at the top-left
/// corner, the far end slides down the right edge and then left along the
/// bottom edge, one degree of a quarter sine per line.
pub fn sweep_lines(resolution: &Resolution) -> Vec<Line> {
    let right = resolution.width().saturating_sub(1) as f64;
    let bottom = resolution.height().saturating_sub(1) as f64;
    let mut lines = Vec::with_capacity(182);

    let (mut x2, mut y2) = (right as u16, 0u16);
    for deg in 0..=90u16 {
        lines.push(Line::new(0, 0, x2, y2, SWEEP_COLOR));
        y2 = (bottom * (deg as f64).to_radians().sin()) as u16;
    }
    y2 = bottom as u16;
    for deg in 90..=180u16 {
        lines.push(Line::new(0, 0, x2, y2, SWEEP_COLOR));
        x2 = (right * (deg as f64).to_radians().sin()) as u16;
    }
    lines
}

/// draw the sweep one line per frame, then hold it until cancelled
pub fn run_sweep(display: &mut dyn Display, input: &mut dyn Input) -> Result<(), QixError> {
    let resolution = *display.resolution();
    for line in sweep_lines(&resolution) {
        if input.cancel_requested()? {
            return Ok(());
        }
        raster::draw_line(&line, display);
        display.wait_frame()?;
    }
    while !input.cancel_requested()? {
        display.wait_frame()?;
    }
    Ok(())
}

/// show every colour until cancelled
pub fn run_test_card(display: &mut dyn Display, input: &mut dyn Input) -> Result<(), QixError> {
    draw_test_card(display);
    while !input.cancel_requested()? {
        display.wait_frame()?;
    }
    Ok(())
}
