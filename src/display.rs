use crate::palette::{Rgb, COLOR_BG};
use crate::raster;
use clap::ValueEnum;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use std::collections::BTreeMap;
use std::io;
use std::time::{Duration, Instant};
use tui::backend::CrosstermBackend;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is what the animation draws on. It hides the implementation
/// details, so any kind of indexed-colour surface would work.
pub trait Display {
    /// size and colour depth, fixed for the session
    fn resolution(&self) -> &Resolution;

    /// whether palette entries may be rewritten while running
    fn supports_palette_cycling(&self) -> bool;

    /// write one pixel; out-of-bounds writes are ignored
    fn set_pixel(&mut self, x: i32, y: i32, color: u8);

    /// reprogram one palette entry; only meaningful when cycling is supported
    fn set_palette_entry(&mut self, index: u8, rgb: Rgb);

    /// present what has been drawn and block until the next frame is due
    fn wait_frame(&mut self) -> Result<(), io::Error>;
}

/// width, height and number of colours
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution(pub usize, pub usize, pub usize);

impl Resolution {
    pub fn width(&self) -> usize {
        self.0
    }

    pub fn height(&self) -> usize {
        self.1
    }

    pub fn color_count(&self) -> usize {
        self.2
    }

    pub fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.0 && (y as usize) < self.1
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    // canvas y grows upwards, so rows are drawn at negative y
    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }
}

/// the two VGA modes the animation knows how to run in
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DisplayMode {
    /// 256 colour mode (320x200) with palette cycling
    Lo,
    /// 16 colour mode (640x480) with a fixed palette
    Hi,
}

impl DisplayMode {
    pub fn resolution(&self) -> Resolution {
        match self {
            DisplayMode::Lo => Resolution(320, 200, 256),
            DisplayMode::Hi => Resolution(640, 480, 16),
        }
    }

    pub fn supports_palette_cycling(&self) -> bool {
        matches!(self, DisplayMode::Lo)
    }
}

/// one colour index per pixel, row-major
pub struct Framebuffer {
    pixels: Box<[u8]>,
    resolution: Resolution,
}

impl Framebuffer {
    pub fn new(resolution: Resolution) -> Self {
        Framebuffer {
            pixels: vec![COLOR_BG; resolution.pixel_count()].into_boxed_slice(),
            resolution,
        }
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn set(&mut self, x: i32, y: i32, color: u8) {
        if self.resolution.contains(x, y) {
            self.pixels[y as usize * self.resolution.0 + x as usize] = color;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if self.resolution.contains(x, y) {
            Some(self.pixels[y as usize * self.resolution.0 + x as usize])
        } else {
            None
        }
    }

    /// every non-background pixel as canvas coordinates plus its colour
    fn points(&self) -> impl Iterator<Item = (f64, f64, u8)> + '_ {
        let mut count = self.resolution.pixel_count();
        let w = self.resolution.0;
        std::iter::from_fn(move || {
            while count > 0 {
                count -= 1;
                let color = self.pixels[count];
                if color != COLOR_BG {
                    return Some((
                        (count % w) as f64,        // x
                        -1.0 * (count / w) as f64, // y
                        color,
                    ));
                }
            }
            None
        })
    }

    /// points grouped by colour, ready to hand to the canvas one layer each
    fn layers(&self) -> BTreeMap<u8, Vec<(f64, f64)>> {
        let mut layers: BTreeMap<u8, Vec<(f64, f64)>> = BTreeMap::new();
        for (x, y, color) in self.points() {
            layers.entry(color).or_default().push((x, y));
        }
        layers
    }
}

/// indexed-colour display in a terminal, rendered using TUI and crossterm
pub struct TermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    framebuffer: Framebuffer,
    mode: DisplayMode,
    // None until reprogrammed; the terminal's own indexed colour is used
    palette: Vec<Option<Rgb>>,
    frame_interval: Duration,
    last_frame: Instant,
}

impl TermDisplay {
    pub fn new(mode: DisplayMode, frame_interval: Duration) -> Result<TermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let resolution = mode.resolution();
        // from here on Drop puts the screen back, whatever fails next
        let mut display = TermDisplay {
            terminal,
            framebuffer: Framebuffer::new(resolution),
            mode,
            palette: vec![None; resolution.color_count()],
            frame_interval,
            last_frame: Instant::now(),
        };
        display.terminal.clear()?;
        Ok(display)
    }

    fn term_color(&self, index: u8) -> Color {
        match self.palette[index as usize] {
            Some(rgb) if self.mode.supports_palette_cycling() => {
                let (r, g, b) = rgb.to_rgb8();
                Color::Rgb(r, g, b)
            }
            _ => Color::Indexed(index),
        }
    }

    fn render(&mut self) -> Result<(), io::Error> {
        let layers: Vec<(Color, Vec<(f64, f64)>)> = self
            .framebuffer
            .layers()
            .into_iter()
            .map(|(index, coords)| (self.term_color(index), coords))
            .collect();
        let resolution = *self.framebuffer.resolution();
        let title = match self.mode {
            DisplayMode::Lo => "QIX lines (lo)",
            DisplayMode::Hi => "QIX lines (hi)",
        };

        self.terminal.draw(|f| {
            let size = f.size();
            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(resolution.x_bounds())
                .y_bounds(resolution.y_bounds())
                .marker(Marker::Braille)
                .paint(|ctx| {
                    for (color, coords) in &layers {
                        ctx.draw(&Points {
                            coords: coords.as_slice(),
                            color: *color,
                        });
                    }
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

impl Drop for TermDisplay {
    fn drop(&mut self) {
        // back to "text mode"
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show, LeaveAlternateScreen);
    }
}

impl Display for TermDisplay {
    fn resolution(&self) -> &Resolution {
        self.framebuffer.resolution()
    }

    fn supports_palette_cycling(&self) -> bool {
        self.mode.supports_palette_cycling()
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        self.framebuffer.set(x, y, color);
    }

    fn set_palette_entry(&mut self, index: u8, rgb: Rgb) {
        if let Some(entry) = self.palette.get_mut(index as usize) {
            *entry = Some(rgb);
        }
    }

    fn wait_frame(&mut self) -> Result<(), io::Error> {
        self.render()?;
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.frame_interval {
            spin_sleep::sleep(self.frame_interval - elapsed);
        }
        self.last_frame = Instant::now();
        Ok(())
    }
}

/// fill the screen with one box per colour index, in a square grid
pub fn draw_test_card(display: &mut dyn Display) {
    let resolution = *display.resolution();
    let colors = resolution.color_count();
    let mut side = 1;
    while side * side < colors {
        side += 1;
    }
    let cell_w = (resolution.width() / side) as i32;
    let cell_h = (resolution.height() / side) as i32;
    for c in 0..colors {
        let x1 = (c % side) as i32 * cell_w;
        let y1 = (c / side) as i32 * cell_h;
        raster::fill_box(x1, y1, x1 + cell_w, y1 + cell_h, c as u8, display);
    }
}

/// useful for testing non-display routines
pub struct DummyDisplay {
    framebuffer: Framebuffer,
    mode: DisplayMode,
    palette: Vec<Rgb>,
    palette_writes: usize,
    frames: usize,
}

impl DummyDisplay {
    pub fn new(mode: DisplayMode) -> DummyDisplay {
        let resolution = mode.resolution();
        DummyDisplay {
            framebuffer: Framebuffer::new(resolution),
            mode,
            palette: vec![Rgb::BLACK; resolution.color_count()],
            palette_writes: 0,
            frames: 0,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        self.framebuffer.get(x, y)
    }

    /// how many pixels are not background
    pub fn lit_pixels(&self) -> usize {
        self.framebuffer.points().count()
    }

    pub fn palette_entry(&self, index: u8) -> Rgb {
        self.palette[index as usize]
    }

    pub fn palette_writes(&self) -> usize {
        self.palette_writes
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Display for DummyDisplay {
    fn resolution(&self) -> &Resolution {
        self.framebuffer.resolution()
    }

    fn supports_palette_cycling(&self) -> bool {
        self.mode.supports_palette_cycling()
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        self.framebuffer.set(x, y, color);
    }

    fn set_palette_entry(&mut self, index: u8, rgb: Rgb) {
        if let Some(entry) = self.palette.get_mut(index as usize) {
            *entry = rgb;
            self.palette_writes += 1;
        }
    }

    fn wait_frame(&mut self) -> Result<(), io::Error> {
        self.frames += 1;
        Ok(())
    }
}
