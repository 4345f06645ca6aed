use crate::error::QixError;
use rand::Rng;

/// channels are 6 bits wide, as on the VGA DAC
pub const CHANNEL_LEVELS: u8 = 64;

/// colour index reserved for the background; the cycling walk never touches it
pub const COLOR_BG: u8 = 0;

/// one palette entry, each channel in 0..64
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb {
            r: r % CHANNEL_LEVELS,
            g: g % CHANNEL_LEVELS,
            b: b % CHANNEL_LEVELS,
        }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    /// nudge every channel independently by -1, 0 or +1, wrapping at 64
    pub fn drift(&self, rng: &mut impl Rng) -> Rgb {
        let levels = CHANNEL_LEVELS as u16;
        let mut step = |c: u8| ((c as u16 + rng.gen_range(0..3) + levels - 1) % levels) as u8;
        Rgb {
            r: step(self.r),
            g: step(self.g),
            b: step(self.b),
        }
    }

    /// widen to 8 bits per channel for a true-colour terminal
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let widen = |c: u8| (c << 2) | (c >> 4);
        (widen(self.r), widen(self.g), widen(self.b))
    }
}

/// whether the display lets us reprogram colours on the fly
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteMode {
    /// one palette slot is rewritten per colour request
    Cycling,
    /// colours are fixed; pick any non-background index
    Fixed,
}

impl PaletteMode {
    /// cycle when the display can reprogram its palette, otherwise stay fixed
    pub fn for_display(supports_palette_cycling: bool) -> Self {
        if supports_palette_cycling {
            PaletteMode::Cycling
        } else {
            PaletteMode::Fixed
        }
    }
}

/// indexed colour table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: Box<[Rgb]>,
}

impl Palette {
    /// all black, like the palette is reset at the start of a session
    pub fn black(colors: usize) -> Self {
        Palette {
            entries: vec![Rgb::BLACK; colors].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u8) -> Rgb {
        self.entries[index as usize]
    }

    fn set(&mut self, index: u8, rgb: Rgb) {
        self.entries[index as usize] = rgb;
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Rgb)> + '_ {
        self.entries.iter().enumerate().map(|(i, c)| (i as u8, *c))
    }
}

/// Hands out the colour for each new line.
///
/// In cycling mode the colour of the next slot is derived from the slot the
/// cursor currently points at, so consecutive lines slowly wander through
/// colour space rather than jumping around.
pub struct PaletteCycler {
    palette: Palette,
    mode: PaletteMode,
    cursor: u8,
}

impl PaletteCycler {
    pub fn new(colors: usize, mode: PaletteMode) -> Result<Self, QixError> {
        if !(2..=256).contains(&colors) {
            return Err(QixError::Config(format!(
                "colour count must be between 2 and 256, got {}",
                colors
            )));
        }
        Ok(PaletteCycler {
            palette: Palette::black(colors),
            mode,
            cursor: COLOR_BG,
        })
    }

    pub fn mode(&self) -> PaletteMode {
        self.mode
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// pick the colour for the next line, mutating at most one palette slot
    pub fn next(&mut self, rng: &mut impl Rng) -> u8 {
        let colors = self.palette.len();
        match self.mode {
            PaletteMode::Fixed => rng.gen_range(1..colors) as u8,
            PaletteMode::Cycling => {
                let next = self.palette.get(self.cursor).drift(rng);
                self.cursor = ((self.cursor as usize + 1) % colors) as u8;
                if self.cursor == COLOR_BG {
                    self.cursor = 1;
                }
                self.palette.set(self.cursor, next);
                self.cursor
            }
        }
    }
}
