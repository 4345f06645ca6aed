use rand::Rng;

/// a drawable segment: two endpoints plus a palette index
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Line {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
    pub color: u8,
}

impl Line {
    pub fn new(x1: u16, y1: u16, x2: u16, y2: u16, color: u8) -> Self {
        Line {
            x1,
            y1,
            x2,
            y2,
            color,
        }
    }

    /// random endpoints inside `width` x `height`
    pub fn random(width: u16, height: u16, color: u8, rng: &mut impl Rng) -> Self {
        Line {
            x1: rng.gen_range(0..width),
            y1: rng.gen_range(0..height),
            x2: rng.gen_range(0..width),
            y2: rng.gen_range(0..height),
            color,
        }
    }

    /// coordinates in x1, y1, x2, y2 order
    pub fn coords(&self) -> [u16; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    pub fn set_coords(&mut self, coords: [u16; 4]) {
        [self.x1, self.y1, self.x2, self.y2] = coords;
    }

    /// copy of this line in another colour; used to erase with the background
    pub fn with_color(mut self, color: u8) -> Self {
        self.color = color;
        self
    }
}

/// per-coordinate displacement amplitude; the sign is the direction of travel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Velocity(pub [i16; 4]);

impl Velocity {
    pub fn uniform(step: i16) -> Self {
        Velocity([step; 4])
    }
}

/// phase angles that can be fed to sin()
pub const MAX_DEGREE: u16 = 180;

/// per-coordinate phase angle in degrees, always within [0, 180)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phase(pub [u16; 4]);

impl Phase {
    pub fn random(rng: &mut impl Rng) -> Self {
        Phase([
            rng.gen_range(0..MAX_DEGREE),
            rng.gen_range(0..MAX_DEGREE),
            rng.gen_range(0..MAX_DEGREE),
            rng.gen_range(0..MAX_DEGREE),
        ])
    }
}
