//! QIX lines: a line that wanders around the screen, leaving a short fading
//! trail of itself, with colours slowly drifting through the palette.
//!
//! ## Design
//!
//! * one line, four coordinates, each oscillating on its own
//! * integer Bresenham for drawing and erasing; erasing is drawing in the
//!   background colour
//! * remember the last few lines in a ring so the oldest can be erased
//! * abstract the display so can plug alternatives; starting with TUI in-console
//! * input device, with trait for "please stop"
//! * everything random comes from one seedable generator, so a run can be
//!   replayed exactly
//!
//! Model
//!
//! Animation
//!  |-- display, input, config
//!  |-- motion engine(line, velocity, phase, bounds)
//!  |-- palette cycler(palette, cursor)
//!  |-- history ring(last K lines)
//!  `-- main loop, once per tick
//!       |-- evicted = history.push(line as drawn last tick)
//!       |-- draw evicted in background colour
//!       |-- colour = palette.next(); engine.advance(colour)
//!       |-- draw line
//!       `-- display.wait_frame()
//!
//! Palette cycling only works on displays that can reprogram their palette
//! (the 256 colour mode); otherwise each line just gets a random colour.
pub mod animation;
pub mod display;
pub mod error;
pub mod history;
pub mod input;
pub mod line;
pub mod motion;
pub mod palette;
pub mod raster;
