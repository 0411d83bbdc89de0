/// Per-point colour jitter for the vegetation point cloud.
use constants::colour::{VEGETATION_ALPHA, VEGETATION_BLUE, VEGETATION_GREEN, VEGETATION_RED};
use rand::Rng;
use rand::rngs::ThreadRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// Supplies one colour per output point.
pub trait ColourSource {
    fn next_colour(&mut self) -> Colour;
}

/// Green shades drawn independently per channel from the vegetation ranges.
#[derive(Debug, Clone)]
pub struct JitterColour<R: Rng> {
    rng: R,
}

impl<R: Rng> JitterColour<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl JitterColour<ThreadRng> {
    pub fn from_thread_rng() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> ColourSource for JitterColour<R> {
    fn next_colour(&mut self) -> Colour {
        Colour {
            red: self.rng.gen_range(VEGETATION_RED),
            green: self.rng.gen_range(VEGETATION_GREEN),
            blue: self.rng.gen_range(VEGETATION_BLUE),
            alpha: VEGETATION_ALPHA,
        }
    }
}
