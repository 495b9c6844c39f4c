// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    Rng,
};

use crate::error::ConfigError;

/// Upper bound (exclusive) of every per-cell draw.
pub const DRAW_RANGE: u8 = 100;

pub const BLANK: &str = " ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Flake,
}

impl Cell {
    pub fn as_str(self, glyph: &str) -> &str {
        match self {
            Cell::Blank => BLANK,
            Cell::Flake => glyph,
        }
    }
}

/// Chance in percent that a cell becomes a flake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DensityRatio(u8);

impl DensityRatio {
    pub const MAX: u8 = DRAW_RANGE;

    pub fn new(percent: i64) -> Result<Self, ConfigError> {
        match u8::try_from(percent) {
            Ok(v) if v <= Self::MAX => Ok(Self(v)),
            _ => Err(ConfigError::RatioOutOfRange(percent)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for DensityRatio {
    fn default() -> Self {
        Self(3)
    }
}

/// Decides flake or blank for one cell at a time.
///
/// Every call draws once from `[0, 100)`; the cell is a flake when the draw is
/// strictly below the ratio, so 0 never yields a flake and 100 always does.
#[derive(Clone, Debug)]
pub struct CellGenerator<R> {
    rng: R,
    draw: Uniform<u8>,
    density: DensityRatio,
}

impl<R: Rng> CellGenerator<R> {
    pub fn new(rng: R, density: DensityRatio) -> Self {
        Self {
            rng,
            draw: Uniform::new(0, DRAW_RANGE).expect("valid range"),
            density,
        }
    }

    pub fn density(&self) -> DensityRatio {
        self.density
    }

    pub fn next_cell(&mut self) -> Cell {
        if self.draw.sample(&mut self.rng) < self.density.get() {
            Cell::Flake
        } else {
            Cell::Blank
        }
    }
}
