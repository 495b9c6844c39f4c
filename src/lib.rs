// Copyright (c) 2026 rezky_nightky

pub mod cell;
pub mod config;
pub mod error;
pub mod frame;
pub mod palette;
pub mod render;
pub mod terminal;

pub use cell::{Cell, CellGenerator, DensityRatio};
pub use config::{Args, Config};
pub use error::{ConfigError, DimensionError, SnowError};
pub use frame::{Dimensions, Frame, FrameBuilder};
pub use render::{RunSummary, Snowfall, StopReason, StopSignal};
pub use terminal::{DimensionProvider, FrameSink, Screen};
