// Copyright (c) 2026 rezky_nightky

use std::io::{self, stdout, Stdout, Write};

use crossterm::{
    style::{Attribute, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    ExecutableCommand, QueueableCommand,
};

use crate::error::DimensionError;
use crate::frame::{Dimensions, Frame};
use crate::palette::SnowColor;

/// Source of the terminal size the render loop draws into.
pub trait DimensionProvider {
    fn dimensions(&mut self) -> Result<Dimensions, DimensionError>;
}

impl<P: DimensionProvider + ?Sized> DimensionProvider for Box<P> {
    fn dimensions(&mut self) -> Result<Dimensions, DimensionError> {
        (**self).dimensions()
    }
}

/// Asks the controlling terminal through crossterm (ioctl on unix, console
/// API on windows).
#[cfg(any(unix, windows))]
#[derive(Clone, Copy, Debug, Default)]
pub struct HostSize;

#[cfg(any(unix, windows))]
impl DimensionProvider for HostSize {
    fn dimensions(&mut self) -> Result<Dimensions, DimensionError> {
        let (columns, rows) = crossterm::terminal::size().map_err(DimensionError::Query)?;
        Dimensions::new(rows, columns)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Unsupported {
    pub os: &'static str,
}

impl DimensionProvider for Unsupported {
    fn dimensions(&mut self) -> Result<Dimensions, DimensionError> {
        Err(DimensionError::Unsupported(self.os))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedSize(pub Dimensions);

impl DimensionProvider for FixedSize {
    fn dimensions(&mut self) -> Result<Dimensions, DimensionError> {
        Ok(self.0)
    }
}

/// Picks the size source for the host this binary was built for.
pub fn host_provider() -> Box<dyn DimensionProvider> {
    #[cfg(any(unix, windows))]
    {
        Box::new(HostSize)
    }
    #[cfg(not(any(unix, windows)))]
    {
        Box::new(Unsupported {
            os: std::env::consts::OS,
        })
    }
}

/// Where finished frames go.
pub trait FrameSink {
    /// Writes the whole frame plus a trailing newline before returning.
    fn emit(&mut self, frame: &Frame) -> io::Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn emit(&mut self, frame: &Frame) -> io::Result<()> {
        (**self).emit(frame)
    }
}

/// Line-oriented output: frames scroll up the terminal like plain prints.
/// Colors are set once up front and reset when the screen is dropped.
pub struct Screen<W: Write> {
    out: W,
    styled: bool,
}

impl Screen<Stdout> {
    pub fn stdout(
        foreground: Option<SnowColor>,
        background: Option<SnowColor>,
    ) -> io::Result<Self> {
        Self::new(stdout(), foreground, background)
    }
}

impl<W: Write> Screen<W> {
    pub fn new(
        mut out: W,
        foreground: Option<SnowColor>,
        background: Option<SnowColor>,
    ) -> io::Result<Self> {
        if let Some(fg) = foreground {
            out.queue(SetForegroundColor(fg.color()))?;
        }
        if let Some(bg) = background {
            out.queue(SetBackgroundColor(bg.color()))?;
        }
        out.flush()?;
        Ok(Self {
            out,
            styled: foreground.is_some() || background.is_some(),
        })
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> FrameSink for Screen<W> {
    fn emit(&mut self, frame: &Frame) -> io::Result<()> {
        frame.write_to(&mut self.out)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> Drop for Screen<W> {
    fn drop(&mut self) {
        if !self.styled {
            return;
        }
        let _ = self.out.queue(SetAttribute(Attribute::Reset));
        let _ = self.out.queue(ResetColor);
        let _ = self.out.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
