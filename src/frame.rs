// Copyright (c) 2026 rezky_nightky

use std::fmt;
use std::io::{self, Write};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::cell::{Cell, CellGenerator, DensityRatio, BLANK};
use crate::error::DimensionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: u16,
    pub columns: u16,
}

impl Dimensions {
    /// Both sides must be positive; a zero-sized terminal is reported rather
    /// than rendered.
    pub fn new(rows: u16, columns: u16) -> Result<Self, DimensionError> {
        if rows == 0 || columns == 0 {
            return Err(DimensionError::Empty { rows, columns });
        }
        Ok(Self { rows, columns })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// One rendered screen. Rows are independent and all `width` cells wide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    rows: Vec<String>,
}

impl Frame {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<String> {
        self.rows
    }

    /// Rows joined by `\n`, without a trailing newline.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.write_all(b"\n")?;
            }
            out.write_all(row.as_bytes())?;
        }
        Ok(())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

/// Builds frames from a cell generator and a glyph.
///
/// A row is produced by filling a scratch buffer of `columns` cells by index
/// and then joining it into a string sized up front, so building is linear in
/// the width. The scratch buffer is kept between rows.
#[derive(Clone, Debug)]
pub struct FrameBuilder<R> {
    cells: CellGenerator<R>,
    glyph: String,
    scratch: Vec<Cell>,
}

impl FrameBuilder<StdRng> {
    pub fn seeded(seed: u64, density: DensityRatio, glyph: impl Into<String>) -> Self {
        Self::new(StdRng::seed_from_u64(seed), density, glyph)
    }

    pub fn from_os_rng(density: DensityRatio, glyph: impl Into<String>) -> Self {
        Self::new(StdRng::from_os_rng(), density, glyph)
    }
}

impl<R: Rng> FrameBuilder<R> {
    pub fn new(rng: R, density: DensityRatio, glyph: impl Into<String>) -> Self {
        Self {
            cells: CellGenerator::new(rng, density),
            glyph: glyph.into(),
            scratch: Vec::new(),
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn density(&self) -> DensityRatio {
        self.cells.density()
    }

    pub fn row(&mut self, columns: u16) -> String {
        let columns = columns as usize;
        self.scratch.clear();
        self.scratch.resize(columns, Cell::Blank);
        for slot in self.scratch.iter_mut() {
            *slot = self.cells.next_cell();
        }

        let unit = self.glyph.len().max(BLANK.len());
        let mut line = String::with_capacity(columns * unit);
        for cell in &self.scratch {
            line.push_str(cell.as_str(&self.glyph));
        }
        line
    }

    pub fn frame(&mut self, dims: Dimensions) -> Frame {
        self.frame_of(dims.rows, dims.columns)
    }

    /// Same as [`FrameBuilder::frame`] but accepts empty sizes.
    pub fn frame_of(&mut self, rows: u16, columns: u16) -> Frame {
        let rows = (0..rows).map(|_| self.row(columns)).collect();
        Frame {
            width: columns,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(percent: i64, glyph: &str) -> FrameBuilder<StdRng> {
        FrameBuilder::seeded(0x5eed, DensityRatio::new(percent).unwrap(), glyph)
    }

    #[test]
    fn row_has_exactly_the_requested_width() {
        let mut b = builder(3, "*");
        let row = b.row(30);
        assert_eq!(row.chars().count(), 30);
        assert!(row.chars().all(|c| c == '*' || c == ' '));
    }

    #[test]
    fn row_width_holds_for_every_ratio() {
        for percent in [0, 1, 3, 50, 99, 100] {
            let mut b = builder(percent, "*");
            for columns in [0u16, 1, 2, 79, 80, 257] {
                assert_eq!(b.row(columns).chars().count(), columns as usize);
            }
        }
    }

    #[test]
    fn multibyte_glyph_counts_as_one_unit() {
        let mut b = builder(40, "❄");
        let row = b.row(64);
        assert_eq!(row.chars().count(), 64);
        assert!(row.chars().all(|c| c == '❄' || c == ' '));
    }

    #[test]
    fn wide_row_is_sized_up_front() {
        let mut b = builder(3, "*");
        let row = b.row(4000);
        assert_eq!(row.len(), 4000);
        assert!(row.capacity() >= 4000);
    }

    #[test]
    fn zero_ratio_frame_is_all_blank() {
        let mut b = builder(0, "*");
        let frame = b.frame(Dimensions::new(5, 10).unwrap());
        assert_eq!(frame.rows(), vec![" ".repeat(10); 5].as_slice());
        assert_eq!(frame.width(), 10);
    }

    #[test]
    fn full_ratio_frame_is_all_glyph() {
        let mut b = builder(100, "#");
        let frame = b.frame(Dimensions::new(4, 6).unwrap());
        assert_eq!(frame.height(), 4);
        assert!(frame.rows().iter().all(|r| r == "######"));
    }

    #[test]
    fn frame_has_exactly_the_requested_rows() {
        let mut b = builder(25, "*");
        for (rows, columns) in [(1, 1), (3, 17), (24, 80), (0, 5), (5, 0)] {
            let frame = b.frame_of(rows, columns);
            assert_eq!(frame.height(), rows as usize);
            for row in frame.rows() {
                assert_eq!(row.chars().count(), columns as usize);
            }
        }
    }

    #[test]
    fn printing_keeps_row_count() {
        let mut b = builder(10, "*");
        let frame = b.frame(Dimensions::new(7, 12).unwrap());
        let text = frame.to_string();
        assert_eq!(text.split('\n').count(), 7);

        let mut buf = Vec::new();
        frame.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), text);
    }

    #[test]
    fn same_seed_gives_same_frame() {
        let dims = Dimensions::new(8, 40).unwrap();
        let a = builder(20, "*").frame(dims);
        let b = builder(20, "*").frame(dims);
        assert_eq!(a, b);
    }

    #[test]
    fn rows_within_a_frame_differ() {
        let mut b = builder(50, "*");
        let frame = b.frame(Dimensions::new(4, 64).unwrap());
        let first = &frame.rows()[0];
        assert!(frame.rows().iter().skip(1).any(|r| r != first));
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        assert!(matches!(
            Dimensions::new(0, 80),
            Err(DimensionError::Empty { rows: 0, columns: 80 })
        ));
        assert!(Dimensions::new(24, 0).is_err());
        assert_eq!(Dimensions::new(24, 80).unwrap().to_string(), "80x24");
    }
}
