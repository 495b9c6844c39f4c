// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

/// Named colors accepted by `--color` and `--background-color`.
///
/// These map onto the eight standard ANSI colors (SGR 30-37 / 40-47), so
/// `white` is the terminal's regular white rather than its bright variant.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnowColor {
    White,
    Black,
    Red,
    Blue,
    #[value(alias = "magneta")]
    Magenta,
    Cyan,
    Green,
    Yellow,
}

impl SnowColor {
    pub const ALL: [SnowColor; 8] = [
        SnowColor::White,
        SnowColor::Black,
        SnowColor::Red,
        SnowColor::Blue,
        SnowColor::Magenta,
        SnowColor::Cyan,
        SnowColor::Green,
        SnowColor::Yellow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SnowColor::White => "white",
            SnowColor::Black => "black",
            SnowColor::Red => "red",
            SnowColor::Blue => "blue",
            SnowColor::Magenta => "magenta",
            SnowColor::Cyan => "cyan",
            SnowColor::Green => "green",
            SnowColor::Yellow => "yellow",
        }
    }

    pub fn color(self) -> Color {
        match self {
            SnowColor::White => Color::Grey,
            SnowColor::Black => Color::Black,
            SnowColor::Red => Color::DarkRed,
            SnowColor::Blue => Color::DarkBlue,
            SnowColor::Magenta => Color::DarkMagenta,
            SnowColor::Cyan => Color::DarkCyan,
            SnowColor::Green => Color::DarkGreen,
            SnowColor::Yellow => Color::DarkYellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn every_color_parses_by_its_name() {
        for c in SnowColor::ALL {
            assert_eq!(SnowColor::from_str(c.name(), false), Ok(c));
        }
    }

    #[test]
    fn misspelled_magenta_is_still_accepted() {
        assert_eq!(
            SnowColor::from_str("magneta", false),
            Ok(SnowColor::Magenta)
        );
    }

    #[test]
    fn colors_are_the_standard_ansi_set() {
        assert_eq!(SnowColor::White.color(), Color::Grey);
        assert_eq!(SnowColor::Red.color(), Color::DarkRed);
        assert_eq!(SnowColor::Black.color(), Color::Black);
    }
}
