use crossterm::style::{Color, Stylize};

use std::fmt;

/// A single grid cell. Every cell starts as a wall and may be opened by carving.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Wall,
    Open,
}

impl Cell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    pub fn is_open(self) -> bool {
        self == Cell::Open
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Cell::Wall => "⬜".with(Color::White),
            Cell::Open => "  ".with(Color::Reset),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Cell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_wall() {
        assert_eq!(Cell::default(), Cell::Wall);
        assert!(!Cell::Wall.is_open());
        assert!(Cell::Open.is_open());
    }

    #[test]
    fn test_display_width() {
        use unicode_width::UnicodeWidthStr;
        // Styled output carries escape codes, so only check the raw glyphs here
        for symbol in ["⬜", "  "] {
            assert_eq!(symbol.width(), Cell::CELL_WIDTH as usize);
        }
        // Formatting must not trip the width assertion
        let _ = format!("{}{}", Cell::Wall, Cell::Open);
    }
}
