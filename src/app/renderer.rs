use std::{fmt, io::Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::{Cell, Coord, Grid};

/// Everything that can be drawn in a single grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Cell(Cell),
    Player,
    Goal,
    /// A cell the player has already walked over
    Trail,
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Cell(cell) => return write!(f, "{}", cell),
            Glyph::Player => "🟡".with(Color::Yellow),
            Glyph::Goal => "🟥".with(Color::Red),
            Glyph::Trail => "* ".with(Color::Blue),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Cell::CELL_WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Check if a terminal of `term_size` (columns, rows) can show `grid` plus `extra_lines` of messages.
pub fn fits_terminal(grid: &Grid, term_size: (u16, u16), extra_lines: u16) -> bool {
    let needed_width = grid.cols() as u32 * Cell::CELL_WIDTH as u32;
    let needed_height = grid.rows() as u32 + extra_lines as u32;
    term_size.0 as u32 >= needed_width && term_size.1 as u32 >= needed_height
}

/// Clear the screen and queue the whole grid, starting at the top left corner.
pub fn draw_grid<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(terminal::Clear(ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    for row in grid.iter_rows() {
        for cell in row {
            out.queue(style::Print(cell))?;
        }
        out.queue(style::Print("\r\n"))?;
    }
    Ok(())
}

/// Draw a single glyph at a grid coordinate.
pub fn draw_glyph<W: Write>(out: &mut W, coord: Coord, glyph: Glyph) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(coord.1 * Cell::CELL_WIDTH, coord.0))?;
    out.queue(style::Print(glyph))?;
    Ok(())
}

/// Replace the message line just below the grid. `None` only clears it.
pub fn log_terminal<W: Write, D: fmt::Display>(
    out: &mut W,
    grid_rows: u16,
    msg: Option<StyledContent<D>>,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, grid_rows))?;
    out.queue(terminal::Clear(ClearType::FromCursorDown))?;
    if let Some(msg) = msg {
        out.queue(style::PrintStyledContent(msg))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_maze;

    #[test]
    fn test_fits_terminal() {
        let grid = generate_maze(21, 31, Some(0)).unwrap();
        assert!(fits_terminal(&grid, (62, 23), 2));
        assert!(!fits_terminal(&grid, (61, 23), 2));
        assert!(!fits_terminal(&grid, (62, 22), 2));
    }

    #[test]
    fn test_glyph_widths() {
        for glyph in [
            Glyph::Cell(Cell::Wall),
            Glyph::Cell(Cell::Open),
            Glyph::Player,
            Glyph::Goal,
            Glyph::Trail,
        ] {
            // Panics in debug builds if a glyph is not two columns wide
            let _ = glyph.to_string();
        }
    }

    #[test]
    fn test_draw_grid_writes_every_row() {
        let grid = generate_maze(3, 3, Some(1)).unwrap();
        let mut out = Vec::new();
        draw_grid(&mut out, &grid).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 3);
        assert!(text.contains("⬜"));
    }
}
