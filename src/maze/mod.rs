pub mod cell;
pub mod grid;

pub use cell::Cell;
pub use grid::Grid;

/// A `(row, col)` coordinate into a [`Grid`].
pub type Coord = (u16, u16);

/// Rooms sit at even row and even column indices. Every other cell is a wall cell.
pub fn is_room(coord: Coord) -> bool {
    coord.0 % 2 == 0 && coord.1 % 2 == 0
}

/// Number of rooms in a `rows x cols` grid: `ceil(rows / 2) * ceil(cols / 2)`.
pub fn room_count(rows: u16, cols: u16) -> usize {
    (rows as usize).div_ceil(2) * (cols as usize).div_ceil(2)
}

/// The wall cell exactly between two rooms two steps apart on one axis.
pub fn midpoint(a: Coord, b: Coord) -> Coord {
    debug_assert!(
        (a.0 == b.0 && a.1.abs_diff(b.1) == 2) || (a.1 == b.1 && a.0.abs_diff(b.0) == 2),
        "Rooms {:?} and {:?} are not two steps apart",
        a,
        b
    );
    (
        ((a.0 as u32 + b.0 as u32) / 2) as u16,
        ((a.1 as u32 + b.1 as u32) / 2) as u16,
    )
}

/// Cells `step` away from `coord` in the four cardinal directions (up, down, left, right),
/// keeping only those inside the grid.
fn cardinal_offsets(coord: Coord, step: u16, grid: &Grid) -> impl Iterator<Item = Coord> + '_ {
    let (row, col) = coord;
    [
        // NOTE: This way of handling underflow/overflow is overflow-safe.
        // When row < step or col < step, set row - step or col - step to u16::MAX to avoid
        // underflow, and automatically filter it out in the bounds check.
        // When row + step or col + step exceeds u16::MAX, saturate to u16::MAX, which is also
        // filtered out (the largest index numerically possible is u16::MAX - 1).
        (row.checked_sub(step).unwrap_or(u16::MAX), col),
        (row.saturating_add(step), col),
        (row, col.checked_sub(step).unwrap_or(u16::MAX)),
        (row, col.saturating_add(step)),
    ]
    .into_iter()
    .filter(move |&c| grid.is_in_bounds(c))
}

/// Get neighbor rooms of a room.
/// A neighbor room is two steps away in a cardinal direction and within the grid bounds.
pub fn room_neighbors(coord: Coord, grid: &Grid) -> impl Iterator<Item = Coord> + '_ {
    cardinal_offsets(coord, 2, grid)
}

/// Get open cells one step away from `coord` in a cardinal direction.
pub fn open_neighbors(coord: Coord, grid: &Grid) -> impl Iterator<Item = Coord> + '_ {
    cardinal_offsets(coord, 1, grid).filter(move |&c| grid[c].is_open())
}
