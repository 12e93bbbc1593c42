use crate::maze::{Coord, Grid};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Move `coord` one step in this direction. `None` on underflow or overflow.
    fn step(self, coord: Coord) -> Option<Coord> {
        let (row, col) = coord;
        match self {
            Direction::Up => Some((row.checked_sub(1)?, col)),
            Direction::Down => Some((row.checked_add(1)?, col)),
            Direction::Left => Some((row, col.checked_sub(1)?)),
            Direction::Right => Some((row, col.checked_add(1)?)),
        }
    }
}

/// A player walking a finished maze from the top left room towards the bottom right room.
pub struct GameState {
    /// The maze being played
    grid: Grid,
    /// Tracks where the player currently is
    player: Coord,
    /// Goal position
    goal: Coord,
    /// Every cell the player has stepped on, starting with the start cell
    path: Vec<Coord>,
}

impl GameState {
    pub const START: Coord = (0, 0);

    /// Set up a game on a generated maze.
    /// The goal is the room closest to the bottom right corner of the grid.
    pub fn new(grid: Grid) -> Self {
        let goal = ((grid.rows() - 1) / 2 * 2, (grid.cols() - 1) / 2 * 2);
        GameState {
            grid,
            player: Self::START,
            goal,
            path: vec![Self::START],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Coord {
        self.player
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Check if the goal has been reached.
    pub fn goal_reached(&self) -> bool {
        self.player == self.goal
    }

    /// Attempt to move the player one cell in the specified direction.
    /// Returns the new position if the target cell is inside the maze and open, None otherwise.
    pub fn move_player(&mut self, direction: Direction) -> Option<Coord> {
        let target = direction.step(self.player)?;
        if !self.grid.is_open(target) {
            tracing::trace!("[game] Blocked moving {:?} from {:?}", direction, self.player);
            return None;
        }

        tracing::debug!("[game] Moving to {:?}", target);
        self.player = target;
        self.path.push(target);
        Some(target)
    }
}
