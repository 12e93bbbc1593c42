use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::Result,
    maze::{Cell, Coord, Grid, midpoint, room_count, room_neighbors},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Carves a perfect maze into a walled grid with a randomized iterative depth-first search.
///
/// Rooms live at even `(row, col)` indices and the cells between them are walls. Generation
/// starts from room `(0, 0)` and opens the wall between the current room and a random unvisited
/// neighbor room, backtracking through the frontier stack when the current room is exhausted.
///
/// [`MazeGenerator::generate`] consumes the generator, so every instance produces exactly one maze.
pub struct MazeGenerator {
    /// The grid being carved. All walls until generation starts.
    grid: Grid,
    /// Visited rooms on the current exploration path
    stack: Vec<Coord>,
}

impl MazeGenerator {
    /// The room generation starts from.
    pub const START: Coord = (0, 0);

    /// Allocates an all-wall `rows x cols` grid.
    ///
    /// Odd dimensions are recommended so that the last row and column hold rooms.
    /// Returns [`crate::MazeError::InvalidDimensions`] if either dimension is 0.
    pub fn new(rows: u16, cols: u16) -> Result<Self> {
        let grid = Grid::new(rows, cols, Cell::Wall)?;
        Ok(MazeGenerator {
            grid,
            stack: Vec::with_capacity(room_count(rows, cols)),
        })
    }

    /// Rooms adjacent to `coord` that have not been carved into yet.
    fn unvisited_neighbors(&self, coord: Coord) -> Vec<Coord> {
        room_neighbors(coord, &self.grid)
            .filter(|&c| self.grid[c] == Cell::Wall)
            .collect()
    }

    /// Open the wall cell between two rooms.
    fn remove_wall(&mut self, from: Coord, to: Coord) {
        self.grid.set(midpoint(from, to), Cell::Open);
    }

    /// Run the carve to completion and hand the finished grid to the caller.
    pub fn generate<R: Rng>(mut self, rng: &mut R) -> Grid {
        let mut current = Self::START;
        self.grid.set(current, Cell::Open);
        self.stack.push(current);

        let mut carved = 0usize;
        while !self.stack.is_empty() {
            let neighbors = self.unvisited_neighbors(current);

            if !neighbors.is_empty() {
                let neighbor = neighbors[rng.random_range(0..neighbors.len())];
                tracing::trace!("[generate] Carving from {:?} to {:?}", current, neighbor);
                self.remove_wall(current, neighbor);
                self.grid.set(neighbor, Cell::Open);
                self.stack.push(neighbor);
                current = neighbor;
                carved += 1;
            } else if let Some(previous) = self.stack.pop() {
                // Backtrack to the most recently visited room
                current = previous;
            }
        }

        tracing::debug!(
            "[generate] Carved {} passages in a {}x{} grid",
            carved,
            self.grid.rows(),
            self.grid.cols()
        );
        self.grid
    }
}

/// Generate a `rows x cols` maze, optionally seeded for reproducibility.
pub fn generate_maze(rows: u16, cols: u16, seed: Option<u64>) -> Result<Grid> {
    let generator = MazeGenerator::new(rows, cols)?;
    let mut rng = get_rng(seed);
    Ok(generator.generate(&mut rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::MazeError,
        maze::{is_room, open_neighbors},
    };
    use quickcheck::{TestResult, quickcheck};
    use std::collections::{HashSet, VecDeque};

    /// All open cells reachable from the start room.
    fn reachable_from_start(grid: &Grid) -> HashSet<Coord> {
        let mut seen = HashSet::from([MazeGenerator::START]);
        let mut queue = VecDeque::from([MazeGenerator::START]);
        while let Some(coord) = queue.pop_front() {
            for next in open_neighbors(coord, grid) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn open_cells(grid: &Grid) -> Vec<Coord> {
        (0..grid.rows())
            .flat_map(|row| (0..grid.cols()).map(move |col| (row, col)))
            .filter(|&c| grid.is_open(c))
            .collect()
    }

    #[test]
    fn test_five_by_five_scenario() {
        let grid = generate_maze(5, 5, Some(42)).unwrap();
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid[(0, 0)], Cell::Open);
        assert!(grid.is_open((0, 2)) || grid.is_open((2, 0)));
        // 9 rooms + 8 passages
        assert_eq!(grid.open_count(), 17);
    }

    #[test]
    fn test_every_room_is_opened() {
        let grid = generate_maze(21, 21, Some(7)).unwrap();
        for row in (0..21).step_by(2) {
            for col in (0..21).step_by(2) {
                assert!(grid.is_open((row, col)), "room ({row}, {col}) left closed");
            }
        }
    }

    #[test]
    fn test_odd_cells_stay_walls() {
        // Cells with both indices odd never sit between two rooms
        let grid = generate_maze(15, 9, Some(3)).unwrap();
        for row in (1..15).step_by(2) {
            for col in (1..9).step_by(2) {
                assert_eq!(grid[(row, col)], Cell::Wall);
            }
        }
    }

    #[test]
    fn test_single_cell() {
        let grid = generate_maze(1, 1, None).unwrap();
        assert_eq!(grid.open_count(), 1);
        assert!(grid.is_open((0, 0)));
    }

    #[test]
    fn test_single_row_is_a_corridor() {
        let grid = generate_maze(1, 7, Some(1)).unwrap();
        assert!((0..7).all(|col| grid.is_open((0, col))));
    }

    #[test]
    fn test_even_dimensions_leave_last_line_walled() {
        let grid = generate_maze(6, 8, Some(11)).unwrap();
        assert!((0..8).all(|col| !grid.is_open((5, col))));
        assert!((0..6).all(|row| !grid.is_open((row, 7))));
        assert_eq!(grid.open_count(), 2 * room_count(6, 8) - 1);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            MazeGenerator::new(0, 3).err(),
            Some(MazeError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(
            generate_maze(3, 0, Some(0)).err(),
            Some(MazeError::InvalidDimensions { rows: 3, cols: 0 })
        );
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = generate_maze(31, 17, Some(1234)).unwrap();
        let b = generate_maze(31, 17, Some(1234)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_injected_rng() {
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = MazeGenerator::new(9, 9).unwrap().generate(&mut rng_a);
        let b = MazeGenerator::new(9, 9).unwrap().generate(&mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn prop_connected_spanning_tree() {
        fn prop(rows: u8, cols: u8, seed: u64) -> TestResult {
            // Keep grids small so the property runs quickly
            let (rows, cols) = (rows as u16 % 40 + 1, cols as u16 % 40 + 1);
            let grid = match generate_maze(rows, cols, Some(seed)) {
                Ok(grid) => grid,
                Err(_) => return TestResult::failed(),
            };

            let open = open_cells(&grid);
            let rooms = open.iter().filter(|&&c| is_room(c)).count();
            let passages = open.len() - rooms;

            // Every room is open, and a spanning tree over them has rooms - 1 edges
            let spanning = rooms == room_count(rows, cols) && passages == rooms - 1;
            let connected = reachable_from_start(&grid).len() == open.len();
            TestResult::from_bool(grid.is_open((0, 0)) && spanning && connected)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn prop_deterministic_with_seed() {
        fn prop(rows: u8, cols: u8, seed: u64) -> TestResult {
            if rows == 0 || cols == 0 {
                return TestResult::discard();
            }
            let a = generate_maze(rows as u16, cols as u16, Some(seed));
            let b = generate_maze(rows as u16, cols as u16, Some(seed));
            TestResult::from_bool(a.is_ok() && a == b)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
