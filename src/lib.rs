pub mod app;
pub mod error;
pub mod game;
pub mod generator;
pub mod maze;

pub use error::{MazeError, Result};
pub use generator::{MazeGenerator, generate_maze};
pub use maze::{Cell, Coord, Grid};
