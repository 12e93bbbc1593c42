use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze dimensions {rows}x{cols}: rows and cols must both be at least 1")]
    InvalidDimensions { rows: u16, cols: u16 },
}

pub type Result<T> = core::result::Result<T, MazeError>;
