use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("grid must be square, got {height}x{width}")]
    NotSquare { height: usize, width: usize },
    #[error("invalid cell value {value} at ({x}, {y}): expected 0 or a power of two >= 2")]
    InvalidValue { x: usize, y: usize, value: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("board size {0} is too small, at least 2 is required")]
    SizeTooSmall(usize),
    #[error("target {0} must be a power of two >= 4")]
    InvalidTarget(u32),
}
