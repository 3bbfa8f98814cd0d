use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("No initial snapshot has been saved")]
    NoInitialSnapshot,
    #[error("Invalid pattern character at line {line}, column {column}")]
    InvalidPattern { line: usize, column: usize },
    #[error("Grid shape does not match declared side")]
    InvalidGridShape,
    #[error("Cell counts do not match grid contents")]
    InvalidCounts,
    #[error("Malformed export record: {0}")]
    MalformedExport(alloc::string::String),
}

pub type Result<T> = core::result::Result<T, SimError>;
