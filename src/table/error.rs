use thiserror::Error;

use crate::file::FileError;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("Table is full")]
    TableFull,
}

pub type TableResult<T> = Result<T, TableError>;
