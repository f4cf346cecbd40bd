use std::io;
use thiserror::Error;

use super::PageId;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Page number out of bounds: page_id={page_id}, max={max}")]
    PageOutOfBounds { page_id: PageId, max: usize },

    #[error("Tried to flush a page that is not resident: page_id={0}")]
    FlushOfAbsentPage(PageId),
}

pub type FileResult<T> = Result<T, FileError>;
