use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Value too long for column {column}: {actual} bytes, max {max}")]
    ValueTooLong {
        column: &'static str,
        actual: usize,
        max: usize,
    },
}

pub type RecordResult<T> = Result<T, RecordError>;
