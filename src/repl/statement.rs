use thiserror::Error;

use crate::record::Row;

/// A parsed request, ready for execution against the table
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Row),
    Select,
}

#[derive(Debug, Error, PartialEq)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    Syntax,

    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong,

    #[error("Unrecognized keyword at start of '{0}'.")]
    Unrecognized(String),
}

impl Statement {
    /// Turn free-text input into an insert/select request.
    ///
    /// Field lengths are validated here, upstream of the row codec, so
    /// storage never sees an over-long value.
    pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
        if let Some(rest) = input.strip_prefix("insert") {
            return Self::prepare_insert(rest);
        }

        if input == "select" {
            return Ok(Statement::Select);
        }

        Err(PrepareError::Unrecognized(input.to_string()))
    }

    fn prepare_insert(args: &str) -> Result<Statement, PrepareError> {
        let mut parts = args.split_whitespace();
        let id = parts.next().ok_or(PrepareError::Syntax)?;
        let username = parts.next().ok_or(PrepareError::Syntax)?;
        let email = parts.next().ok_or(PrepareError::Syntax)?;

        let id: i64 = id.parse().map_err(|_| PrepareError::Syntax)?;
        if id < 0 {
            return Err(PrepareError::NegativeId);
        }
        let id = u32::try_from(id).map_err(|_| PrepareError::Syntax)?;

        let row = Row::new(id, username, email).map_err(|_| PrepareError::StringTooLong)?;
        Ok(Statement::Insert(row))
    }
}
