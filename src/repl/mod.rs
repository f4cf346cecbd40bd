mod statement;

pub use statement::{PrepareError, Statement};

use std::path::Path;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::table::{Table, TableError, TableResult};

const PROMPT: &str = "db > ";

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
}

/// Non-statement commands starting with a dot
pub enum MetaCommand {
    Exit,
    Unrecognized,
}

impl MetaCommand {
    pub fn parse(input: &str) -> Self {
        match input {
            ".exit" => Self::Exit,
            _ => Self::Unrecognized,
        }
    }
}

/// Run the interactive loop against the table file at `path`.
///
/// `.exit` and end-of-input both close the table cleanly, flushing every
/// resident page before the process ends.
pub fn run(path: &Path) -> Result<(), ReplError> {
    let mut table = Table::open(path)?;
    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => {
                let _ = table.close();
                return Err(err.into());
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input);

        if input.starts_with('.') {
            match MetaCommand::parse(input) {
                MetaCommand::Exit => break,
                MetaCommand::Unrecognized => println!("Unrecognized command '{input}'."),
            }
            continue;
        }

        match Statement::prepare(input) {
            Ok(statement) => execute(&mut table, statement),
            Err(err) => println!("{err}"),
        }
    }

    table.close()?;
    Ok(())
}

fn execute(table: &mut Table, statement: Statement) {
    let outcome = match statement {
        Statement::Insert(row) => table.insert(&row),
        Statement::Select => select(table),
    };

    match outcome {
        Ok(()) => println!("Executed."),
        Err(TableError::TableFull) => println!("Error: Table full."),
        Err(err) => println!("Error: {err}"),
    }
}

fn select(table: &mut Table) -> TableResult<()> {
    for row in table.scan() {
        println!("{}", row?);
    }
    Ok(())
}
