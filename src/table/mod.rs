mod cursor;
mod error;

pub use cursor::{Cursor, Rows};
pub use error::{TableError, TableResult};

use std::path::Path;

use tracing::debug;

use crate::file::{PAGE_SIZE, Pager, TABLE_MAX_PAGES};
use crate::record::{ROW_SIZE, Row};

/// Rows that fit in one page (14)
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;

/// Hard row capacity of a table (1400)
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;

/// The logical row count plus its backing pager.
///
/// The backing file carries no header, so the row count is recovered at
/// open time from the file length alone.
pub struct Table {
    pager: Pager,
    num_rows: usize,
}

impl Table {
    /// Open a table file, creating it if absent.
    ///
    /// The row count is recovered from the file length alone. Full pages
    /// carry `PAGE_SIZE - ROWS_PER_PAGE * ROW_SIZE` slack bytes, so the
    /// count is taken per page rather than by dividing the whole length
    /// by `ROW_SIZE`; a trailing partial row is dropped.
    pub fn open<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        let pager = Pager::open(path)?;

        let file_length = pager.file_length() as usize;
        let full_pages = file_length / PAGE_SIZE;
        let tail = file_length % PAGE_SIZE;
        let num_rows = full_pages * ROWS_PER_PAGE + tail / ROW_SIZE;

        debug!(num_rows, "opened table");
        Ok(Self { pager, num_rows })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Append a row at the end of the table.
    ///
    /// Fails with [`TableError::TableFull`] at capacity; existing rows and
    /// the on-disk file are untouched by a rejected insert.
    pub fn insert(&mut self, row: &Row) -> TableResult<()> {
        if self.num_rows >= TABLE_MAX_ROWS {
            return Err(TableError::TableFull);
        }

        let mut cursor = Cursor::end(self);
        cursor.write(row)?;
        self.num_rows += 1;
        Ok(())
    }

    /// Iterate over all rows in insertion order.
    ///
    /// Each call opens a fresh cursor, so a finished scan can be restarted
    /// by calling this again.
    pub fn scan(&mut self) -> Rows<'_> {
        Rows::new(Cursor::start(self))
    }

    /// Flush every resident page and sync the file.
    ///
    /// Fully-populated pages are written whole; a partially filled
    /// trailing page is written only up to its last row so no zero
    /// garbage lands after it in the file.
    pub fn close(mut self) -> TableResult<()> {
        let full_pages = self.num_rows / ROWS_PER_PAGE;
        for page_id in 0..full_pages {
            if self.pager.is_resident(page_id) {
                self.pager.flush(page_id, PAGE_SIZE)?;
            }
        }

        let remainder = self.num_rows % ROWS_PER_PAGE;
        if remainder > 0 && self.pager.is_resident(full_pages) {
            self.pager.flush(full_pages, remainder * ROW_SIZE)?;
        }

        self.pager.sync()?;
        debug!(num_rows = self.num_rows, "closed table");
        Ok(())
    }
}
