use crate::file::PageId;
use crate::record::{ROW_SIZE, Row};

use super::error::TableResult;
use super::{ROWS_PER_PAGE, Table};

/// Transient traversal handle mapping a logical row index to a physical
/// page and byte offset.
///
/// A cursor is created fresh per operation: positioned at the start for a
/// scan, or one past the last row for an append. It borrows the table
/// mutably for its whole lifetime, so no two cursors can alias a page
/// buffer.
pub struct Cursor<'a> {
    table: &'a mut Table,
    row_num: usize,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Position at the first row; an empty table starts exhausted
    pub fn start(table: &'a mut Table) -> Self {
        let end_of_table = table.num_rows == 0;
        Self {
            table,
            row_num: 0,
            end_of_table,
        }
    }

    /// Position one past the last row: exhausted for traversal, but a
    /// valid write position for an append
    pub fn end(table: &'a mut Table) -> Self {
        let row_num = table.num_rows;
        Self {
            table,
            row_num,
            end_of_table: true,
        }
    }

    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    /// Deserialize the row under the cursor
    pub fn read(&mut self) -> TableResult<Row> {
        let (page_id, byte_offset) = slot(self.row_num);
        let page = self.table.pager.page(page_id)?;
        Ok(Row::deserialize(page.bytes(), byte_offset))
    }

    /// Serialize a row into the slot under the cursor.
    ///
    /// When the slot falls on a page not yet touched, the pager allocates
    /// it on the way through.
    pub fn write(&mut self, row: &Row) -> TableResult<()> {
        let (page_id, byte_offset) = slot(self.row_num);
        let page = self.table.pager.page_mut(page_id)?;
        row.serialize(page.bytes_mut(), byte_offset);
        Ok(())
    }

    /// Step to the next row, flipping `end_of_table` once past the last one
    pub fn advance(&mut self) {
        self.row_num += 1;
        if self.row_num >= self.table.num_rows {
            self.end_of_table = true;
        }
    }
}

/// Map a logical row number to its page and in-page byte offset
fn slot(row_num: usize) -> (PageId, usize) {
    let page_id = row_num / ROWS_PER_PAGE;
    let byte_offset = (row_num % ROWS_PER_PAGE) * ROW_SIZE;
    (page_id, byte_offset)
}

/// Lazy iterator over all rows of a table, in insertion order.
pub struct Rows<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Rows<'a> {
    pub(super) fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor }
    }
}

impl Iterator for Rows<'_> {
    type Item = TableResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.end_of_table {
            return None;
        }

        match self.cursor.read() {
            Ok(row) => {
                self.cursor.advance();
                Some(Ok(row))
            }
            Err(err) => {
                // A pager failure ends the scan; the error is yielded once
                self.cursor.end_of_table = true;
                Some(Err(err))
            }
        }
    }
}
