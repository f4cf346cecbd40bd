pub mod file;
pub mod record;
pub mod repl;
pub mod table;

pub use file::{FileError, FileResult, PAGE_SIZE, Page, PageId, Pager, TABLE_MAX_PAGES};
pub use record::{
    EMAIL_SIZE, ID_SIZE, ROW_SIZE, RecordError, RecordResult, Row, USERNAME_SIZE,
};
pub use table::{
    Cursor, ROWS_PER_PAGE, Rows, TABLE_MAX_ROWS, Table, TableError, TableResult,
};
