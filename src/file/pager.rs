use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use super::error::{FileError, FileResult};
use super::page::Page;
use super::{PAGE_SIZE, PageId, TABLE_MAX_PAGES};

/// Mediates between logical page numbers and file I/O, caching each page
/// in memory on first touch.
///
/// The pager owns every resident `Page` and hands out scoped borrows only;
/// a slot is populated at most once per pager lifetime and reads always go
/// to the cached buffer. Dirtiness is not tracked — the table flushes every
/// resident page at close.
pub struct Pager {
    file: File,
    file_length: u64,
    pages: Vec<Option<Page>>,
}

impl Pager {
    /// Open the database file, creating it if absent, and allocate the
    /// fixed set of empty page slots.
    pub fn open<P: AsRef<Path>>(path: P) -> FileResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path.as_ref())?;
        let file_length = file.metadata()?.len();

        let mut pages = Vec::with_capacity(TABLE_MAX_PAGES);
        pages.resize_with(TABLE_MAX_PAGES, || None);

        debug!(file_length, "opened database file");

        Ok(Self {
            file,
            file_length,
            pages,
        })
    }

    /// Length of the backing file in bytes, as of open time plus any
    /// flushes performed since.
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Get a page, loading it from disk first if it is not yet resident
    pub fn page(&mut self, page_id: PageId) -> FileResult<&Page> {
        self.ensure_resident(page_id)?;
        Ok(self.pages[page_id].as_ref().unwrap())
    }

    /// Get mutable access to a page, loading it first if necessary
    pub fn page_mut(&mut self, page_id: PageId) -> FileResult<&mut Page> {
        self.ensure_resident(page_id)?;
        Ok(self.pages[page_id].as_mut().unwrap())
    }

    /// Check whether a page is resident in the cache
    pub fn is_resident(&self, page_id: PageId) -> bool {
        self.pages.get(page_id).is_some_and(Option::is_some)
    }

    /// Write the first `byte_count` bytes of a resident page back to disk.
    ///
    /// Flushing a page that was never loaded is an invariant violation on
    /// the caller's side, not a user-facing condition.
    pub fn flush(&mut self, page_id: PageId, byte_count: usize) -> FileResult<()> {
        let page = self
            .pages
            .get(page_id)
            .and_then(Option::as_ref)
            .ok_or(FileError::FlushOfAbsentPage(page_id))?;

        let offset = (page_id * PAGE_SIZE) as u64;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&page.bytes()[..byte_count])?;
        self.file_length = self.file_length.max(offset + byte_count as u64);

        debug!(page_id, byte_count, offset, "flushed page");
        Ok(())
    }

    /// Sync the file to disk
    pub fn sync(&mut self) -> FileResult<()> {
        self.file.sync_all()?;
        Ok(())
    }

    fn ensure_resident(&mut self, page_id: PageId) -> FileResult<()> {
        if page_id >= TABLE_MAX_PAGES {
            return Err(FileError::PageOutOfBounds {
                page_id,
                max: TABLE_MAX_PAGES,
            });
        }

        if self.pages[page_id].is_some() {
            return Ok(());
        }

        let mut page = Page::new();
        let pages_on_disk = self.file_length.div_ceil(PAGE_SIZE as u64) as usize;

        if page_id < pages_on_disk {
            let offset = (page_id * PAGE_SIZE) as u64;
            self.file.seek(SeekFrom::Start(offset))?;
            // A short read on the last page is expected: the unwritten
            // tail of a partially-filled page stays zeroed.
            let bytes_read = self.file.read(page.bytes_mut())?;
            debug!(page_id, offset, bytes_read, "loaded page from disk");
        } else {
            debug!(page_id, "allocated fresh page");
        }

        self.pages[page_id] = Some(page);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("test.db");
        (temp_dir, path)
    }

    #[test]
    fn test_open_creates_missing_file() {
        let (_temp, path) = setup();
        let pager = Pager::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(pager.file_length(), 0);
    }

    #[test]
    fn test_fresh_page_is_zeroed() {
        let (_temp, path) = setup();
        let mut pager = Pager::open(&path).unwrap();

        let page = pager.page(3).unwrap();
        assert!(page.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_page_out_of_bounds() {
        let (_temp, path) = setup();
        let mut pager = Pager::open(&path).unwrap();

        let result = pager.page(TABLE_MAX_PAGES);
        assert!(matches!(
            result,
            Err(FileError::PageOutOfBounds { page_id, .. }) if page_id == TABLE_MAX_PAGES
        ));
    }

    #[test]
    fn test_flush_of_absent_page_is_an_error() {
        let (_temp, path) = setup();
        let mut pager = Pager::open(&path).unwrap();

        let result = pager.flush(0, PAGE_SIZE);
        assert!(matches!(result, Err(FileError::FlushOfAbsentPage(0))));
    }

    #[test]
    fn test_flush_then_reload_round_trips() {
        let (_temp, path) = setup();

        let mut pager = Pager::open(&path).unwrap();
        let page = pager.page_mut(0).unwrap();
        page.bytes_mut()[0] = 42;
        page.bytes_mut()[100] = 99;
        page.bytes_mut()[PAGE_SIZE - 1] = 255;
        pager.flush(0, PAGE_SIZE).unwrap();
        pager.sync().unwrap();
        drop(pager);

        let mut pager = Pager::open(&path).unwrap();
        assert_eq!(pager.file_length(), PAGE_SIZE as u64);
        let page = pager.page(0).unwrap();
        assert_eq!(page.bytes()[0], 42);
        assert_eq!(page.bytes()[100], 99);
        assert_eq!(page.bytes()[PAGE_SIZE - 1], 255);
    }

    #[test]
    fn test_partial_flush_writes_only_prefix() {
        let (_temp, path) = setup();

        let mut pager = Pager::open(&path).unwrap();
        let page = pager.page_mut(0).unwrap();
        page.bytes_mut()[..200].fill(7);
        pager.flush(0, 100).unwrap();
        drop(pager);

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 100);
    }

    #[test]
    fn test_short_read_zero_fills_tail() {
        let (_temp, path) = setup();
        std::fs::write(&path, vec![9u8; 100]).unwrap();

        let mut pager = Pager::open(&path).unwrap();
        let page = pager.page(0).unwrap();
        assert!(page.bytes()[..100].iter().all(|&b| b == 9));
        assert!(page.bytes()[100..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_page_is_loaded_once_and_stays_resident() {
        let (_temp, path) = setup();
        let mut pager = Pager::open(&path).unwrap();

        assert!(!pager.is_resident(0));
        pager.page_mut(0).unwrap().bytes_mut()[0] = 1;
        assert!(pager.is_resident(0));

        // Reads go to the cached buffer, never back to disk
        assert_eq!(pager.page(0).unwrap().bytes()[0], 1);
    }
}
