mod error;
mod row;

pub use error::{RecordError, RecordResult};
pub use row::Row;

/// Fixed width of the username column in bytes
pub const USERNAME_SIZE: usize = 32;

/// Fixed width of the email column in bytes
pub const EMAIL_SIZE: usize = 255;

pub const ID_SIZE: usize = size_of::<u32>();

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Serialized size of one row (291 bytes)
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;
