use std::borrow::Cow;
use std::fmt;

use super::error::{RecordError, RecordResult};
use super::{
    EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

/// One fixed-layout record: a 4-byte little-endian id followed by two
/// left-aligned, null-padded text columns.
///
/// The padding is part of the stored field; it is trimmed by the display
/// accessors, never by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: [u8; USERNAME_SIZE],
    email: [u8; EMAIL_SIZE],
}

impl Row {
    /// Build a row from user input, rejecting fields that exceed their
    /// fixed column width. Length validation happens here so the codec
    /// below never has to truncate.
    pub fn new(id: u32, username: &str, email: &str) -> RecordResult<Self> {
        Ok(Self {
            id,
            username: fixed_bytes(username, "username")?,
            email: fixed_bytes(email, "email")?,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Username with trailing NUL padding trimmed
    pub fn username(&self) -> Cow<'_, str> {
        trim_padding(&self.username)
    }

    /// Email with trailing NUL padding trimmed
    pub fn email(&self) -> Cow<'_, str> {
        trim_padding(&self.email)
    }

    /// Write exactly `ROW_SIZE` bytes starting at `offset`.
    ///
    /// Callers guarantee `offset + ROW_SIZE <= buffer.len()` by
    /// construction of the page layout.
    pub fn serialize(&self, buffer: &mut [u8], offset: usize) {
        debug_assert!(offset + ROW_SIZE <= buffer.len());

        buffer[offset + ID_OFFSET..offset + ID_OFFSET + ID_SIZE]
            .copy_from_slice(&self.id.to_le_bytes());
        buffer[offset + USERNAME_OFFSET..offset + USERNAME_OFFSET + USERNAME_SIZE]
            .copy_from_slice(&self.username);
        buffer[offset + EMAIL_OFFSET..offset + EMAIL_OFFSET + EMAIL_SIZE]
            .copy_from_slice(&self.email);
    }

    /// Exact inverse of [`Row::serialize`]
    pub fn deserialize(buffer: &[u8], offset: usize) -> Self {
        debug_assert!(offset + ROW_SIZE <= buffer.len());

        let id_start = offset + ID_OFFSET;
        let id = u32::from_le_bytes([
            buffer[id_start],
            buffer[id_start + 1],
            buffer[id_start + 2],
            buffer[id_start + 3],
        ]);

        let mut username = [0u8; USERNAME_SIZE];
        let start = offset + USERNAME_OFFSET;
        username.copy_from_slice(&buffer[start..start + USERNAME_SIZE]);

        let mut email = [0u8; EMAIL_SIZE];
        let start = offset + EMAIL_OFFSET;
        email.copy_from_slice(&buffer[start..start + EMAIL_SIZE]);

        Self {
            id,
            username,
            email,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username(), self.email())
    }
}

fn fixed_bytes<const N: usize>(value: &str, column: &'static str) -> RecordResult<[u8; N]> {
    let bytes = value.as_bytes();
    if bytes.len() > N {
        return Err(RecordError::ValueTooLong {
            column,
            actual: bytes.len(),
            max: N,
        });
    }

    let mut buffer = [0u8; N];
    buffer[..bytes.len()].copy_from_slice(bytes);
    Ok(buffer)
}

fn trim_padding(field: &[u8]) -> Cow<'_, str> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_at_offset() {
        let row = Row::new(42, "alice", "alice@example.com").unwrap();

        let mut buffer = vec![0u8; ROW_SIZE * 3];
        row.serialize(&mut buffer, ROW_SIZE);

        let restored = Row::deserialize(&buffer, ROW_SIZE);
        assert_eq!(restored, row);
        assert_eq!(restored.id(), 42);
        assert_eq!(restored.username(), "alice");
        assert_eq!(restored.email(), "alice@example.com");
    }

    #[test]
    fn test_fields_are_null_padded() {
        let row = Row::new(1, "bob", "bob@example.com").unwrap();

        let mut buffer = vec![0xffu8; ROW_SIZE];
        row.serialize(&mut buffer, 0);

        assert_eq!(&buffer[..ID_SIZE], &1u32.to_le_bytes());
        assert_eq!(&buffer[USERNAME_OFFSET..USERNAME_OFFSET + 3], b"bob");
        assert!(
            buffer[USERNAME_OFFSET + 3..USERNAME_OFFSET + USERNAME_SIZE]
                .iter()
                .all(|&b| b == 0)
        );
        assert!(
            buffer[EMAIL_OFFSET + 15..EMAIL_OFFSET + EMAIL_SIZE]
                .iter()
                .all(|&b| b == 0)
        );
    }

    #[test]
    fn test_max_length_fields_accepted() {
        let username = "u".repeat(USERNAME_SIZE);
        let email = "e".repeat(EMAIL_SIZE);

        let row = Row::new(1, &username, &email).unwrap();
        assert_eq!(row.username(), username);
        assert_eq!(row.email(), email);
    }

    #[test]
    fn test_username_too_long() {
        let username = "u".repeat(USERNAME_SIZE + 1);
        let result = Row::new(1, &username, "a@b.c");
        assert!(matches!(
            result,
            Err(RecordError::ValueTooLong {
                column: "username",
                ..
            })
        ));
    }

    #[test]
    fn test_email_too_long() {
        let email = "e".repeat(EMAIL_SIZE + 1);
        let result = Row::new(1, "alice", &email);
        assert!(matches!(
            result,
            Err(RecordError::ValueTooLong { column: "email", .. })
        ));
    }

    #[test]
    fn test_display_trims_padding() {
        let row = Row::new(7, "carol", "carol@example.com").unwrap();
        assert_eq!(row.to_string(), "(7, carol, carol@example.com)");
    }
}
