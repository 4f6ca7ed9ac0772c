//! Packed address record layout.
//!
//! A record is the four-byte family tag immediately followed by the address
//! text and a single NUL:
//!
//! ```text
//! +------+---------------------+----+
//! | IPv4 | 93.184.216.34       | \0 |
//! +------+---------------------+----+
//! ```
//!
//! Records are stored back to back with no padding and no length prefix, so
//! a reader finds each boundary by skipping the tag and scanning for the NUL.

use thiserror::Error;

use crate::address_family::AddressFamily;

pub const TAG_LEN: usize = 4;

/// Encoded size of a record whose address text is `text_len` bytes long.
pub const fn record_len(text_len: usize) -> usize {
    TAG_LEN + text_len + 1
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordWriterError {
    #[error("record of {needed} bytes exceeds remaining capacity of {remaining} bytes")]
    Overrun { needed: usize, remaining: usize },

    #[error("address text contains an interior NUL")]
    InteriorNul,
}

/// Appends records to a buffer without ever growing past `limit`.
///
/// The limit is the size computed by the measuring pass; a write that would
/// cross it is rejected instead of reallocating.
pub struct RecordWriter<'a> {
    buf: &'a mut Vec<u8>,
    limit: usize,
}

impl<'a> RecordWriter<'a> {
    /// `budget` bytes may be appended after the current end of `buf`.
    pub fn new(buf: &'a mut Vec<u8>, budget: usize) -> Self {
        let limit = buf.len() + budget;
        Self { buf, limit }
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.buf.len()
    }

    pub fn push(&mut self, family: AddressFamily, text: &[u8]) -> Result<usize, RecordWriterError> {
        if text.contains(&0) {
            return Err(RecordWriterError::InteriorNul);
        }

        let needed = record_len(text.len());
        let remaining = self.remaining();
        if needed > remaining {
            return Err(RecordWriterError::Overrun { needed, remaining });
        }

        self.buf.extend_from_slice(family.tag());
        self.buf.extend_from_slice(text);
        self.buf.push(0);
        Ok(needed)
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }
}

/// A record borrowed from a packed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRecord<'a> {
    pub family: AddressFamily,
    pub text: &'a str,
}

impl AddressRecord<'_> {
    pub fn encoded_len(&self) -> usize {
        record_len(self.text.len())
    }

    pub fn to_ip_addr(&self) -> Option<std::net::IpAddr> {
        self.text.parse().ok()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordDecodeError {
    #[error("unknown family tag {0:?} at offset {1}")]
    UnknownTag([u8; TAG_LEN], usize),

    #[error("record truncated at offset {0}")]
    Truncated(usize),

    #[error("address text at offset {0} is not NUL-terminated")]
    MissingTerminator(usize),

    #[error("address text at offset {0} is not valid UTF-8")]
    InvalidUtf8(usize),

    #[error("address text at offset {0} is not an IP address")]
    InvalidAddress(usize),
}

/// Walks a packed record run using only the tag-then-NUL rule.
///
/// Yields an error once and then stops if the run is malformed.
#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    rest: &'a [u8],
    offset: usize,
}

impl<'a> RecordIter<'a> {
    pub fn new(records: &'a [u8]) -> Self {
        Self {
            rest: records,
            offset: 0,
        }
    }

    fn decode_next(&mut self) -> Result<AddressRecord<'a>, RecordDecodeError> {
        let start = self.offset;
        if self.rest.len() < TAG_LEN {
            return Err(RecordDecodeError::Truncated(start));
        }

        let (tag, body) = self.rest.split_at(TAG_LEN);
        let family = AddressFamily::from_tag(tag).ok_or_else(|| {
            let mut raw = [0u8; TAG_LEN];
            raw.copy_from_slice(tag);
            RecordDecodeError::UnknownTag(raw, start)
        })?;

        let nul = body
            .iter()
            .position(|&b| b == 0)
            .ok_or(RecordDecodeError::MissingTerminator(start + TAG_LEN))?;
        let text = std::str::from_utf8(&body[..nul])
            .map_err(|_| RecordDecodeError::InvalidUtf8(start + TAG_LEN))?;

        let consumed = record_len(nul);
        self.rest = &self.rest[consumed..];
        self.offset += consumed;

        Ok(AddressRecord { family, text })
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Result<AddressRecord<'a>, RecordDecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let item = self.decode_next();
        if item.is_err() {
            self.rest = &[];
        }
        Some(item)
    }
}
