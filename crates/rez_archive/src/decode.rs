//! Positioned reads against the archive stream.
//!
//! Every read takes the absolute offset it starts at. The decoder never relies on
//! where the previous read left the stream, so callers keep their own cursor.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

use crate::{
    error::{FormatError, Result},
    types::FixedRecord,
};

pub(crate) struct Decoder<'a, R: Read + Seek> {
    reader: &'a mut R,
    len: u64,
}

impl<'a, R: Read + Seek> Decoder<'a, R> {
    pub fn new(reader: &'a mut R, len: u64) -> Self {
        Self { reader, len }
    }

    /// Total length of the archive
    pub fn archive_len(&self) -> u64 {
        self.len
    }

    /// Seek to `offset` after checking that `needed` bytes are available there
    fn seek_to(&mut self, offset: u64, needed: u64) -> Result<()> {
        if offset >= self.len {
            return Err(FormatError::OffsetOutOfRange {
                offset,
                len: self.len,
            }
            .into());
        }
        if offset.saturating_add(needed) > self.len {
            return Err(FormatError::Truncated {
                offset,
                needed,
                len: self.len,
            }
            .into());
        }

        self.reader.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    pub fn read_i32_at(&mut self, offset: u64) -> Result<i32> {
        self.seek_to(offset, 4)?;
        Ok(self.reader.read_i32::<LittleEndian>()?)
    }

    /// Read exactly `size` bytes into a fresh buffer
    pub fn read_bytes_at(&mut self, offset: u64, size: u64) -> Result<Vec<u8>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        self.seek_to(offset, size)?;

        let mut buf = vec![0u8; size as usize];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_record_at<T: FixedRecord>(&mut self, offset: u64) -> Result<T> {
        self.seek_to(offset, T::SIZE)?;
        Ok(T::read_record(&mut *self.reader)?)
    }

    /// Read the bytes in front of the first null byte at `offset`.
    ///
    /// `limit` counts the terminator, so a name of `limit - 1` bytes is the longest accepted.
    pub fn read_null_terminated_at(&mut self, offset: u64, limit: u32) -> Result<Vec<u8>> {
        self.seek_to(offset, 1)?;

        let available = (self.len - offset).min(limit as u64);
        let mut window = Vec::with_capacity(available as usize);
        self.reader
            .by_ref()
            .take(available)
            .read_to_end(&mut window)?;

        if (window.len() as u64) < available {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }

        match window.iter().position(|b| *b == 0) {
            Some(end) => {
                window.truncate(end);
                Ok(window)
            }
            None if available < limit as u64 => {
                Err(FormatError::MissingTerminator { offset }.into())
            }
            None => Err(FormatError::NameTooLong { offset, limit }.into()),
        }
    }
}
