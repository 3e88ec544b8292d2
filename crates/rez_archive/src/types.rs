//! Base types for structure of REZ file.

use std::io::{Read, Seek};

use binrw::{BinRead, BinResult, BinWrite};

/// Length of the signature block at the start of every archive
pub const SIGNATURE_LEN: usize = 127;

/// A record with a fixed on-disk layout that can be decoded at any offset
pub trait FixedRecord: Sized {
    /// Number of bytes the record occupies in the archive
    const SIZE: u64;

    /// Decode the record from the current position of `reader`
    fn read_record<R: Read + Seek>(reader: &mut R) -> BinResult<Self>;
}

/// REZ file header
///
/// The header is packed without padding and stored in little endian format.
/// Only the root directory fields and the largest name sizes are needed for
/// decoding, the rest is exposed for callers that want to inspect it.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct RezHeader {
    /// Free form signature, usually a copyright banner padded with spaces
    pub signature: [u8; SIGNATURE_LEN],

    /// The version of the file format
    pub format_version: u32,

    /// The offset from the beginning of the file of the root directory record list
    pub root_dir_pos: u32,

    /// The length in bytes of the root directory record list
    pub root_dir_size: u32,

    /// When the root directory was last updated
    pub root_dir_time: u32,

    /// Offset where the next write would have gone
    pub next_write_pos: u32,

    /// When the archive was last updated
    pub time: u32,

    /// Size of the largest key array in the archive
    pub largest_key_array: u32,

    /// Size of the largest directory name, including the terminator
    pub largest_dir_name_size: u32,

    /// Size of the largest resource name, including the terminator
    pub largest_rez_name_size: u32,

    /// Size of the largest comment, including the terminator
    pub largest_comment_size: u32,

    /// `1` when entries are sorted, `0` otherwise
    pub is_sorted: u8,
}

impl RezHeader {
    /// Signature as text, stopping at the first null byte and with surrounding whitespace removed
    pub fn signature_text(&self) -> String {
        let end = self
            .signature
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(SIGNATURE_LEN);
        String::from_utf8_lossy(&self.signature[..end])
            .trim()
            .to_owned()
    }

    /// Whether the archive claims its entries are sorted
    pub fn is_sorted(&self) -> bool {
        self.is_sorted != 0
    }
}

impl Default for RezHeader {
    fn default() -> Self {
        Self {
            signature: [b' '; SIGNATURE_LEN],
            format_version: 1,
            root_dir_pos: Self::SIZE as u32,
            root_dir_size: Default::default(),
            root_dir_time: Default::default(),
            next_write_pos: Self::SIZE as u32,
            time: Default::default(),
            largest_key_array: Default::default(),
            largest_dir_name_size: Default::default(),
            largest_rez_name_size: Default::default(),
            largest_comment_size: Default::default(),
            is_sorted: Default::default(),
        }
    }
}

impl FixedRecord for RezHeader {
    const SIZE: u64 = SIGNATURE_LEN as u64 + 10 * 4 + 1;

    fn read_record<R: Read + Seek>(reader: &mut R) -> BinResult<Self> {
        Self::read(reader)
    }
}

/// Kind of a record in a directory list
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A resource holding data
    File,

    /// A directory holding another record list
    Directory,
}

impl EntryKind {
    /// Size of the tag that precedes every record
    pub const TAG_SIZE: u64 = 4;
}

impl TryFrom<i32> for EntryKind {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EntryKind::File),
            1 => Ok(EntryKind::Directory),
            other => Err(other),
        }
    }
}

impl From<EntryKind> for i32 {
    fn from(value: EntryKind) -> Self {
        match value {
            EntryKind::File => 0,
            EntryKind::Directory => 1,
        }
    }
}

/// Directory record
///
/// Followed in the archive by the null terminated directory name.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct DirRecordHeader {
    /// The offset from the start of the file of this directory's record list
    pub pos: u32,

    /// The length in bytes of this directory's record list
    pub size: u32,

    /// When this directory was last updated
    pub time: u32,
}

impl FixedRecord for DirRecordHeader {
    const SIZE: u64 = 12;

    fn read_record<R: Read + Seek>(reader: &mut R) -> BinResult<Self> {
        Self::read(reader)
    }
}

/// File record
///
/// Followed in the archive by the null terminated resource name.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct FileRecordHeader {
    /// The offset from the start of the file of this resource's data
    pub pos: u32,

    /// The length in bytes of this resource's data
    pub size: u32,

    /// When this resource was last updated
    pub time: u32,

    /// Numeric identifier of the resource
    pub id: u32,

    /// The file extension, stored back to front and padded with nulls
    pub type_tag: [u8; 4],

    /// Number of keys attached to the resource
    pub num_keys: u32,
}

impl FileRecordHeader {
    /// Decode the extension stored in [`FileRecordHeader::type_tag`]
    pub fn extension(&self) -> String {
        let mut ext: Vec<u8> = self.type_tag.iter().copied().filter(|b| *b != 0).collect();
        ext.reverse();
        String::from_utf8_lossy(&ext).into_owned()
    }
}

impl FixedRecord for FileRecordHeader {
    const SIZE: u64 = 24;

    fn read_record<R: Read + Seek>(reader: &mut R) -> BinResult<Self> {
        Self::read(reader)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use super::FixedRecord;
    use crate::error::Result;
    use crate::types::{DirRecordHeader, EntryKind, FileRecordHeader, RezHeader, SIGNATURE_LEN};

    #[test]
    fn header_size_matches_layout() -> Result<()> {
        let mut actual = Vec::new();
        RezHeader::default().write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual.len() as u64, RezHeader::SIZE);
        assert_eq!(RezHeader::SIZE, 168);

        Ok(())
    }

    #[test]
    fn read_header() -> Result<()> {
        let mut input = vec![b' '; SIGNATURE_LEN];
        input[..7].copy_from_slice(b"RezMgr\0");
        #[rustfmt::skip]
        let fields: [u8; 41] = [
            0x01, 0x00, 0x00, 0x00,
            0xA8, 0x00, 0x00, 0x00,
            0x20, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0xC8, 0x00, 0x00, 0x00,
            0x11, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x05, 0x00, 0x00, 0x00,
            0x09, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x01,
        ];
        input.extend_from_slice(&fields);

        let header = RezHeader::read(&mut Cursor::new(input))?;

        assert_eq!(header.format_version, 1);
        assert_eq!(header.root_dir_pos, 168);
        assert_eq!(header.root_dir_size, 32);
        assert_eq!(header.root_dir_time, 16);
        assert_eq!(header.next_write_pos, 200);
        assert_eq!(header.time, 17);
        assert_eq!(header.largest_key_array, 0);
        assert_eq!(header.largest_dir_name_size, 5);
        assert_eq!(header.largest_rez_name_size, 9);
        assert_eq!(header.largest_comment_size, 1);
        assert!(header.is_sorted());
        assert_eq!(header.signature_text(), "RezMgr");

        Ok(())
    }

    #[test]
    fn read_dir_record() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x00, 0x01, 0x00, 0x00,
            0x2A, 0x00, 0x00, 0x00,
            0x07, 0x00, 0x00, 0x00,
        ]);

        let expected = DirRecordHeader {
            pos: 256,
            size: 42,
            time: 7,
        };

        assert_eq!(DirRecordHeader::read(&mut input)?, expected);
        assert_eq!(input.position(), DirRecordHeader::SIZE);

        Ok(())
    }

    #[test]
    fn read_file_record() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0xA8, 0x00, 0x00, 0x00,
            0x0B, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00,
            b'g', b'p', b'j', 0x00,
            0x00, 0x00, 0x00, 0x00,
        ]);

        let record = FileRecordHeader::read(&mut input)?;

        assert_eq!(record.pos, 168);
        assert_eq!(record.size, 11);
        assert_eq!(record.id, 3);
        assert_eq!(record.type_tag, *b"gpj\0");
        assert_eq!(input.position(), FileRecordHeader::SIZE);

        Ok(())
    }

    #[test]
    fn extension_is_reversed_and_trimmed() {
        let record = |type_tag: [u8; 4]| FileRecordHeader {
            type_tag,
            ..Default::default()
        };

        assert_eq!(record(*b"gpj\0").extension(), "jpg");
        assert_eq!(record(*b"SETD").extension(), "DTES");
        assert_eq!(record(*b"xt\0\0").extension(), "tx");
        assert_eq!(record([0; 4]).extension(), "");
    }

    #[test]
    fn entry_kind_from_tag() {
        assert_eq!(EntryKind::try_from(0), Ok(EntryKind::File));
        assert_eq!(EntryKind::try_from(1), Ok(EntryKind::Directory));
        assert_eq!(EntryKind::try_from(7), Err(7));
        assert_eq!(i32::from(EntryKind::Directory), 1);
    }
}
