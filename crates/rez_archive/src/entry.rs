//! Decoded directory and file entries.

use crate::{
    path::{RezPath, SEPARATOR},
    types::{DirRecordHeader, FileRecordHeader},
};

/// Bytes of a file record counted ahead of its name: position, size, time and id
const FILE_FIXED_FIELDS: u64 = 20;

/// The type tag plus one byte for the terminator that follows the name
const FILE_TAG_AND_TERMINATOR: u64 = 5;

/// Bytes of a directory record counted ahead of its name: position, size and time
const DIR_FIXED_FIELDS: u64 = 12;

/// A directory found while walking the archive
#[derive(Debug, Clone, PartialEq)]
pub struct RezDirEntry {
    /// Record as stored in the archive
    pub header: DirRecordHeader,
    /// Name of the directory
    pub name: Box<str>,
    /// Raw name. To be used when name was incorrectly decoded.
    pub name_raw: Box<[u8]>,
    /// Location of the directory, ending with its own name
    pub path: RezPath,
    /// Length of the record in the parent's list, excluding the entry tag
    pub data_size: u64,
}

impl RezDirEntry {
    pub(crate) fn new(header: DirRecordHeader, name_raw: Vec<u8>, parent: &RezPath) -> Self {
        let name: Box<str> = String::from_utf8_lossy(&name_raw).into();
        Self {
            header,
            path: parent.join(name.clone()),
            data_size: DIR_FIXED_FIELDS + name_raw.len() as u64 + 1,
            name,
            name_raw: name_raw.into(),
        }
    }

    /// Full name inside the archive, ending with the separator
    pub fn full_name(&self) -> String {
        format!("{}{SEPARATOR}", self.path)
    }

    /// Offset of this directory's record list
    pub fn position(&self) -> u64 {
        self.header.pos as u64
    }

    /// Length of this directory's record list
    pub fn size(&self) -> u64 {
        self.header.size as u64
    }

    pub fn time(&self) -> u32 {
        self.header.time
    }
}

/// A resource found while walking the archive
#[derive(Debug, Clone, PartialEq)]
pub struct RezFileEntry {
    /// Record as stored in the archive
    pub header: FileRecordHeader,
    /// Name of the resource without its extension
    pub name: Box<str>,
    /// Raw name. To be used when name was incorrectly decoded.
    pub name_raw: Box<[u8]>,
    /// Extension decoded from the type tag, may be empty
    pub extension: Box<str>,
    /// Location of the resource, ending with its name and extension
    pub path: RezPath,
    /// Length of the record in the parent's list, excluding the entry tag
    pub data_size: u64,
}

impl RezFileEntry {
    pub(crate) fn new(header: FileRecordHeader, name_raw: Vec<u8>, parent: &RezPath) -> Self {
        let name: Box<str> = String::from_utf8_lossy(&name_raw).into();
        let extension: Box<str> = header.extension().into();
        let file_name = if extension.is_empty() {
            name.to_string()
        } else {
            format!("{name}.{extension}")
        };

        Self {
            header,
            path: parent.join(file_name),
            data_size: FILE_FIXED_FIELDS + FILE_TAG_AND_TERMINATOR + name_raw.len() as u64 + 1,
            name,
            name_raw: name_raw.into(),
            extension,
        }
    }

    /// Full name inside the archive, including the extension
    ///
    /// # Warnings
    ///
    /// It is dangerous to use this name directly when extracting an archive.
    /// Prefer [`RezPath::to_relative_path`] on [`RezFileEntry::path`], which
    /// refuses segments such as `..` that would escape the target directory.
    pub fn full_name(&self) -> String {
        self.path.to_string()
    }

    /// Offset of the resource's data from the start of the archive
    pub fn position(&self) -> u64 {
        self.header.pos as u64
    }

    /// Length of the resource's data
    pub fn size(&self) -> u64 {
        self.header.size as u64
    }

    pub fn time(&self) -> u32 {
        self.header.time
    }

    pub fn id(&self) -> u32 {
        self.header.id
    }

    pub fn num_keys(&self) -> u32 {
        self.header.num_keys
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{RezDirEntry, RezFileEntry};
    use crate::path::RezPath;
    use crate::types::{DirRecordHeader, FileRecordHeader};

    #[test]
    fn file_entry_names() {
        let parent = RezPath::root().join("worlds");
        let header = FileRecordHeader {
            pos: 300,
            size: 12,
            type_tag: *b"TAD\0",
            ..Default::default()
        };

        let entry = RezFileEntry::new(header, b"level1".to_vec(), &parent);

        assert_eq!(&*entry.name, "level1");
        assert_eq!(&*entry.extension, "DAT");
        assert_eq!(entry.full_name(), "worlds\\level1.DAT");
        assert_eq!(entry.data_size, 20 + 5 + 7);
        assert_eq!(entry.position(), 300);
        assert_eq!(entry.size(), 12);
    }

    #[test]
    fn file_entry_without_extension() {
        let entry = RezFileEntry::new(
            FileRecordHeader::default(),
            b"README".to_vec(),
            &RezPath::root(),
        );

        assert_eq!(entry.full_name(), "README");
    }

    #[test]
    fn dir_entry_names() {
        let parent = RezPath::root().join("art");
        let entry = RezDirEntry::new(DirRecordHeader::default(), b"sky".to_vec(), &parent);

        assert_eq!(entry.full_name(), "art\\sky\\");
        assert_eq!(entry.path.to_string(), "art\\sky");
        assert_eq!(entry.data_size, 12 + 4);
    }
}
