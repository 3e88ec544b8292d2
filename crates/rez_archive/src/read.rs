//! Types for reading REZ archives
//!

use bon::Builder;
use indexmap::IndexMap;
use std::{
    fmt::{self, Debug},
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::Path,
};
use tracing::{info, instrument};

use crate::{
    decode::Decoder,
    entry::{RezDirEntry, RezFileEntry},
    error::{Error, FileNotFoundError, FormatError, Result},
    types::{FixedRecord, RezHeader},
    walk::{walk, NameLimits},
};

/// Deepest directory nesting accepted by default
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Name limit used when the header leaves the largest name sizes at zero
pub const DEFAULT_NAME_LIMIT: u32 = 1024;

/// What to do with a record whose entry tag is neither a file nor a directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownEntryPolicy {
    /// Fail the read with [`FormatError::UnknownEntryType`]
    #[default]
    Reject,

    /// Step over the tag and twelve bytes, as older readers did, and keep going
    Skip,
}

/// Options for how the entry tree is decoded
#[derive(Debug, Clone, Copy, Builder)]
pub struct ReadOptions {
    /// Directories nested deeper than this fail the read
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Handling of unrecognized entry tags
    #[builder(default)]
    pub unknown_entries: UnknownEntryPolicy,

    /// Longest name, including the terminator, accepted when the header does not declare one
    #[builder(default = DEFAULT_NAME_LIMIT)]
    pub fallback_name_limit: u32,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A reader over the data of a single resource
pub struct RezFile<'a, R: Read + Seek> {
    entry: &'a RezFileEntry,
    reader: io::Take<&'a mut R>,
}

impl<'a, R: Read + Seek> Debug for RezFile<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RezFile({:#?})", self.entry)
    }
}

/// Methods for retrieving information on REZ file entries
impl<'a, R: Read + Seek> RezFile<'a, R> {
    /// Get the full name of the file
    pub fn name(&self) -> String {
        self.entry.full_name()
    }

    /// Get the size of the file, in bytes
    pub fn size(&self) -> u64 {
        self.entry.size()
    }

    /// Get the decoded entry backing this reader
    pub fn entry(&self) -> &RezFileEntry {
        self.entry
    }
}

impl<R: Read + Seek> Read for RezFile<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

/// REZ archive reader
///
/// Opening an archive only decodes the header, [`RezArchive::read`] walks the
/// directory tree. The archive owns its reader until it is dropped,
/// [`RezArchive::close`]d or unwrapped with [`RezArchive::into_inner`].
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_rez_contents(reader: impl Read + Seek) -> rez_archive::error::Result<()> {
///     let mut rez = rez_archive::RezArchive::new(reader)?;
///     rez.read()?;
///
///     for i in 0..rez.len() {
///         let mut file = rez.by_index(i)?;
///         println!("Filename: {}", file.name());
///         std::io::copy(&mut file, &mut std::io::stdout())?;
///     }
///
///     Ok(())
/// }
/// ```
pub struct RezArchive<R> {
    pub(crate) reader: R,
    pub(crate) len: u64,
    header: RezHeader,
    pub(crate) files: Vec<RezFileEntry>,
    dirs: Vec<RezDirEntry>,
    names: IndexMap<Box<str>, usize>,
}

impl<R> Debug for RezArchive<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RezArchive")
            .field("len", &self.len)
            .field("header", &self.header)
            .field("files", &self.files.len())
            .field("dirs", &self.dirs.len())
            .finish()
    }
}

impl RezArchive<File> {
    /// Open the archive at `path` and decode its header
    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn open(path: impl AsRef<Path>) -> Result<RezArchive<File>> {
        Self::new(File::open(path)?)
    }
}

impl<R> RezArchive<R> {
    /// The decoded main header
    pub fn header(&self) -> &RezHeader {
        &self.header
    }

    /// Total length of the archive in bytes
    pub fn archive_len(&self) -> u64 {
        self.len
    }

    /// Number of file entries found by the last read.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the last read found no file entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decoded file entries in the order they were walked
    pub fn files(&self) -> &[RezFileEntry] {
        &self.files
    }

    /// Decoded directory entries in the order they were walked
    pub fn directories(&self) -> &[RezDirEntry] {
        &self.dirs
    }

    /// Returns an iterator over the full names of all files in this archive.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(|s| s.as_ref())
    }

    /// Get the index of a file entry by full name, if it's present.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Total size of the files in the archive, if it can be known.
    pub fn decompressed_size(&self) -> Option<u128> {
        let mut total = 0u128;
        for file in &self.files {
            total = total.checked_add(file.size() as u128)?;
        }
        Some(total)
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Release the archive and the reader it owns
    pub fn close(self) {
        drop(self.reader);
    }
}

impl<R: Read + Seek> RezArchive<R> {
    /// Decode the header of an archive. Entries are decoded by [`RezArchive::read`].
    pub fn new(mut reader: R) -> Result<RezArchive<R>> {
        let len = reader.seek(SeekFrom::End(0))?;
        if len < RezHeader::SIZE {
            return Err(FormatError::TruncatedHeader {
                len,
                expected: RezHeader::SIZE,
            }
            .into());
        }

        let header = Decoder::new(&mut reader, len).read_record_at::<RezHeader>(0)?;

        Ok(RezArchive {
            reader,
            len,
            header,
            files: Vec::new(),
            dirs: Vec::new(),
            names: IndexMap::new(),
        })
    }

    /// Walk the directory tree with the default [`ReadOptions`]
    pub fn read(&mut self) -> Result<()> {
        self.read_with(ReadOptions::default())
    }

    /// Walk the directory tree, replacing entries from any previous read.
    ///
    /// If decoding fails no entries are kept.
    #[instrument(skip(self), err)]
    pub fn read_with(&mut self, options: ReadOptions) -> Result<()> {
        self.files.clear();
        self.dirs.clear();
        self.names.clear();

        let limits = NameLimits {
            dir: declared_or(self.header.largest_dir_name_size, options.fallback_name_limit),
            file: declared_or(self.header.largest_rez_name_size, options.fallback_name_limit),
        };

        let mut decoder = Decoder::new(&mut self.reader, self.len);
        let tree = walk(
            &mut decoder,
            self.header.root_dir_pos as u64,
            self.header.root_dir_size as u64,
            limits,
            &options,
        )?;

        let mut names: IndexMap<Box<str>, usize> = IndexMap::with_capacity(tree.files.len());
        for (index, file) in tree.files.iter().enumerate() {
            names.entry(file.full_name().into()).or_insert(index);
        }

        info!(
            files = tree.files.len(),
            directories = tree.dirs.len(),
            "read archive"
        );

        self.files = tree.files;
        self.dirs = tree.dirs;
        self.names = names;

        Ok(())
    }

    /// Search for a file entry by full name
    pub fn by_name(&mut self, name: &str) -> Result<RezFile<'_, R>> {
        let Some(index) = self.index_for_name(name) else {
            return Err(Error::FileNotFound(FileNotFoundError::Name(
                name.to_owned(),
            )));
        };
        self.by_index(index)
    }

    /// Get a contained file by index
    pub fn by_index(&mut self, file_number: usize) -> Result<RezFile<'_, R>> {
        let entry = self
            .files
            .get(file_number)
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(file_number)))?;

        check_bounds(entry, self.len)?;
        self.reader.seek(SeekFrom::Start(entry.position()))?;

        Ok(RezFile {
            entry,
            reader: (&mut self.reader).take(entry.size()),
        })
    }
}

fn declared_or(declared: u32, fallback: u32) -> u32 {
    if declared == 0 {
        fallback
    } else {
        declared
    }
}

/// Make sure the data of `entry` lies within an archive of `len` bytes
pub(crate) fn check_bounds(entry: &RezFileEntry, len: u64) -> Result<()> {
    let start = entry.position();
    let end = start + entry.size();
    if end > len || (entry.size() > 0 && start >= len) {
        return Err(FormatError::EntryOutOfBounds {
            name: entry.full_name().into(),
            start,
            end,
            len,
        }
        .into());
    }
    Ok(())
}
