//! Error types that can be emitted from this library

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for [`FormatError`]
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),

    /// entry name can not be used as a filesystem path
    #[error("entry {0} can not be used as a filesystem path")]
    InvalidPath(Box<str>),

    /// {0}
    #[error("{0}")]
    CustomError(String),
}

/// Structural problems found while decoding an archive
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The stream ends before the main header does
    #[error("file is too short for a rez header ({len} of {expected} bytes)")]
    TruncatedHeader { len: u64, expected: u64 },

    /// A read was requested at or past the end of the archive
    #[error("offset out of range: {offset}/{len}")]
    OffsetOutOfRange { offset: u64, len: u64 },

    /// A directory declares a record list that runs past the end of the archive
    #[error("directory range {start}..{end} exceeds archive length {len}")]
    RangeOutOfBounds { start: u64, end: u64, len: u64 },

    /// A fixed size record runs past the end of the archive
    #[error("record at {offset} needs {needed} bytes but the archive ends at {len}")]
    Truncated { offset: u64, needed: u64, len: u64 },

    /// A name runs into the end of the archive without a terminator
    #[error("name at {offset} is missing its null terminator")]
    MissingTerminator { offset: u64 },

    /// A name is longer than the header allows
    #[error("name at {offset} exceeds the maximum of {limit} bytes")]
    #[diagnostic(help("the header declares the largest name sizes, see ReadOptions::fallback_name_limit for archives that leave them unset"))]
    NameTooLong { offset: u64, limit: u32 },

    /// An entry tag is neither a file nor a directory
    #[error("unknown entry type {tag} at {offset}")]
    #[diagnostic(help("use UnknownEntryPolicy::Skip to step over unrecognized records"))]
    UnknownEntryType { tag: i32, offset: u64 },

    /// Directories nest deeper than allowed
    #[error("directory nesting depth {depth} exceeds the maximum of {max}")]
    TooDeep { depth: usize, max: usize },

    /// A file entry points outside of the archive
    #[error("entry {name} spans {start}..{end} which exceeds archive length {len}")]
    EntryOutOfBounds {
        name: Box<str>,
        start: u64,
        end: u64,
        len: u64,
    },
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested file")]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// A single entry that failed during [`crate::RezArchive::extract_all`]
#[derive(Error, Diagnostic, Debug)]
#[error("unable to extract {name} to {}", .destination.display())]
pub struct ExtractionError {
    /// Full name of the entry inside the archive
    pub name: Box<str>,

    /// Where the entry should have been written
    pub destination: PathBuf,

    /// What went wrong
    #[source]
    pub source: Error,
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
