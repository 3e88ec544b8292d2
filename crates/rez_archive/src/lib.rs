//! This library handles reading and extracting **REZ** resource archives.
//!
//! # REZ Archive Format Documentation
//!
//! A REZ file bundles a directory tree of named binary resources into a single file.
//! There is no central table of contents: a fixed header points at the record list of
//! the root directory, and every directory record points at the record list of its
//! children. Record lengths are never stored, they are derived from the name lengths.
//!
//! ## File Structure
//!
//! A REZ file consists of a header, followed by resource data and directory record
//! lists in no particular order.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Signature              | 127 bytes: Free form banner, not necessarily terminated    |
//! | 0x007F         | Format Version         | 4 bytes: Version of the file format                        |
//! | 0x0083         | Root Dir Position      | 4 bytes: Offset to the root directory record list          |
//! | 0x0087         | Root Dir Size          | 4 bytes: Length of the root directory record list          |
//! | 0x008B         | Root Dir Time          | 4 bytes: When the root directory was last updated          |
//! | 0x008F         | Next Write Position    | 4 bytes: Where the next write would go                     |
//! | 0x0093         | Time                   | 4 bytes: When the archive was last updated                 |
//! | 0x0097         | Largest Key Array      | 4 bytes: Size of the largest key array                     |
//! | 0x009B         | Largest Dir Name       | 4 bytes: Largest directory name, including terminator      |
//! | 0x009F         | Largest Rez Name       | 4 bytes: Largest resource name, including terminator       |
//! | 0x00A3         | Largest Comment        | 4 bytes: Largest comment, including terminator             |
//! | 0x00A7         | Is Sorted              | 1 byte: `1` if entries are sorted                          |
//!
//! ### Record Lists
//!
//! A record list is a run of records filling `[position, position + size)`. Each record
//! starts with a 4-byte entry tag: `0` for a resource, `1` for a directory.
//!
//! A directory record follows the tag with:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Position               | 4 bytes: Offset to the directory's record list          |
//! | 0x0004         | Size                   | 4 bytes: Length of the directory's record list          |
//! | 0x0008         | Time                   | 4 bytes: When the directory was last updated            |
//! | 0x000C         | Name                   | Null terminated directory name                          |
//!
//! A resource record follows the tag with:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Position               | 4 bytes: Offset to the resource data                    |
//! | 0x0004         | Size                   | 4 bytes: Length of the resource data                    |
//! | 0x0008         | Time                   | 4 bytes: When the resource was last updated             |
//! | 0x000C         | ID                     | 4 bytes: Numeric identifier                             |
//! | 0x0010         | Type                   | 4 bytes: Extension, back to front, padded with nulls    |
//! | 0x0014         | Key Count              | 4 bytes: Number of keys                                 |
//! | 0x0018         | Name                   | Null terminated resource name                           |
//!
//! The next record starts `12 + name + 1` bytes after the tag of a directory record
//! and `25 + name + 1` bytes after the tag of a resource record, which leaves room for
//! the empty comment that follows resource names.
//!
//! Records with a size of zero are placeholders. They are stepped over but never
//! reported, and zero sized directories are not descended into.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.rez`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Path Separator**: `\`, directories are reported with a trailing separator
//!

mod decode;
mod walk;

pub mod entry;
pub mod error;
pub mod extract;
pub mod path;
pub mod read;
pub mod types;

pub use entry::{RezDirEntry, RezFileEntry};
pub use extract::ExtractReport;
pub use path::RezPath;
pub use read::{ReadOptions, RezArchive, UnknownEntryPolicy};
