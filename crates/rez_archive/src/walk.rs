//! Decoding of the directory tree.

use std::io::{Read, Seek};

use tracing::{debug, instrument, warn};

use crate::{
    decode::Decoder,
    entry::{RezDirEntry, RezFileEntry},
    error::{FormatError, Result},
    path::RezPath,
    read::{ReadOptions, UnknownEntryPolicy},
    types::{DirRecordHeader, EntryKind, FileRecordHeader, FixedRecord},
};

/// Entries collected by [`walk`], in depth-first order
#[derive(Debug, Default)]
pub(crate) struct EntryTree {
    pub files: Vec<RezFileEntry>,
    pub dirs: Vec<RezDirEntry>,
}

/// Longest names the walker accepts, including the terminator
#[derive(Debug, Clone, Copy)]
pub(crate) struct NameLimits {
    pub dir: u32,
    pub file: u32,
}

/// A directory record list still being decoded
struct Frame {
    cursor: u64,
    end: u64,
    parent: RezPath,
    depth: usize,
}

impl Frame {
    fn new(start: u64, size: u64, parent: RezPath, depth: usize, len: u64) -> Result<Self> {
        // an empty list may sit right at the end of the archive
        if start > len || (size > 0 && start >= len) {
            return Err(FormatError::OffsetOutOfRange { offset: start, len }.into());
        }
        let end = start + size;
        if end > len {
            return Err(FormatError::RangeOutOfBounds { start, end, len }.into());
        }

        Ok(Self {
            cursor: start,
            end,
            parent,
            depth,
        })
    }
}

/// Walk the record list at `[start, start + size)` and every directory below it.
///
/// Directories are handled with an explicit stack, a child's records are fully
/// decoded before the parent continues so the output matches a recursive walk.
#[instrument(skip(decoder, options), err)]
pub(crate) fn walk<R: Read + Seek>(
    decoder: &mut Decoder<'_, R>,
    start: u64,
    size: u64,
    limits: NameLimits,
    options: &ReadOptions,
) -> Result<EntryTree> {
    let len = decoder.archive_len();
    let mut tree = EntryTree::default();
    let mut stack = vec![Frame::new(start, size, RezPath::root(), 0, len)?];

    while let Some(frame) = stack.last_mut() {
        if frame.cursor >= frame.end {
            stack.pop();
            continue;
        }

        let offset = frame.cursor;
        let tag = decoder.read_i32_at(offset)?;
        let record = offset + EntryKind::TAG_SIZE;

        let child = match EntryKind::try_from(tag) {
            Ok(EntryKind::File) => {
                let header: FileRecordHeader = decoder.read_record_at(record)?;
                let name = decoder
                    .read_null_terminated_at(record + FileRecordHeader::SIZE, limits.file)?;
                let entry = RezFileEntry::new(header, name, &frame.parent);
                debug!(
                    name = %entry.path,
                    pos = entry.position(),
                    size = entry.size(),
                    "file record"
                );

                frame.cursor = record + entry.data_size.max(DirRecordHeader::SIZE);
                if entry.size() > 0 {
                    tree.files.push(entry);
                }
                None
            }
            Ok(EntryKind::Directory) => {
                let header: DirRecordHeader = decoder.read_record_at(record)?;
                let name = decoder
                    .read_null_terminated_at(record + DirRecordHeader::SIZE, limits.dir)?;
                let entry = RezDirEntry::new(header, name, &frame.parent);
                debug!(
                    name = %entry.path,
                    pos = entry.position(),
                    size = entry.size(),
                    "directory record"
                );

                frame.cursor = record + entry.data_size.max(DirRecordHeader::SIZE);
                if entry.size() > 0 {
                    let depth = frame.depth + 1;
                    if depth > options.max_depth {
                        return Err(FormatError::TooDeep {
                            depth,
                            max: options.max_depth,
                        }
                        .into());
                    }
                    let child = Frame::new(
                        entry.position(),
                        entry.size(),
                        entry.path.clone(),
                        depth,
                        len,
                    )?;
                    tree.dirs.push(entry);
                    Some(child)
                } else {
                    None
                }
            }
            Err(tag) => match options.unknown_entries {
                UnknownEntryPolicy::Reject => {
                    return Err(FormatError::UnknownEntryType { tag, offset }.into());
                }
                UnknownEntryPolicy::Skip => {
                    warn!(tag, offset, "skipping unknown entry type");
                    frame.cursor = record + DirRecordHeader::SIZE;
                    None
                }
            },
        };

        if let Some(child) = child {
            stack.push(child);
        }
    }

    Ok(tree)
}
