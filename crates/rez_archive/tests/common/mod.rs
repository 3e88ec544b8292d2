//! Builds small archives in memory for the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Seek, SeekFrom, Write};

use binrw::BinWrite;
use rez_archive::types::{DirRecordHeader, EntryKind, FileRecordHeader, RezHeader};

pub enum Node {
    File {
        name: String,
        ext: String,
        data: Vec<u8>,
        pos: Option<u32>,
    },
    Dir {
        name: String,
        children: Vec<Node>,
    },
}

pub fn file(name: &str, ext: &str, data: &[u8]) -> Node {
    Node::File {
        name: name.into(),
        ext: ext.into(),
        data: data.to_vec(),
        pos: None,
    }
}

/// A file whose record claims its data lives at `pos`
pub fn file_at(name: &str, ext: &str, data: &[u8], pos: u32) -> Node {
    Node::File {
        name: name.into(),
        ext: ext.into(),
        data: data.to_vec(),
        pos: Some(pos),
    }
}

pub fn dir(name: &str, children: Vec<Node>) -> Node {
    Node::Dir {
        name: name.into(),
        children,
    }
}

pub fn build(root: Vec<Node>) -> Vec<u8> {
    build_with(root, |_| {})
}

/// Build an archive, letting `patch` adjust the header before it is written
pub fn build_with(root: Vec<Node>, patch: impl FnOnce(&mut RezHeader)) -> Vec<u8> {
    let mut builder = Builder {
        out: Cursor::new(vec![0u8; 168]),
        largest_dir: 0,
        largest_rez: 0,
        next_id: 0,
    };
    builder.out.seek(SeekFrom::End(0)).unwrap();

    let (root_dir_pos, root_dir_size) = builder.write_list(&root);
    let end = builder.len();

    let mut header = RezHeader {
        root_dir_pos,
        root_dir_size,
        next_write_pos: end,
        largest_dir_name_size: builder.largest_dir,
        largest_rez_name_size: builder.largest_rez,
        largest_comment_size: 1,
        ..Default::default()
    };
    patch(&mut header);

    builder.out.seek(SeekFrom::Start(0)).unwrap();
    header.write(&mut builder.out).unwrap();

    builder.out.into_inner()
}

/// Type tag for `ext`, back to front and padded with nulls
pub fn type_tag(ext: &str) -> [u8; 4] {
    let mut tag = [0u8; 4];
    for (slot, b) in tag.iter_mut().zip(ext.bytes().rev()) {
        *slot = b;
    }
    tag
}

struct Builder {
    out: Cursor<Vec<u8>>,
    largest_dir: u32,
    largest_rez: u32,
    next_id: u32,
}

impl Builder {
    fn len(&self) -> u32 {
        self.out.get_ref().len() as u32
    }

    /// Write the payloads of `nodes`, then their record list. Returns the list's position and size.
    fn write_list(&mut self, nodes: &[Node]) -> (u32, u32) {
        let mut placed = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Node::File { data, pos, .. } => {
                    let at = self.len();
                    self.out.write_all(data).unwrap();
                    placed.push((pos.unwrap_or(at), data.len() as u32));
                }
                Node::Dir { children, .. } => placed.push(self.write_list(children)),
            }
        }

        let start = self.len();
        for (node, (pos, size)) in nodes.iter().zip(placed) {
            match node {
                Node::File { name, ext, .. } => {
                    i32::from(EntryKind::File).write_le(&mut self.out).unwrap();
                    FileRecordHeader {
                        pos,
                        size,
                        time: 0,
                        id: self.next_id,
                        type_tag: type_tag(ext),
                        num_keys: 0,
                    }
                    .write(&mut self.out)
                    .unwrap();
                    self.out.write_all(name.as_bytes()).unwrap();
                    // name terminator and an empty comment
                    self.out.write_all(&[0, 0]).unwrap();

                    self.next_id += 1;
                    self.largest_rez = self.largest_rez.max(name.len() as u32 + 1);
                }
                Node::Dir { name, .. } => {
                    i32::from(EntryKind::Directory)
                        .write_le(&mut self.out)
                        .unwrap();
                    DirRecordHeader { pos, size, time: 0 }
                        .write(&mut self.out)
                        .unwrap();
                    self.out.write_all(name.as_bytes()).unwrap();
                    self.out.write_all(&[0]).unwrap();

                    self.largest_dir = self.largest_dir.max(name.len() as u32 + 1);
                }
            }
        }

        (start, self.len() - start)
    }
}
