//! Entry paths inside an archive.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Separator used by the archive when rendering full names
pub const SEPARATOR: char = '\\';

/// Location of an entry as a list of segments, from the root directory down.
///
/// Segments are only joined when the path is rendered, either with [`SEPARATOR`]
/// through [`fmt::Display`] or as a native relative path through
/// [`RezPath::to_relative_path`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RezPath {
    segments: Vec<Box<str>>,
}

impl RezPath {
    /// The root directory
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path with `segment` appended
    pub fn join(&self, segment: impl Into<Box<str>>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[Box<str>] {
        &self.segments
    }

    /// Number of directories between the root and this path
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, if any
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_ref())
    }

    /// Convert to a relative filesystem path with one component per segment.
    ///
    /// Fails for segments that would escape the target directory or that the
    /// platform would split further.
    pub fn to_relative_path(&self) -> Result<PathBuf> {
        let mut out = PathBuf::new();
        for segment in &self.segments {
            if !is_safe_segment(segment) {
                return Err(Error::InvalidPath(self.to_string().into()));
            }
            out.push(segment.as_ref());
        }
        Ok(out)
    }
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', ':', '\0'])
}

impl fmt::Display for RezPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i != 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl<S: Into<Box<str>>> FromIterator<S> for RezPath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}
