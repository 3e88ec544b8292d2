//! Copying resources out of an archive onto the filesystem.

use std::{
    fs,
    io::{Read, Seek},
    path::Path,
};

use tracing::{debug, info, instrument, warn};

use crate::{
    decode::Decoder,
    entry::RezFileEntry,
    error::{ExtractionError, Result},
    read::{check_bounds, RezArchive},
};

/// Outcome of [`RezArchive::extract_all`]
#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Number of files written
    pub extracted: usize,

    /// Entries that could not be written
    pub errors: Vec<ExtractionError>,
}

impl ExtractReport {
    /// Whether every entry was written
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<R: Read + Seek> RezArchive<R> {
    /// Write the data of `entry` to `destination`, creating missing parent
    /// directories and replacing an existing file.
    ///
    /// The data is read completely before the destination is touched. Returns the
    /// number of bytes written.
    #[instrument(
        skip(self, entry, destination),
        fields(name = %entry.path, destination = %destination.as_ref().display()),
        err
    )]
    pub fn extract_file(
        &mut self,
        entry: &RezFileEntry,
        destination: impl AsRef<Path>,
    ) -> Result<u64> {
        extract_entry(&mut self.reader, self.len, entry, destination.as_ref())
    }

    /// Extract every file entry below `output_dir`, following the archive's
    /// directory layout.
    ///
    /// Failures are collected in the report and never stop the remaining entries.
    #[instrument(skip(self, output_dir), fields(output_dir = %output_dir.as_ref().display()))]
    pub fn extract_all(&mut self, output_dir: impl AsRef<Path>) -> ExtractReport {
        let output_dir = output_dir.as_ref();
        let mut report = ExtractReport::default();

        for entry in &self.files {
            let (destination, result) = match entry.path.to_relative_path() {
                Ok(relative) => {
                    let destination = output_dir.join(relative);
                    let result = extract_entry(&mut self.reader, self.len, entry, &destination);
                    (destination, result)
                }
                Err(err) => (output_dir.to_path_buf(), Err(err)),
            };

            match result {
                Ok(_) => report.extracted += 1,
                Err(source) => {
                    warn!(name = %entry.path, error = %source, "failed to extract");
                    report.errors.push(ExtractionError {
                        name: entry.full_name().into(),
                        destination,
                        source,
                    });
                }
            }
        }

        info!(
            extracted = report.extracted,
            failed = report.errors.len(),
            "extracted archive"
        );
        report
    }
}

fn extract_entry<R: Read + Seek>(
    reader: &mut R,
    len: u64,
    entry: &RezFileEntry,
    destination: &Path,
) -> Result<u64> {
    check_bounds(entry, len)?;
    let data = Decoder::new(reader, len).read_bytes_at(entry.position(), entry.size())?;

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, &data)?;

    debug!(
        name = %entry.path,
        destination = %destination.display(),
        bytes = data.len(),
        "wrote file"
    );
    Ok(data.len() as u64)
}
