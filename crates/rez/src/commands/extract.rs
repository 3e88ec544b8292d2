use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use rez_archive::error::{Error, FileNotFoundError};
use std::path::PathBuf;
use tracing::{error, info};

use super::ArchiveArgs;

#[derive(Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    archive: ArchiveArgs,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Only extract the entry with this full name, e.g. `textures\sky.dtx`
    #[arg(short, long, value_name = "NAME")]
    entry: Option<String>,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let mut rez = self.archive.open()?;

        if let Some(name) = &self.entry {
            let index = rez
                .index_for_name(name)
                .ok_or_else(|| Error::from(FileNotFoundError::Name(name.clone())))?;
            let entry = rez.files()[index].clone();

            let p = self.directory.join(entry.path.to_relative_path()?);
            info!("writing {}", p.display());
            rez.extract_file(&entry, &p)?;
            return Ok(());
        }

        std::fs::create_dir_all(&self.directory).into_diagnostic()?;
        let report = rez.extract_all(&self.directory);

        for failure in &report.errors {
            error!("{}: {}", failure, failure.source);
        }

        if report.is_success() {
            info!(
                "wrote {} files to {}",
                report.extracted,
                self.directory.display()
            );
            Ok(())
        } else {
            Err(miette!(
                "{} of {} entries could not be extracted",
                report.errors.len(),
                rez.len()
            ))
        }
    }
}
