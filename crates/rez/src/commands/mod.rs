use std::{fs::File, path::PathBuf};

use clap::Args;
use miette::{Context, Result};
use rez_archive::{read::DEFAULT_MAX_DEPTH, ReadOptions, RezArchive, UnknownEntryPolicy};

pub mod extract;
pub mod info;
pub mod list;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Show the header of a REZ file
    Info(info::InfoArgs),
    /// List the entries of a REZ file
    List(list::ListArgs),
    /// Extract a REZ file into a directory
    Extract(extract::ExtractArgs),
}

impl Commands {
    pub fn handle(&self) -> Result<()> {
        match self {
            Commands::Info(info) => info.handle(),
            Commands::List(list) => list.handle(),
            Commands::Extract(extract) => extract.handle(),
        }
    }
}

/// Options shared by every command that reads an archive
#[derive(Args)]
pub struct ArchiveArgs {
    /// An input REZ file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Deepest directory nesting to accept
    #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Skip records with an unknown type instead of failing
    #[arg(long, default_value_t = false)]
    skip_unknown: bool,
}

impl ArchiveArgs {
    fn options(&self) -> ReadOptions {
        let unknown_entries = if self.skip_unknown {
            UnknownEntryPolicy::Skip
        } else {
            UnknownEntryPolicy::Reject
        };

        ReadOptions::builder()
            .max_depth(self.max_depth)
            .unknown_entries(unknown_entries)
            .build()
    }

    /// Open the archive and walk its directory tree
    pub fn open(&self) -> Result<RezArchive<File>> {
        let mut rez = RezArchive::<File>::open(&self.file)
            .context(format!("path: {}", self.file.display()))?;
        rez.read_with(self.options())?;
        Ok(rez)
    }
}
