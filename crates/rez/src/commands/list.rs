use clap::Args;
use itertools::Itertools;
use miette::Result;
use owo_colors::{OwoColorize, Stream::Stdout};

use super::ArchiveArgs;

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    archive: ArchiveArgs,

    /// List directories instead of files
    #[arg(long, default_value_t = false)]
    directories: bool,

    /// Show position, size and time for each entry
    #[arg(short, long, default_value_t = false)]
    long: bool,

    /// Order entries by name instead of archive order
    #[arg(short, long, default_value_t = false)]
    sorted: bool,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let rez = self.archive.open()?;

        let rows: Vec<(String, String)> = if self.directories {
            rez.directories()
                .iter()
                .map(|d| {
                    let details =
                        format!("{:>10} {:>10} {:>10}", d.position(), d.size(), d.time());
                    (d.full_name(), details)
                })
                .collect()
        } else {
            rez.files()
                .iter()
                .map(|f| {
                    let details = format!(
                        "{:>10} {:>10} {:>10} {:>6}",
                        f.position(),
                        f.size(),
                        f.time(),
                        f.id()
                    );
                    (f.full_name(), details)
                })
                .collect()
        };

        let rows = if self.sorted {
            rows.into_iter()
                .sorted_by(|(a, _), (b, _)| a.cmp(b))
                .collect_vec()
        } else {
            rows
        };

        let lines = rows
            .iter()
            .map(|(name, details)| {
                if self.long {
                    let details = details.if_supports_color(Stdout, |t| t.dimmed());
                    format!("{details} {name}")
                } else {
                    name.clone()
                }
            })
            .join("\n");

        if !lines.is_empty() {
            println!("{lines}");
        }

        Ok(())
    }
}
