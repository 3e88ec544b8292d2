use clap::Args;
use miette::Result;
use owo_colors::{OwoColorize, Stream::Stdout};

use super::ArchiveArgs;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    archive: ArchiveArgs,
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!(
        "{:>24} {}",
        label.if_supports_color(Stdout, |t| t.bold()),
        value
    );
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let rez = self.archive.open()?;
        let header = rez.header();

        field("signature", header.signature_text().trim_end());
        field("format version", header.format_version);
        field("root directory", header.root_dir_pos);
        field("root directory size", header.root_dir_size);
        field("root directory time", header.root_dir_time);
        field("next write position", header.next_write_pos);
        field("time", header.time);
        field("largest key array", header.largest_key_array);
        field("largest dir name", header.largest_dir_name_size);
        field("largest rez name", header.largest_rez_name_size);
        field("largest comment", header.largest_comment_size);
        field("sorted", header.is_sorted());
        field("archive size", rez.archive_len());
        field("files", rez.len());
        field("directories", rez.directories().len());
        if let Some(total) = rez.decompressed_size() {
            field("total file size", total);
        }

        Ok(())
    }
}
