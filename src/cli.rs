use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tsort")]
#[command(about = "Write a total ordering consistent with the partial ordering in FILE")]
#[command(version)]
pub struct Cli {
    /// Whitespace-separated pairs of items; `-` or no FILE reads standard input
    pub file: Option<PathBuf>,
}

impl Cli {
    /// The input path, or `None` when reading standard input.
    pub fn input_path(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}
