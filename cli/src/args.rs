use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct CompressArgs {
    /// File or directory to compress.
    pub source: PathBuf,

    /// Archive to create, must end with .zst.
    pub archive: PathBuf,

    /// Print the elapsed wall-clock time.
    #[arg(short, long, action)]
    pub benchmark: bool,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Archive to extract, must end with .zst.
    pub archive: PathBuf,

    /// Directory to extract into, or the output file for single-file archives.
    #[arg(default_value = ".")]
    pub destination: PathBuf,

    /// Print the elapsed wall-clock time.
    #[arg(short, long, action)]
    pub benchmark: bool,
}
