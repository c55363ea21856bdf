use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Subcommand;
use zarc::{ArchiveKind, EncodeOptions, Report};

use crate::args::{CompressArgs, ExtractArgs};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress a file or directory into a .zst archive
    Compress(CompressArgs),
    /// Extract a .zst archive
    Extract(ExtractArgs),
}

impl Command {
    fn benchmark(&self) -> bool {
        match self {
            Command::Compress(CompressArgs { benchmark, .. })
            | Command::Extract(ExtractArgs { benchmark, .. }) => *benchmark,
        }
    }

    pub fn run(self) -> Result<()> {
        let benchmark = self.benchmark();
        let start = Instant::now();

        let line = match self {
            Command::Compress(args) => {
                let report = zarc::compress(&args.source, &args.archive, &EncodeOptions::new())
                    .with_context(|| format!("Failed to compress {}", args.source.display()))?;
                compress_summary(&report)
            }
            Command::Extract(args) => {
                let report = zarc::extract(&args.archive, &args.destination)
                    .with_context(|| format!("Failed to extract {}", args.archive.display()))?;
                extract_summary(&report)
            }
        };

        println!("{line}");
        if benchmark {
            println!("{}", elapsed_summary(start.elapsed()));
        }

        Ok(())
    }
}

pub fn compress_summary(report: &Report) -> String {
    format!("Created {} archive: {}", report.kind, report.path.display())
}

pub fn extract_summary(report: &Report) -> String {
    match report.kind {
        ArchiveKind::Tar => format!(
            "Extracted {} archive into directory: {}",
            report.kind,
            report.path.display()
        ),
        ArchiveKind::Bare => format!("Extracted file to: {}", report.path.display()),
    }
}

pub fn elapsed_summary(elapsed: Duration) -> String {
    format!("Elapsed time: {:.3} s", elapsed.as_secs_f64())
}
