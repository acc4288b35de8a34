// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface definition.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use docscan_core::PageFormat;

#[derive(Parser, Debug)]
#[command(name = "docscan")]
#[command(version, about = "Flatten photographed documents into clean, square page images")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file [default: $XDG_CONFIG_HOME/docscan/config.json]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log pipeline details (corner coordinates, candidate counts)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rectify a single photo
    Scan(ScanArgs),

    /// Rectify several photos and combine them into one PDF
    Assemble(AssembleArgs),

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        write: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Photo of the document
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output path, .png or .jpg [default: input_scanned.jpg]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ScanArgs {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self.input.file_stem().unwrap_or_default().to_string_lossy();
            let parent = self.input.parent().unwrap_or(Path::new("."));
            parent.join(format!("{}_scanned.{}", stem, PageFormat::Jpeg.extension()))
        })
    }
}

#[derive(clap::Args, Debug)]
pub struct AssembleArgs {
    /// Photos, one per page, in page order
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Destination PDF
    #[arg(short, long, required = true)]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_beside_input() {
        let cli = Cli::try_parse_from(["docscan", "scan", "photos/receipt.png"]).unwrap();
        let Command::Scan(args) = cli.command else {
            panic!("expected scan subcommand");
        };
        assert_eq!(args.output_path(), PathBuf::from("photos/receipt_scanned.jpg"));
    }

    #[test]
    fn explicit_output_wins() {
        let cli =
            Cli::try_parse_from(["docscan", "scan", "a.jpg", "-o", "flat.png"]).unwrap();
        let Command::Scan(args) = cli.command else {
            panic!("expected scan subcommand");
        };
        assert_eq!(args.output_path(), PathBuf::from("flat.png"));
    }

    #[test]
    fn assemble_keeps_page_order() {
        let cli = Cli::try_parse_from([
            "docscan", "assemble", "p1.jpg", "p2.jpg", "p3.jpg", "-o", "out.pdf",
        ])
        .unwrap();
        let Command::Assemble(args) = cli.command else {
            panic!("expected assemble subcommand");
        };
        let names: Vec<_> = args.inputs.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        assert_eq!(names, ["p1.jpg", "p2.jpg", "p3.jpg"]);
    }

    #[test]
    fn assemble_requires_output() {
        assert!(Cli::try_parse_from(["docscan", "assemble", "p1.jpg"]).is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["docscan", "config", "--write", "-v", "--config", "c.json"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert!(matches!(cli.command, Command::Config { write: true }));
    }
}
