//! Command-line interface for rawbmp

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rawbmp")]
#[command(about = "Inspect and re-encode uncompressed 24-bit BMP files", long_about = None)]
pub struct Cli {
    /// BMP file to read
    pub input: PathBuf,

    /// Print the decoded header fields and exit
    #[arg(long)]
    pub header: bool,

    /// Where the re-encoded copy is written (created or overwritten)
    #[arg(short, long, default_value = "new.bmp")]
    pub output: PathBuf,

    /// How strictly to validate headers before building the pixel matrix
    #[arg(long, value_enum, default_value_t = StrictnessArg::Standard)]
    pub strictness: StrictnessArg,

    /// Refuse payloads larger than this many bytes
    #[arg(long)]
    pub max_bytes: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrictnessArg {
    Strict,
    Standard,
    Permissive,
}

impl From<StrictnessArg> for rawbmp::Strictness {
    fn from(arg: StrictnessArg) -> Self {
        match arg {
            StrictnessArg::Strict => rawbmp::Strictness::Strict,
            StrictnessArg::Standard => rawbmp::Strictness::Standard,
            StrictnessArg::Permissive => rawbmp::Strictness::Permissive,
        }
    }
}
