//! rawbmp - BMP header inspector and re-encoder

use anyhow::{Context, Result};
use clap::Parser;
use rawbmp::{DecodeRequest, HeaderReport, Limits, Sample, Strictness};
use tracing::Level;

mod cli;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let limits = Limits {
        max_memory_bytes: cli.max_bytes,
        ..Limits::default()
    };
    let image = DecodeRequest::new()
        .with_limits(&limits)
        .decode_file(&cli.input)
        .with_context(|| format!("loading BMP file {}", cli.input.display()))?;

    if cli.header {
        println!("{}", HeaderReport::new(&image));
        return Ok(());
    }

    let strictness = Strictness::from(cli.strictness);
    if strictness != Strictness::Permissive {
        rawbmp::validate(&image, strictness)
            .with_context(|| format!("validating {}", cli.input.display()))?;
    }

    let matrix = rawbmp::build_matrix(&image)
        .with_context(|| format!("building pixel matrix for {}", cli.input.display()))?;
    println!(
        "Pixel matrix: {} rows x {} columns (stride {} bytes)",
        matrix.rows(),
        matrix.width(),
        matrix.row_stride()
    );
    match matrix.first_sample() {
        Some(Sample::Present(px)) => {
            println!("First pixel (B, G, R): {}, {}, {}", px.b, px.g, px.r)
        }
        Some(Sample::Defaulted) => println!("First pixel: missing from payload"),
        None => println!("First pixel: matrix is empty"),
    }
    if matrix.defaulted_count() > 0 {
        println!("Zero-filled pixels: {}", matrix.defaulted_count());
    }

    rawbmp::write_file(&cli.output, &image)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    println!("Wrote {}", cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn write_sample(path: &Path) -> rawbmp::DecodedImage {
        let pixels = [0, 0, 255, 0, 255, 0, 255, 0, 0, 9, 9, 9];
        let image = rawbmp::DecodedImage::from_bgr24(&pixels, 2, 2).unwrap();
        rawbmp::write_file(path, &image).unwrap();
        image
    }

    #[test]
    fn header_mode_reads_the_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        write_sample(&input);

        let cli = Cli::parse_from(["rawbmp", input.to_str().unwrap(), "--header"]);
        run(&cli).unwrap();
    }

    #[test]
    fn reencode_writes_the_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("out.bmp");
        let image = write_sample(&input);

        let cli = Cli::parse_from([
            "rawbmp",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        assert!(output.exists());
        assert_eq!(rawbmp::decode_file(&output).unwrap(), image);
        assert_eq!(std::fs::read(&output).unwrap(), std::fs::read(&input).unwrap());
    }

    #[test]
    fn missing_input_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("does-not-exist.bmp");
        let output = dir.path().join("out.bmp");

        let cli = Cli::parse_from([
            "rawbmp",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        let err = run(&cli).unwrap_err();

        assert!(format!("{err:#}").contains("does-not-exist.bmp"), "{err:#}");
        assert!(!output.exists());
    }
}
