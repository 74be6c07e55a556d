use std::path::PathBuf;

use anyhow::{Context, Result};
use bmpfilter::{FilterOptions, default_output_path, process_file};
use clap::Parser;

/// Apply grayscale, color-shift and resize filters to a 24-bit BMP file.
#[derive(Debug, Parser)]
#[command(name = "bmpfilter", version, about)]
struct Cli {
    /// Input 24-bit uncompressed BMP file.
    input: PathBuf,

    /// Output file name [default: <INPUT> with "_copy" before the extension]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Apply grayscale filter.
    #[arg(short = 'w', long)]
    grayscale: bool,

    /// Shift red channel by VALUE.
    #[arg(short, long, value_name = "VALUE", allow_negative_numbers = true)]
    red: Option<i32>,

    /// Shift green channel by VALUE.
    #[arg(short, long, value_name = "VALUE", allow_negative_numbers = true)]
    green: Option<i32>,

    /// Shift blue channel by VALUE.
    #[arg(short, long, value_name = "VALUE", allow_negative_numbers = true)]
    blue: Option<i32>,

    /// Scale image by FACTOR (nearest neighbor).
    #[arg(short, long, value_name = "FACTOR", value_parser = parse_scale)]
    scale: Option<f32>,

    /// Log each step to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            grayscale: self.grayscale,
            red_shift: self.red,
            green_shift: self.green,
            blue_shift: self.blue,
            scale: self.scale,
        }
    }
}

fn parse_scale(s: &str) -> Result<f32, String> {
    let factor: f32 = s
        .parse()
        .map_err(|_| format!("invalid scale factor: {s}"))?;
    if !factor.is_finite() || factor <= 0.0 {
        return Err("scaling factor must be greater than 0".into());
    }
    Ok(factor)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    let options = cli.filter_options();
    if options.is_identity() {
        log::info!("no filters selected, copying {}", cli.input.display());
    }

    process_file(&cli.input, &output, &options, None).with_context(|| {
        format!(
            "failed to process {} into {}",
            cli.input.display(),
            output.display()
        )
    })?;

    println!("Output file name was {}.", output.display());
    Ok(())
}
