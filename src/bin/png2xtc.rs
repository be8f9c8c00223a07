//! png2xtc
//!
//! Converts a directory of PNG pages into an XTC archive, or a single image
//! into a standalone XTG page.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use xtc_rs::pack::{self, PackOptions};
use xtc_rs::ReadDirection;

#[derive(Parser, Debug)]
#[command(name = "png2xtc")]
#[command(about = "Convert images to XTC archives or standalone XTG pages")]
#[command(version)]
struct Args {
    /// Directory of PNG pages (XTC output) or a single image file (XTG output)
    input: PathBuf,

    /// Output path; a name ending in 'g' selects single-page XTG output
    output: PathBuf,

    /// Binarization threshold [default: 200 for archives, 128 for single pages]
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Target page width in pixels
    #[arg(long, default_value_t = pack::DEFAULT_WIDTH)]
    width: u16,

    /// Target page height in pixels
    #[arg(long, default_value_t = pack::DEFAULT_HEIGHT)]
    height: u16,

    /// Reading direction (ltr, rtl) [default: ltr]
    #[arg(long, default_value = "ltr")]
    read_direction: String,

    /// 1-based page to duplicate as the archive thumbnail (0 = none)
    #[arg(long, default_value_t = 0)]
    thumbnail: u16,
}

/// Parse a reading direction from its CLI string
fn parse_read_direction(s: &str) -> Result<ReadDirection, String> {
    match s.to_lowercase().as_str() {
        "ltr" | "left-to-right" => Ok(ReadDirection::LeftToRight),
        "rtl" | "right-to-left" => Ok(ReadDirection::RightToLeft),
        _ => Err(format!(
            "Invalid reading direction '{}'. Valid options: ltr, rtl",
            s
        )),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let read_direction = parse_read_direction(&args.read_direction).map_err(anyhow::Error::msg)?;

    let options = PackOptions {
        width: args.width,
        height: args.height,
        threshold: args.threshold,
        read_direction,
        thumbnail: (args.thumbnail > 0).then_some(args.thumbnail),
    };

    // The output name picks the format: a trailing 'g' means one standalone
    // XTG page, anything else an XTC archive.
    if args.output.to_string_lossy().ends_with('g') {
        info!("Exporting single page from {:?}", args.input);

        let page = pack::page_from_image(&args.input, &options, pack::EXPORT_THRESHOLD)
            .with_context(|| format!("failed to convert {}", args.input.display()))?;
        page.write_to(&args.output)
            .with_context(|| format!("failed to write {}", args.output.display()))?;

        println!("Wrote XTG page to {}", args.output.display());
    } else {
        if !args.input.is_dir() {
            bail!("{} is not a directory of PNG pages", args.input.display());
        }
        info!("Building archive from {:?}", args.input);

        let archive = pack::pack_dir(&args.input, &options)
            .with_context(|| format!("failed to convert {}", args.input.display()))?;
        archive
            .write_to(&args.output)
            .with_context(|| format!("failed to write {}", args.output.display()))?;

        println!(
            "Wrote XTC ({} pages) to {}",
            archive.pages.len(),
            args.output.display()
        );
    }

    Ok(())
}
