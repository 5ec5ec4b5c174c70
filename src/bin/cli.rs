use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bg_eraser::config::ModelArgs;
use bg_eraser::{codec, BackgroundRemover};

/// Remove the background of one image and write it as a transparent PNG
#[derive(Parser, Debug)]
#[command(name = "bg-eraser-cli", version)]
struct CliArgs {
    /// Image to cut out (png, jpg, jpeg or webp)
    input: PathBuf,

    /// Where to write the PNG; `.png` is appended when there is no extension
    output: PathBuf,

    #[command(flatten)]
    model: ModelArgs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let remover = args.model.remover();
    log::info!(
        "Segmentation model: {} ({}px input)",
        remover.model_path().display(),
        remover.input_size()
    );

    let image = codec::load_image(&args.input)?;
    println!(
        "Removing background from {} ({}x{})...",
        args.input.display(),
        image.width(),
        image.height()
    );

    let cutout = remover
        .remove(&image)
        .with_context(|| format!("could not remove the background of {}", args.input.display()))?;

    let written = codec::save_png(&cutout, &args.output)?;
    println!("Saved {}", written.display());

    Ok(())
}
