use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use objmark_core::io::annotation::{align_to_images, image_key, load_annotation_file};
use objmark_core::io::crop::crop_annotated_regions;
use objmark_core::io::scan::list_images;

#[derive(Args)]
pub struct CropArgs {
    /// Image folder the annotations refer to
    pub folder: PathBuf,

    /// Annotation file
    #[arg(short, long)]
    pub annotations: PathBuf,

    /// Directory for the cropped regions (numbered 1.png, 2.png, ...)
    #[arg(short, long, default_value = "crops")]
    pub output: PathBuf,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let images = list_images(&args.folder)?;
    let keys: Vec<String> = images.iter().map(|p| image_key(p)).collect();
    let loaded = load_annotation_file(&args.annotations)
        .with_context(|| format!("Failed to read {}", args.annotations.display()))?;
    let rects = align_to_images(&loaded, &keys);

    println!("Cropping images with annotated rectangles.");

    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Cropping [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let written = crop_annotated_regions(&args.output, &images, &rects, |done| {
        pb.set_position(done as u64);
    })?;
    pb.finish();

    println!("Saved {} region(s) to {}", written, args.output.display());
    Ok(())
}
