use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use objmark_core::io::annotation::{
    align_to_images, image_key, load_annotation_file, save_annotation_file, AnnotationEntry,
};
use objmark_core::io::scan::list_images;

#[derive(Args)]
pub struct ExportArgs {
    /// Image folder the annotations refer to
    pub folder: PathBuf,

    /// Existing annotation file (may contain several sessions)
    #[arg(short, long)]
    pub annotations: PathBuf,

    /// Output annotation file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Collapse an appended-to annotation file into one line per image.
pub fn run(args: &ExportArgs) -> Result<()> {
    let images = list_images(&args.folder)?;
    let keys: Vec<String> = images.iter().map(|p| image_key(p)).collect();

    let loaded = load_annotation_file(&args.annotations)
        .with_context(|| format!("Failed to read {}", args.annotations.display()))?;
    let aligned = align_to_images(&loaded, &keys);

    let entries: Vec<AnnotationEntry> = keys
        .into_iter()
        .zip(aligned)
        .map(|(image, rects)| AnnotationEntry::new(image, rects))
        .collect();

    save_annotation_file(&args.output, &entries)
        .with_context(|| format!("Fail to export annotation to file {}", args.output.display()))?;

    println!(
        "Exported {} image(s) to {}",
        entries.len(),
        args.output.display()
    );
    Ok(())
}
