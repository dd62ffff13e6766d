use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use objmark_core::io::annotation::{align_to_images, image_key, load_annotation_file};
use objmark_core::io::image_io::image_dimensions;
use objmark_core::io::scan::list_images;

#[derive(Args)]
pub struct InfoArgs {
    /// Image folder
    pub folder: PathBuf,

    /// Annotation file to count markers from
    #[arg(short, long)]
    pub annotations: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let images = list_images(&args.folder)?;
    let keys: Vec<String> = images.iter().map(|p| image_key(p)).collect();

    let counts: Vec<usize> = match args.annotations {
        Some(ref path) => align_to_images(&load_annotation_file(path)?, &keys)
            .iter()
            .map(Vec::len)
            .collect(),
        None => vec![0; images.len()],
    };

    println!("Folder:      {}", args.folder.display());
    println!("Images:      {}", images.len());
    println!();

    for (i, (path, count)) in images.iter().zip(&counts).enumerate() {
        let dims = match image_dimensions(path) {
            Ok((w, h)) => format!("{w}x{h}"),
            Err(_) => "unreadable".to_string(),
        };
        println!("{:>4}  {:<12} {:>3} marker(s)  {}", i + 1, dims, count, path.display());
    }

    let total: usize = counts.iter().sum();
    println!();
    println!("Markers:     {}", total);

    Ok(())
}
