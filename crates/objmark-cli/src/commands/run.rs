use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use objmark_core::host::{RasterSurface, Surface};
use objmark_core::session::ViewerSession;
use objmark_core::workspace::{Response, Workspace};
use tracing::warn;

use super::config;
use crate::script::{parse_line, ScriptLine};
use crate::summary::{print_help, print_markers, print_status};

#[derive(Args)]
pub struct RunArgs {
    /// Configuration file (TOML); written back when the session ends
    #[arg(short, long, default_value = "objmark.toml")]
    pub config: PathBuf,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Image folder (overrides the config)
    #[arg(long)]
    pub images: Option<PathBuf>,

    /// Annotation output file (overrides the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory that `snapshot` lines write into
    #[arg(long, default_value = ".")]
    pub snapshot_dir: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut app_config = config::load(&args.config)?;
    if let Some(ref images) = args.images {
        app_config.image_folder = images.clone();
    }
    if let Some(ref output) = args.output {
        app_config.output_file = output.clone();
    }

    let mut session = ViewerSession::new(RasterSurface::new());
    session.import_config(&app_config.viewer);
    let mut workspace = Workspace::new(session);
    workspace
        .load(&app_config.image_folder, &app_config.output_file)
        .with_context(|| {
            format!(
                "Failed to open image folder {}",
                app_config.image_folder.display()
            )
        })?;

    print_help();
    print_status(&workspace.status());

    let input: Box<dyn BufRead> = match args.script {
        Some(ref path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut running = open_first_image(&mut workspace);
    for line in input.lines() {
        if !running {
            break;
        }
        let line = line?;
        running = handle_line(&mut workspace, &line, args);
    }

    workspace.session_mut().close();
    config::save(&args.config, &workspace.config())?;
    println!("Configuration saved to {}", args.config.display());
    Ok(())
}

/// Show the first image. A decode failure is reported and the session stays
/// open so the operator can move past it.
fn open_first_image<S: Surface>(workspace: &mut Workspace<S>) -> bool {
    match workspace.begin() {
        Ok(shown) => shown,
        Err(e) => {
            warn!(error = %e, "Could not show the first image");
            eprintln!("Error: {e}");
            true
        }
    }
}

/// Apply one input line. Returns `false` once the session should end.
fn handle_line(workspace: &mut Workspace<RasterSurface>, line: &str, args: &RunArgs) -> bool {
    match parse_line(line) {
        ScriptLine::Blank => {}
        ScriptLine::Pointer(event) => {
            workspace.session_mut().handle_pointer(event);
        }
        ScriptLine::Snapshot(name) => {
            let path = args.snapshot_dir.join(name);
            match workspace.session().surface().save_last_frame(&path) {
                Ok(true) => println!("Snapshot saved to {}", path.display()),
                Ok(false) => eprintln!("Nothing has been drawn yet"),
                Err(e) => eprintln!("Failed to save snapshot {}: {e}", path.display()),
            }
        }
        ScriptLine::Command(command) => match workspace.execute(command) {
            Ok(Response::Quit) => return false,
            Ok(response) => report(workspace, response),
            Err(e) => {
                warn!(error = %e, "Command failed");
                eprintln!("Error: {e}");
            }
        },
        ScriptLine::Unknown(text) => eprintln!("Unrecognised command: {text}"),
    }
    true
}

fn report(workspace: &Workspace<RasterSurface>, response: Response) {
    match response {
        Response::Continue | Response::Quit => {}
        Response::Markers(markers) => print_markers(&markers),
        Response::Toggled(on) => println!("{}", if on { "ON" } else { "OFF" }),
        Response::Status(status) => {
            print_help();
            print_status(&status);
        }
        Response::Cropped(count) => println!(
            "Saved {count} region(s) from {} image(s)",
            workspace.images().len()
        ),
        Response::Rejected(reason) => eprintln!("{reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objmark_core::host::NullSurface;
    use objmark_core::workspace::Command;

    #[test]
    fn test_unreadable_first_image_keeps_session_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"not an image").unwrap();
        image::RgbImage::new(8, 8)
            .save(dir.path().join("b.png"))
            .unwrap();

        let mut workspace = Workspace::new(ViewerSession::new(NullSurface));
        workspace
            .load(dir.path(), &dir.path().join("ann.txt"))
            .unwrap();

        assert!(open_first_image(&mut workspace));
        assert_eq!(
            workspace.execute(Command::Next).unwrap(),
            Response::Continue
        );
        assert_eq!(workspace.index(), 1);
    }
}
