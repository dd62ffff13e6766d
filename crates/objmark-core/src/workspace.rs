//! Annotation of a directory of images, one image at a time.
//!
//! A [`Workspace`] pairs the viewer session with the image list and the
//! annotation file. Edits made in the session are appended to the file
//! whenever the operator leaves an image with unsaved changes.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::consts::{
    NUDGE_LARGE, NUDGE_SMALL, RESIZE_GROW_FACTOR, RESIZE_SHRINK_FACTOR,
};
use crate::error::Result;
use crate::geometry::Rect;
use crate::host::Surface;
use crate::io::annotation::{
    align_to_images, append_annotation_line, append_header_line, image_key,
    load_annotation_file, save_annotation_file, AnnotationEntry,
};
use crate::io::crop::crop_annotated_regions;
use crate::io::image_io::load_image;
use crate::io::scan::list_images;
use crate::session::{ViewerSession, ViewerStatus};

/// A request from the control loop. Values that used to be asked for
/// interactively travel as payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Save the current image's markers and move on; past the last image this
    /// ends the session.
    Next,
    Prev,
    /// 1-based image number.
    Jump(usize),
    /// Leave without saving the current image.
    Quit,
    DeleteMarker,
    /// Replace the current markers with the previous image's.
    CopyFormer,
    /// Shift/grow the active marker by a display-space delta.
    Nudge(Rect),
    Resize(f64),
    ToggleAspectLock,
    SetAspectRatio(f64),
    SetDisplayScale(f64),
    ToggleAcceptPoint,
    ListMarkers,
    ToggleGuide,
    /// Guide shape code plus, for shapes other than none, its source-space
    /// rectangle.
    ConfigureGuide { shape: i32, rect: Option<Rect> },
    CropImages(PathBuf),
    ChangeImageFolder(PathBuf),
    ChangeAnnotationFile(PathBuf),
    ExportAnnotations(PathBuf),
    Status,
}

impl Command {
    /// Command bound to a single key, for keys that need no further input.
    pub fn from_key(key: char) -> Option<Self> {
        let nudge = |x, y, width, height| Some(Self::Nudge(Rect::new(x, y, width, height)));
        match key {
            '\r' | '\n' | ' ' => Some(Self::Next),
            '\u{8}' => Some(Self::Prev),
            '\u{1b}' => Some(Self::Quit),
            'd' => Some(Self::DeleteMarker),
            'r' => Some(Self::CopyFormer),
            '8' => nudge(0, -NUDGE_SMALL, 0, 0),
            '9' => nudge(0, -NUDGE_LARGE, 0, 0),
            '2' => nudge(0, NUDGE_SMALL, 0, 0),
            '3' => nudge(0, NUDGE_LARGE, 0, 0),
            '4' => nudge(-NUDGE_SMALL, 0, 0, 0),
            '5' => nudge(-NUDGE_LARGE, 0, 0, 0),
            '6' => nudge(NUDGE_SMALL, 0, 0, 0),
            '7' => nudge(NUDGE_LARGE, 0, 0, 0),
            'w' => nudge(0, 0, NUDGE_SMALL, 0),
            'W' => nudge(0, 0, -NUDGE_SMALL, 0),
            'h' => nudge(0, 0, 0, NUDGE_SMALL),
            'H' => nudge(0, 0, 0, -NUDGE_SMALL),
            'z' => Some(Self::Resize(RESIZE_GROW_FACTOR)),
            'Z' => Some(Self::Resize(RESIZE_SHRINK_FACTOR)),
            'm' => Some(Self::ToggleAspectLock),
            'p' => Some(Self::ToggleAcceptPoint),
            'e' => Some(Self::ListMarkers),
            'g' => Some(Self::ToggleGuide),
            't' => Some(Self::Status),
            _ => None,
        }
    }
}

/// Result of [`Workspace::execute`].
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Continue,
    Quit,
    /// Current markers in source space.
    Markers(Vec<Rect>),
    /// New state of a toggled setting.
    Toggled(bool),
    Status(WorkspaceStatus),
    /// Number of region files written.
    Cropped(usize),
    /// The command was not applied; the message says why.
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkspaceStatus {
    pub image_folder: PathBuf,
    pub annotation_file: PathBuf,
    /// 0-based index of the image on screen.
    pub image_index: usize,
    pub image_count: usize,
    pub viewer: ViewerStatus,
}

pub struct Workspace<S: Surface> {
    session: ViewerSession<S>,
    image_folder: PathBuf,
    annotation_file: PathBuf,
    images: Vec<PathBuf>,
    /// Source-space markers per image, as last saved.
    rects: Vec<Vec<Rect>>,
    index: usize,
}

impl<S: Surface> Workspace<S> {
    pub fn new(session: ViewerSession<S>) -> Self {
        Self {
            session,
            image_folder: PathBuf::new(),
            annotation_file: PathBuf::new(),
            images: Vec::new(),
            rects: Vec::new(),
            index: 0,
        }
    }

    pub fn session(&self) -> &ViewerSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ViewerSession<S> {
        &mut self.session
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    /// Saved source-space markers for every image, in image order.
    pub fn saved_markers(&self) -> &[Vec<Rect>] {
        &self.rects
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Scan `image_folder` and attach `annotation_file` to it.
    pub fn load(&mut self, image_folder: &Path, annotation_file: &Path) -> Result<()> {
        let images = list_images(image_folder)?;
        let rects = read_annotations(annotation_file, &images)?;
        info!(
            folder = %image_folder.display(),
            images = images.len(),
            "Image folder loaded"
        );
        self.images = images;
        self.image_folder = image_folder.to_path_buf();
        self.index = 0;
        self.rects = rects;
        self.annotation_file = annotation_file.to_path_buf();
        Ok(())
    }

    /// Read existing markers from `path`, line them up with the image list,
    /// and start a new timestamped section in it. On error the previous file
    /// stays attached.
    pub fn set_annotation_file(&mut self, path: &Path) -> Result<()> {
        self.rects = read_annotations(path, &self.images)?;
        self.annotation_file = path.to_path_buf();
        Ok(())
    }

    /// Save the current image's markers if they changed, then show image
    /// `idx`. Returns `false` if `idx` is out of range.
    pub fn jump(&mut self, idx: usize) -> Result<bool> {
        self.persist_if_dirty()?;

        let Some(path) = self.images.get(idx) else {
            return Ok(false);
        };
        let image = load_image(path)?;
        let title = format!("{} - {}", idx + 1, path.display());

        self.session.open(&image, &title);
        self.session.set_markers(&self.rects[idx]);
        self.session.clear_dirty();
        self.index = idx;
        info!(index = idx, path = %path.display(), "Showing image");
        Ok(true)
    }

    pub fn begin(&mut self) -> Result<bool> {
        self.jump(0)
    }

    pub fn next(&mut self) -> Result<bool> {
        self.jump(self.index + 1)
    }

    pub fn prev(&mut self) -> Result<bool> {
        match self.index.checked_sub(1) {
            Some(idx) => self.jump(idx),
            None => {
                self.persist_if_dirty()?;
                Ok(false)
            }
        }
    }

    pub fn reload(&mut self) -> Result<bool> {
        self.jump(self.index)
    }

    /// Bring the previous image's markers onto the current one.
    pub fn copy_former_markers(&mut self) -> bool {
        let Some(prev) = self.index.checked_sub(1) else {
            return false;
        };
        if self.rects[prev].is_empty() && self.rects[self.index].is_empty() {
            return false;
        }
        let former = self.rects[prev].clone();
        self.session.set_markers(&former);
        true
    }

    /// Change the display scale and redisplay the current image at it.
    pub fn set_display_scale(&mut self, scale: f64) -> Result<bool> {
        self.persist_if_dirty()?;
        if !self.session.set_display_scale(scale) {
            return Ok(false);
        }
        if !self.images.is_empty() {
            self.reload()?;
        }
        Ok(true)
    }

    pub fn change_image_folder(&mut self, folder: &Path) -> Result<()> {
        self.persist_if_dirty()?;
        let annotation_file = self.annotation_file.clone();
        self.load(folder, &annotation_file)?;
        self.begin()?;
        Ok(())
    }

    pub fn change_annotation_file(&mut self, path: &Path) -> Result<()> {
        self.persist_if_dirty()?;
        self.set_annotation_file(path)?;
        self.reload()?;
        Ok(())
    }

    /// Write a clean annotation file with one line per image.
    pub fn export(&self, path: &Path) -> Result<()> {
        let entries: Vec<AnnotationEntry> = self
            .images
            .iter()
            .zip(self.current_markers())
            .map(|(img, rects)| AnnotationEntry::new(image_key(img), rects))
            .collect();
        save_annotation_file(path, &entries)?;
        info!(path = %path.display(), images = entries.len(), "Annotations exported");
        Ok(())
    }

    pub fn crop_and_save(
        &self,
        out_dir: &Path,
        on_progress: impl Fn(usize) + Send + Sync,
    ) -> Result<usize> {
        crop_annotated_regions(out_dir, &self.images, &self.current_markers(), on_progress)
    }

    pub fn status(&self) -> WorkspaceStatus {
        WorkspaceStatus {
            image_folder: self.image_folder.clone(),
            annotation_file: self.annotation_file.clone(),
            image_index: self.index,
            image_count: self.images.len(),
            viewer: self.session.status(),
        }
    }

    /// Settings to persist when the session ends.
    pub fn config(&self) -> AppConfig {
        AppConfig {
            image_folder: self.image_folder.clone(),
            output_file: self.annotation_file.clone(),
            viewer: self.session.export_config(),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Response> {
        debug!(?command, "Executing command");
        let response = match command {
            Command::Next => {
                if self.next()? {
                    Response::Continue
                } else {
                    Response::Quit
                }
            }
            Command::Prev => {
                if self.prev()? {
                    Response::Continue
                } else {
                    Response::Rejected("Can't go back to the previous image".into())
                }
            }
            Command::Jump(number) => {
                let jumped = match number.checked_sub(1) {
                    Some(idx) => self.jump(idx)?,
                    None => false,
                };
                if jumped {
                    Response::Continue
                } else {
                    Response::Rejected(format!("Fail to jump #{number}"))
                }
            }
            Command::Quit => Response::Quit,
            Command::DeleteMarker => {
                self.session.delete_marker();
                Response::Continue
            }
            Command::CopyFormer => {
                self.copy_former_markers();
                Response::Continue
            }
            Command::Nudge(delta) => {
                self.session.reshape_marker(&delta);
                Response::Continue
            }
            Command::Resize(factor) => {
                self.session.resize_marker(factor);
                Response::Continue
            }
            Command::ToggleAspectLock => Response::Toggled(self.session.toggle_aspect_lock()),
            Command::SetAspectRatio(ratio) => {
                if self.session.set_aspect_ratio(ratio) {
                    Response::Continue
                } else {
                    Response::Rejected(format!("Illegal aspect ratio: {ratio}"))
                }
            }
            Command::SetDisplayScale(scale) => {
                if self.set_display_scale(scale)? {
                    Response::Continue
                } else {
                    Response::Rejected(format!("Illegal display scale: {scale}"))
                }
            }
            Command::ToggleAcceptPoint => Response::Toggled(self.session.toggle_accept_point()),
            Command::ListMarkers => Response::Markers(self.session.markers()),
            Command::ToggleGuide => Response::Toggled(self.session.toggle_guide()),
            Command::ConfigureGuide { shape, rect } => {
                if !self.session.set_guide_shape(shape) {
                    return Ok(Response::Rejected(format!("Wrong guide shape: {shape}")));
                }
                if let Some(rect) = rect.filter(|_| shape > 0) {
                    self.session.set_guide_rectangle(rect);
                }
                self.session.show_guide();
                Response::Continue
            }
            Command::CropImages(dir) => Response::Cropped(self.crop_and_save(&dir, |_| {})?),
            Command::ChangeImageFolder(dir) => {
                self.change_image_folder(&dir)?;
                Response::Continue
            }
            Command::ChangeAnnotationFile(path) => {
                self.change_annotation_file(&path)?;
                Response::Continue
            }
            Command::ExportAnnotations(path) => {
                self.export(&path)?;
                Response::Continue
            }
            Command::Status => Response::Status(self.status()),
        };
        Ok(response)
    }

    /// Saved markers, with the on-screen image's unsaved edits folded in.
    fn current_markers(&self) -> Vec<Vec<Rect>> {
        let mut rects = self.rects.clone();
        if self.session.is_dirty() {
            if let Some(slot) = rects.get_mut(self.index) {
                *slot = self.session.markers();
            }
        }
        rects
    }

    fn persist_if_dirty(&mut self) -> Result<()> {
        if !self.session.is_dirty() || self.index >= self.images.len() {
            return Ok(());
        }

        let markers = self.session.markers();
        let entry = AnnotationEntry::new(image_key(&self.images[self.index]), markers.clone());
        append_annotation_line(&self.annotation_file, &entry)?;
        self.rects[self.index] = markers;
        self.session.clear_dirty();
        debug!(index = self.index, count = entry.rects.len(), "Markers saved");
        Ok(())
    }
}

/// Markers from `path` aligned with `images`, after opening a new section in
/// the file.
fn read_annotations(path: &Path, images: &[PathBuf]) -> Result<Vec<Vec<Rect>>> {
    let entries = load_annotation_file(path)?;
    append_header_line(path)?;
    let keys: Vec<String> = images.iter().map(|p| image_key(p)).collect();
    info!(
        file = %path.display(),
        entries = entries.len(),
        "Annotation file attached"
    );
    Ok(align_to_images(&entries, &keys))
}
