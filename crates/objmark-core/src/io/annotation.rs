//! Line-oriented annotation files.
//!
//! Each line names one image and lists its markers in source pixels:
//!
//! ```text
//! rawdata/img001.png 2 10 20 30 40 5 5 12 12
//! ```
//!
//! Lines starting a session header (`#...`) are skipped when reading.
//! Files are appended to as the operator moves between images, so the same
//! image may appear several times; the last line wins.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::geometry::Rect;

const SEPARATOR: &str = " ";
const HEADER_RULE: &str = "########################";

/// Markers recorded for one image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationEntry {
    pub image: String,
    pub rects: Vec<Rect>,
}

impl AnnotationEntry {
    pub fn new(image: impl Into<String>, rects: Vec<Rect>) -> Self {
        Self {
            image: image.into(),
            rects,
        }
    }

    /// Format as one annotation line, without the trailing newline.
    pub fn to_line(&self) -> String {
        let mut line = format!("{}{SEPARATOR}{}", self.image, self.rects.len());
        for r in &self.rects {
            line.push_str(&format!(
                "{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
                r.x, r.y, r.width, r.height
            ));
        }
        line
    }

    /// Parse one annotation line. Returns `None` for blank, short, or
    /// header/comment lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            return None;
        }
        let image = tokens[0];
        if image.contains('#') {
            return None;
        }

        let count = usize::try_from(parse_int_lossy(tokens[1])).unwrap_or(0);
        let rects = tokens[2..]
            .chunks_exact(4)
            .take(count)
            .map(|c| {
                Rect::new(
                    parse_int_lossy(c[0]),
                    parse_int_lossy(c[1]),
                    parse_int_lossy(c[2]),
                    parse_int_lossy(c[3]),
                )
            })
            .collect();

        Some(Self::new(image, rects))
    }
}

/// Read every entry of an annotation file. A missing file reads as empty.
pub fn load_annotation_file(path: &Path) -> Result<Vec<AnnotationEntry>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No annotation file yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        if let Some(entry) = AnnotationEntry::parse_line(&line?) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Overwrite `path` with one line per entry.
pub fn save_annotation_file(path: &Path, entries: &[AnnotationEntry]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for entry in entries {
        writeln!(out, "{}", entry.to_line())?;
    }
    out.flush()?;
    Ok(())
}

/// Append one entry line to `path`, creating the file if needed.
pub fn append_annotation_line(path: &Path, entry: &AnnotationEntry) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", entry.to_line())?;
    Ok(())
}

/// Append a timestamped section header marking the start of a session.
pub fn append_header_line(path: &Path) -> Result<()> {
    let stamp = chrono::Local::now().format("%a %b %e %H:%M:%S %Y");
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file)?;
    writeln!(file, "{HEADER_RULE}")?;
    writeln!(file, "#  {stamp}")?;
    writeln!(file, "{HEADER_RULE}")?;
    Ok(())
}

/// Identifier used for an image in annotation files.
pub fn image_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Markers for each image in `images`, taken from the last loaded entry that
/// names it; images without an entry get an empty list.
pub fn align_to_images(loaded: &[AnnotationEntry], images: &[String]) -> Vec<Vec<Rect>> {
    let mut aligned = vec![Vec::new(); images.len()];
    for entry in loaded {
        if let Some(idx) = images.iter().position(|img| *img == entry.image) {
            aligned[idx] = entry.rects.clone();
        }
    }
    aligned
}

/// Leading integer of `s` (optional sign then digits); anything else reads as 0.
fn parse_int_lossy(s: &str) -> i32 {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    s[..end].parse().unwrap_or(0)
}
