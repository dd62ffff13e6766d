//! Text form of the control loop's input: one pointer event or command per line.

use std::path::PathBuf;

use objmark_core::geometry::Rect;
use objmark_core::interaction::{Buttons, PointerEvent};
use objmark_core::workspace::Command;

#[derive(Debug, PartialEq)]
pub enum ScriptLine {
    Blank,
    Pointer(PointerEvent),
    /// Save the last presented frame under this name.
    Snapshot(PathBuf),
    Command(Command),
    Unknown(String),
}

pub fn parse_line(line: &str) -> ScriptLine {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") {
        return ScriptLine::Blank;
    }

    let mut words = trimmed.split_whitespace();
    let Some(verb) = words.next() else {
        return ScriptLine::Blank;
    };
    let args: Vec<&str> = words.collect();

    parse_words(verb, &args).unwrap_or_else(|| ScriptLine::Unknown(trimmed.to_string()))
}

fn parse_words(verb: &str, args: &[&str]) -> Option<ScriptLine> {
    let pointer = |event| Some(ScriptLine::Pointer(event));
    let command = |cmd| Some(ScriptLine::Command(cmd));

    match (verb, args) {
        ("down", [x, y]) => pointer(PointerEvent::PrimaryDown {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
        }),
        ("move", [x, y]) => pointer(PointerEvent::Move {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
            buttons: Buttons::PRIMARY,
        }),
        ("hover", [x, y]) => pointer(PointerEvent::Move {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
            buttons: Buttons::NONE,
        }),
        ("up", [x, y]) => pointer(PointerEvent::PrimaryUp {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
        }),
        ("rclick", [x, y]) => pointer(PointerEvent::SecondaryUp {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
        }),
        ("snapshot", [name]) => Some(ScriptLine::Snapshot(PathBuf::from(name))),
        ("next", []) => command(Command::Next),
        ("prev", []) => command(Command::Prev),
        ("jump", [n]) => command(Command::Jump(n.parse().ok()?)),
        ("quit", []) => command(Command::Quit),
        ("delete", []) => command(Command::DeleteMarker),
        ("copy", []) => command(Command::CopyFormer),
        ("nudge", [dx, dy, dw, dh]) => command(Command::Nudge(Rect::new(
            dx.parse().ok()?,
            dy.parse().ok()?,
            dw.parse().ok()?,
            dh.parse().ok()?,
        ))),
        ("zoom", [f]) => command(Command::Resize(f.parse().ok()?)),
        ("lock", []) => command(Command::ToggleAspectLock),
        ("ratio", [r]) => command(Command::SetAspectRatio(r.parse().ok()?)),
        ("scale", [s]) => command(Command::SetDisplayScale(s.parse().ok()?)),
        ("point", []) => command(Command::ToggleAcceptPoint),
        ("list", []) => command(Command::ListMarkers),
        ("guide", []) => command(Command::ToggleGuide),
        ("guide-set", [shape]) => command(Command::ConfigureGuide {
            shape: shape.parse().ok()?,
            rect: None,
        }),
        ("guide-set", [shape, x, y, w, h]) => command(Command::ConfigureGuide {
            shape: shape.parse().ok()?,
            rect: Some(Rect::new(
                x.parse().ok()?,
                y.parse().ok()?,
                w.parse().ok()?,
                h.parse().ok()?,
            )),
        }),
        ("crop", [dir]) => command(Command::CropImages(PathBuf::from(dir))),
        ("folder", [dir]) => command(Command::ChangeImageFolder(PathBuf::from(dir))),
        ("output", [file]) => command(Command::ChangeAnnotationFile(PathBuf::from(file))),
        ("export", [file]) => command(Command::ExportAnnotations(PathBuf::from(file))),
        ("status", []) => command(Command::Status),
        ("enter", []) => command(Command::Next),
        ("backspace", []) => command(Command::Prev),
        ("esc", []) => command(Command::Quit),
        (key, []) => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Command::from_key(c).map(ScriptLine::Command),
                _ => None,
            }
        }
        _ => None,
    }
}
