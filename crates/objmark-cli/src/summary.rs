use console::Style;
use objmark_core::geometry::Rect;
use objmark_core::workspace::WorkspaceStatus;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    enabled: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            enabled: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }

    fn flag(&self, on: bool) -> console::StyledObject<&'static str> {
        if on {
            self.enabled.apply_to("on")
        } else {
            self.disabled.apply_to("off")
        }
    }
}

pub fn print_help() {
    let s = Styles::new();
    println!();
    println!("  {}", s.title.apply_to("objmark commands"));
    println!();
    let rows = [
        ("enter / next", "save markers and show the next image"),
        ("backspace / prev", "show the previous image"),
        ("esc / quit", "end the session, discarding unsaved markers"),
        ("jump N", "show image number N"),
        ("down/move/up X Y", "drag a new marker"),
        ("rclick X Y", "select the marker with an edge near X Y"),
        ("d", "delete the active marker"),
        ("r", "copy markers from the previous image"),
        ("8 9 / 2 3", "move the active marker up / down by 1 / 10 px"),
        ("4 5 / 6 7", "move the active marker left / right by 1 / 10 px"),
        ("w W / h H", "grow / shrink width / height by 1 px"),
        ("z Z", "grow / shrink the active marker by 2%"),
        ("m", "toggle the fixed aspect ratio"),
        ("ratio R", "set the aspect ratio (width / height)"),
        ("scale S", "set the display scale"),
        ("p", "toggle point markers"),
        ("e", "print the current markers"),
        ("g", "toggle the guide"),
        ("guide-set S [X Y W H]", "set guide shape (0-4) and rectangle"),
        ("crop DIR", "save annotated regions into DIR"),
        ("folder DIR", "switch image folder"),
        ("output FILE", "switch annotation file"),
        ("export FILE", "write a clean annotation file"),
        ("snapshot FILE", "save the current view as PNG"),
        ("t / status", "show this help and the status"),
    ];
    for (keys, what) in rows {
        println!("  {:<24}{}", s.value.apply_to(keys), s.label.apply_to(what));
    }
    println!();
}

pub fn print_status(status: &WorkspaceStatus) {
    let s = Styles::new();
    let v = &status.viewer;

    println!(
        "  {:<14}{}",
        s.label.apply_to("Images"),
        s.path.apply_to(status.image_folder.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Annotations"),
        s.path.apply_to(status.annotation_file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Position"),
        s.value
            .apply_to(format!("{} / {}", status.image_index + 1, status.image_count))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Fixed ratio"),
        s.flag(v.fix_marker_ratio)
    );
    if v.fix_marker_ratio {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Aspect ratio"),
            s.value.apply_to(v.aspect_ratio)
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Point marks"),
        s.flag(v.accept_point_shape)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(v.display_scale)
    );
    println!(
        "  {:<14}{} ({})",
        s.label.apply_to("Guide"),
        s.value.apply_to(v.guide_shape),
        s.flag(v.guide_visible)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Markers"),
        s.value.apply_to(v.marker_count)
    );
}

pub fn print_markers(markers: &[Rect]) {
    for r in markers {
        println!("{} {} {} {}", r.x, r.y, r.width, r.height);
    }
}
