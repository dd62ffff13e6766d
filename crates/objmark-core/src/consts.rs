/// Maximum edge distance (exclusive, in display pixels) for a secondary click
/// to select a marker.
pub const HIT_TEST_THRESHOLD: i32 = 3;

/// Default display magnification relative to the source image.
pub const DEFAULT_DISPLAY_SCALE: f64 = 1.0;

/// Default marker aspect ratio (width / height) used by the aspect lock.
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;

/// Small nudge step for marker position and size, in display pixels.
pub const NUDGE_SMALL: i32 = 1;

/// Large nudge step for marker position, in display pixels.
pub const NUDGE_LARGE: i32 = 10;

/// Resize factor applied by the "grow" key (2%).
pub const RESIZE_GROW_FACTOR: f64 = 1.02;

/// Resize factor applied by the "shrink" key (2%).
pub const RESIZE_SHRINK_FACTOR: f64 = 0.98;

/// Image file extensions picked up by the directory scanner (compared
/// case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "bmp", "png"];

/// Default image folder when the configuration names none.
pub const DEFAULT_IMAGE_FOLDER: &str = "rawdata";

/// Default annotation output file when the configuration names none.
pub const DEFAULT_ANNOTATION_FILE: &str = "annotation.txt";

/// Outline color for committed markers and the in-progress drag.
pub const MARKER_COLOR: [u8; 3] = [255, 0, 0];

/// Outline color for the alignment guide.
pub const GUIDE_COLOR: [u8; 3] = [255, 255, 0];

/// Radius of the dot drawn for point-shaped markers.
pub const POINT_MARKER_RADIUS: i32 = 1;
