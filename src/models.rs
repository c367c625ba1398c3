use image::Rgba;

/// Side length of the master canvas in pixels.
pub const CANVAS_SIZE: u32 = 256;

/// File the generator writes into the working directory.
pub const OUTPUT_FILE: &str = "icon.ico";

/// Outline of the folder, tab included.
pub const FOLDER_POINTS: [Point; 8] = [
    Point::new(40.0, 80.0),
    Point::new(100.0, 80.0),
    Point::new(110.0, 60.0),
    Point::new(160.0, 60.0),
    Point::new(170.0, 80.0),
    Point::new(216.0, 80.0),
    Point::new(216.0, 200.0),
    Point::new(40.0, 200.0),
];

pub const FOLDER_COLOR: Rgba<u8> = Rgba([52, 152, 219, 255]); // Blue
pub const ACCENT_COLOR: Rgba<u8> = Rgba([41, 128, 185, 255]); // Darker blue
pub const OUTLINE_WIDTH: f32 = 3.0;

pub const SORT_LINE_ROWS: [u32; 4] = [110, 130, 150, 170];
pub const SORT_LINE_START: u32 = 60;
pub const SORT_LINE_WIDTH: u32 = 120;
pub const SORT_LINE_STEP: u32 = 10;
pub const SORT_LINE_THICKNESS: u32 = 4;
pub const ARROW_LENGTH: f32 = 8.0;
pub const ARROW_COLOR: Rgba<u8> = Rgba([255, 255, 255, 200]); // Semi-transparent white

pub const LETTER: char = 'Z';
pub const LETTER_ORIGIN: Point = Point::new(180.0, 30.0);
pub const LETTER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const LETTER_PX: f32 = 48.0;

/// Name of the scalable font tried before the built-in bitmap font.
pub const PREFERRED_FONT: &str = "arial.ttf";

/// Entries written to the icon container, smallest first.
pub const ICON_SIZES: [SizeVariant; 6] = [
    SizeVariant(16),
    SizeVariant(32),
    SizeVariant(48),
    SizeVariant(64),
    SizeVariant(128),
    SizeVariant(256),
];

/// A point in canvas coordinates. Pixel `(x, y)` covers `[x, x + 1) × [y, y + 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with both corners inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }
}

/// One square resolution of the exported icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeVariant(pub u32);

impl SizeVariant {
    pub fn width(self) -> u32 {
        self.0
    }

    pub fn height(self) -> u32 {
        self.0
    }
}

/// One decorative sort line: a bar and the arrowhead at its right end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SortLine {
    pub bar: Rect,
    pub arrow: [Point; 3],
}

/// Geometry of the four sort lines, each one step narrower than the last.
pub fn sort_lines() -> Vec<SortLine> {
    SORT_LINE_ROWS
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let width = SORT_LINE_WIDTH - i as u32 * SORT_LINE_STEP;
            let arrow_x = SORT_LINE_START + width;
            let (ax, ay) = (arrow_x as f32, y as f32);
            let thickness = SORT_LINE_THICKNESS as f32;
            SortLine {
                bar: Rect::new(SORT_LINE_START, y, arrow_x, y + SORT_LINE_THICKNESS),
                arrow: [
                    Point::new(ax, ay),
                    Point::new(ax + ARROW_LENGTH, ay + thickness / 2.0),
                    Point::new(ax, ay + thickness),
                ],
            }
        })
        .collect()
}
