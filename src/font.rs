use crate::canvas::Canvas;
use crate::models::Point;
use image::Rgba;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Cell size of the built-in bitmap font.
const BITMAP_WIDTH: usize = 5;
const BITMAP_HEIGHT: usize = 7;
/// Rows between the text origin and the top of a bitmap cell.
const BITMAP_TOP_OFFSET: i32 = 2;

/// Uppercase A-Z, one byte per row, bit 4 is the leftmost column.
const BITMAP_GLYPHS: [[u8; BITMAP_HEIGHT]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

/// The font used for the letter glyph.
pub enum GlyphFont {
    /// A TrueType/OpenType font rendered at `px` pixels.
    Scalable { font: fontdue::Font, px: f32 },
    /// The built-in 5x7 bitmap font.
    Bitmap,
}

impl GlyphFont {
    /// Loads `name` from the working directory or the system font directories,
    /// substituting the bitmap font when it cannot be found or parsed.
    pub fn preferred_or_fallback(name: &str, px: f32) -> Self {
        Self::from_dirs(name, px, &system_font_dirs())
    }

    /// Same as [`GlyphFont::preferred_or_fallback`] with an explicit search path.
    pub fn from_dirs(name: &str, px: f32, dirs: &[PathBuf]) -> Self {
        match load_preferred(name, dirs) {
            Some(font) => GlyphFont::Scalable { font, px },
            None => {
                log::debug!("font {} unavailable, using built-in bitmap font", name);
                GlyphFont::Bitmap
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GlyphFont::Bitmap)
    }

    /// Draws `ch` with the top-left of its text line at `origin`.
    pub fn draw_char(&self, canvas: &mut Canvas, origin: Point, ch: char, color: Rgba<u8>) {
        match self {
            GlyphFont::Scalable { font, px } => draw_scalable(canvas, font, *px, origin, ch, color),
            GlyphFont::Bitmap => draw_bitmap(canvas, origin, ch, color),
        }
    }
}

/// Directories searched for fonts, in order.
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut search: Vec<PathBuf> = [
        r"C:\Windows\Fonts",
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/Library/Fonts",
        "/System/Library/Fonts",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    if let Some(user_fonts) = dirs::font_dir() {
        search.push(user_fonts);
    }
    search
}

/// Every file named exactly `name`: first `name` itself relative to the
/// working directory, then matches under each of `dirs`. Symlinks are followed.
pub fn find_font_files(name: &str, dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let direct = Path::new(name);
    if direct.is_file() {
        found.push(direct.to_path_buf());
    }
    for dir in dirs.iter().filter(|d| d.is_dir()) {
        let matches = WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.file_name() == name)
            .map(|e| e.into_path());
        found.extend(matches);
    }
    found
}

/// Returns the first candidate that reads and parses as a font.
pub fn load_preferred(name: &str, dirs: &[PathBuf]) -> Option<fontdue::Font> {
    find_font_files(name, dirs).into_iter().find_map(|path| {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("cannot read {}: {}", path.display(), e);
                return None;
            }
        };
        match fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
            Ok(font) => {
                log::debug!("loaded font {}", path.display());
                Some(font)
            }
            Err(e) => {
                log::debug!("cannot parse {}: {}", path.display(), e);
                None
            }
        }
    })
}

fn draw_scalable(
    canvas: &mut Canvas,
    font: &fontdue::Font,
    px: f32,
    origin: Point,
    ch: char,
    color: Rgba<u8>,
) {
    let ascent = font
        .horizontal_line_metrics(px)
        .map(|m| m.ascent)
        .unwrap_or(px);
    let baseline = (origin.y + ascent).round() as i32;
    let (metrics, coverage) = font.rasterize(ch, px);
    let left = origin.x.round() as i32 + metrics.xmin;
    let top = baseline - metrics.ymin - metrics.height as i32;

    for (row, line) in coverage.chunks(metrics.width.max(1)).enumerate() {
        for (col, &alpha) in line.iter().enumerate() {
            canvas.blend_coverage(left + col as i32, top + row as i32, color, alpha);
        }
    }
}

fn draw_bitmap(canvas: &mut Canvas, origin: Point, ch: char, color: Rgba<u8>) {
    let Some(rows) = bitmap_glyph(ch) else {
        return;
    };
    let left = origin.x.round() as i32;
    let top = origin.y.round() as i32 + BITMAP_TOP_OFFSET;
    for (row, &bits) in rows.iter().enumerate() {
        for col in 0..BITMAP_WIDTH {
            if (bits >> (BITMAP_WIDTH - 1 - col)) & 1 != 0 {
                canvas.blend_coverage(left + col as i32, top + row as i32, color, u8::MAX);
            }
        }
    }
}

fn bitmap_glyph(ch: char) -> Option<&'static [u8; BITMAP_HEIGHT]> {
    if ch.is_ascii_uppercase() {
        BITMAP_GLYPHS.get((ch as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Path of the font checked in for tests.
#[cfg(test)]
pub(crate) fn fixture_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf")
}

#[cfg(test)]
pub(crate) fn fixture_font() -> fontdue::Font {
    let bytes = fs::read(fixture_font_path()).unwrap();
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn missing_font_falls_back_to_bitmap() {
        let empty = tempfile::tempdir().unwrap();
        let font = GlyphFont::from_dirs("no-such-font.ttf", 48.0, &[empty.path().to_path_buf()]);
        assert!(font.is_fallback());
    }

    #[test]
    fn unparsable_font_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();
        let font = GlyphFont::from_dirs("broken.ttf", 48.0, &[dir.path().to_path_buf()]);
        assert!(font.is_fallback());
    }

    #[test]
    fn lookup_is_recursive_and_exact() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("truetype").join("msttcorefonts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("arial.ttf"), b"").unwrap();
        fs::write(nested.join("arial-bold.ttf"), b"").unwrap();
        let other = dir.path().join("macos");
        fs::create_dir_all(&other).unwrap();
        fs::write(other.join("Arial.ttf"), b"").unwrap();

        let found = find_font_files("arial.ttf", &[dir.path().to_path_buf()]);
        assert_eq!(found, vec![nested.join("arial.ttf")]);
    }

    #[test]
    fn named_font_in_search_dir_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        fs::copy(fixture_font_path(), dir.path().join("arial.ttf")).unwrap();

        let font = GlyphFont::from_dirs("arial.ttf", 48.0, &[dir.path().to_path_buf()]);
        assert!(!font.is_fallback());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_font_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("fonts").join("arial.ttf");
        fs::create_dir_all(link.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(fixture_font_path(), &link).unwrap();

        let found = find_font_files("arial.ttf", &[dir.path().to_path_buf()]);
        assert_eq!(found, vec![link]);
        let font = GlyphFont::from_dirs("arial.ttf", 48.0, &[dir.path().to_path_buf()]);
        assert!(!font.is_fallback());
    }

    #[test]
    fn bitmap_z_is_drawn_below_origin() {
        let mut canvas = Canvas::new_transparent(32);
        GlyphFont::Bitmap.draw_char(&mut canvas, Point::new(10.0, 4.0), 'Z', WHITE);

        // top bar of the Z spans the full cell width
        for x in 10..15 {
            assert_eq!(canvas.pixel(x, 6), WHITE);
        }
        assert_eq!(canvas.pixel(14, 7), WHITE);
        assert_eq!(canvas.pixel(10, 7), Rgba([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(10, 5), Rgba([0, 0, 0, 0]));
        let lit = canvas.image().pixels().filter(|p| **p == WHITE).count();
        assert_eq!(lit, 15);
    }

    #[test]
    fn bitmap_ignores_unknown_characters() {
        let mut canvas = Canvas::new_transparent(16);
        GlyphFont::Bitmap.draw_char(&mut canvas, Point::new(2.0, 2.0), 'z', WHITE);
        assert!(canvas.image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn scalable_glyph_lands_near_origin() {
        let glyph = GlyphFont::Scalable { font: fixture_font(), px: 48.0 };

        let mut canvas = Canvas::new_transparent(256);
        glyph.draw_char(&mut canvas, Point::new(180.0, 30.0), 'Z', WHITE);

        let inked: Vec<(u32, u32)> = canvas
            .image()
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] > 0)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|&(x, y)| x >= 170 && y >= 30 && y < 30 + 48 + 16));
    }
}
