use crate::canvas::Canvas;
use crate::error::IconError;
use crate::font::GlyphFont;
use crate::models::{
    sort_lines, SizeVariant, ACCENT_COLOR, ARROW_COLOR, CANVAS_SIZE, FOLDER_COLOR, FOLDER_POINTS,
    ICON_SIZES, LETTER, LETTER_COLOR, LETTER_ORIGIN, OUTLINE_WIDTH,
};
use crate::utils::write_icon_file;
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::{self, FilterType};
use image::{Rgba, Rgba32FImage, RgbaImage};
use std::path::Path;

/// Folder body with its outline drawn along the inside of the edge.
pub fn draw_folder(canvas: &mut Canvas) {
    canvas.fill_polygon(&FOLDER_POINTS, FOLDER_COLOR);
    canvas.stroke_polygon_inside(&FOLDER_POINTS, ACCENT_COLOR, OUTLINE_WIDTH);
}

/// Four bars, each ending in a small right-pointing arrow.
pub fn draw_sort_lines(canvas: &mut Canvas) {
    for line in sort_lines() {
        canvas.fill_rect(line.bar, ARROW_COLOR);
        canvas.fill_polygon(&line.arrow, ARROW_COLOR);
    }
}

pub fn draw_letter(canvas: &mut Canvas, font: &GlyphFont) {
    font.draw_char(canvas, LETTER_ORIGIN, LETTER, LETTER_COLOR);
}

/// Draws the full-size icon.
pub fn render_master(font: &GlyphFont) -> RgbaImage {
    let mut canvas = Canvas::new_transparent(CANVAS_SIZE);
    draw_folder(&mut canvas);
    draw_sort_lines(&mut canvas);
    draw_letter(&mut canvas, font);
    canvas.into_image()
}

/// One Lanczos3-resampled copy of `master` per size. Resampling runs on
/// premultiplied alpha so transparent black does not bleed into edges.
pub fn size_variants(master: &RgbaImage, sizes: &[SizeVariant]) -> Vec<RgbaImage> {
    let premultiplied = premultiply(master);
    sizes
        .iter()
        .map(|size| {
            let resized = imageops::resize(
                &premultiplied,
                size.width(),
                size.height(),
                FilterType::Lanczos3,
            );
            unpremultiply(&resized)
        })
        .collect()
}

fn premultiply(image: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0.map(|c| c as f32 / 255.0);
        Rgba([r * a, g * a, b * a, a])
    })
}

fn unpremultiply(image: &Rgba32FImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let a = a.clamp(0.0, 1.0);
        let alpha = (a * 255.0).round() as u8;
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let channel = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([channel(r), channel(g), channel(b), alpha])
    })
}

/// Packs the variants into an icon container, one entry each, in order.
pub fn encode_icon(variants: &[RgbaImage]) -> Result<IconDir, IconError> {
    let mut icon_dir = IconDir::new(ResourceType::Icon);
    for variant in variants {
        let (width, height) = variant.dimensions();
        let icon_image = IconImage::from_rgba_data(width, height, variant.as_raw().clone());
        let entry = IconDirEntry::encode(&icon_image)
            .map_err(|source| IconError::Encode { size: width, source })?;
        icon_dir.add_entry(entry);
    }
    Ok(icon_dir)
}

/// Renders, resamples, encodes and writes the icon to `path`.
pub fn generate(font: &GlyphFont, path: &Path) -> Result<(), IconError> {
    let master = render_master(font);
    log::info!(
        "rendered {}x{} master with {} font",
        master.width(),
        master.height(),
        if font.is_fallback() { "bitmap" } else { "scalable" }
    );

    let variants = size_variants(&master, &ICON_SIZES);
    let icon_dir = encode_icon(&variants)?;
    write_icon_file(&icon_dir, path)?;
    log::info!("wrote {} entries to {}", variants.len(), path.display());
    Ok(())
}
