mod canvas;
mod error;
mod font;
mod icon;
mod logging;
mod models;
mod utils;

use crate::font::GlyphFont;
use crate::models::{LETTER_PX, OUTPUT_FILE, PREFERRED_FONT};
use std::path::Path;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();
    log::info!("zensort-icon {}", APP_VERSION);

    let font = GlyphFont::preferred_or_fallback(PREFERRED_FONT, LETTER_PX);
    icon::generate(&font, Path::new(OUTPUT_FILE))?;

    println!("Icon created successfully: {}", OUTPUT_FILE);
    Ok(())
}
