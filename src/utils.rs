use crate::error::IconError;
use ico::IconDir;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the icon container to `path`, replacing any existing file.
pub fn write_icon_file(icon_dir: &IconDir, path: &Path) -> Result<(), IconError> {
    let mut file = BufWriter::new(File::create(path)?);
    icon_dir.write(&mut file)?;
    file.flush()?;
    Ok(())
}
