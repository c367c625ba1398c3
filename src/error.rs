use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to write icon file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode {size}x{size} icon entry: {source}")]
    Encode {
        size: u32,
        #[source]
        source: io::Error,
    },
}
