use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("SVG rasterization is not available. {guidance}")]
    MissingCapability { guidance: &'static str },
    #[error("SVG source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Invalid SVG: {0}")]
    Svg(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Cannot encode PNG: {0}")]
    Encode(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Cannot allocate a {width} × {height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("Failed to render {size}x{size} icon {p}: {source}", p = .path.display())]
    Render {
        size: u32,
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
