use thiserror::Error;

/// Errors produced by the export pipeline. The interactive engine itself
/// has no fatal conditions; out-of-order operations are defined no-ops.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to parse intermediate SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("could not allocate a {width}x{height} pixmap")]
    PixmapAllocation { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
