//! The seam between the renderer and whatever turns SVG bytes into PNG bytes.

use crate::Result;

/// Converts a vector document into an encoded PNG of the requested dimensions.
pub trait Rasterizer {
    fn rasterize(&self, svg: &[u8], width: u32, height: u32) -> Result<Vec<u8>>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn rasterize(&self, svg: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        (**self).rasterize(svg, width, height)
    }
}

/// Whether this build can rasterize SVG at all.
pub enum Capability {
    Available(Box<dyn Rasterizer>),
    Unavailable { guidance: &'static str },
}

impl Capability {
    /// Checks for the built-in rasterizer, enabled by the `rasterize` feature.
    #[cfg(feature = "rasterize")]
    pub fn detect() -> Capability {
        Capability::Available(Box::new(SvgRasterizer::new()))
    }

    #[cfg(not(feature = "rasterize"))]
    pub fn detect() -> Capability {
        Capability::Unavailable {
            guidance: "Rebuild with the rasterizer enabled:\n  cargo build --features rasterize",
        }
    }
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Capability::Available(_) => f.write_str("Available"),
            Capability::Unavailable { guidance } => f
                .debug_struct("Unavailable")
                .field("guidance", guidance)
                .finish(),
        }
    }
}

#[cfg(feature = "rasterize")]
pub use self::svg::SvgRasterizer;

#[cfg(feature = "rasterize")]
mod svg {
    use super::Rasterizer;
    use crate::{Error, Result};
    use resvg::{tiny_skia, usvg};
    use std::sync::Arc;

    /// Renders SVG with `resvg`, stretching the document to fill the target exactly.
    pub struct SvgRasterizer {
        options: usvg::Options<'static>,
    }

    impl SvgRasterizer {
        pub fn new() -> SvgRasterizer {
            let mut options = usvg::Options::default();
            Arc::make_mut(&mut options.fontdb).load_system_fonts();
            SvgRasterizer { options }
        }
    }

    impl Default for SvgRasterizer {
        fn default() -> Self {
            SvgRasterizer::new()
        }
    }

    impl Rasterizer for SvgRasterizer {
        fn rasterize(&self, svg: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
            let tree = usvg::Tree::from_data(svg, &self.options)
                .map_err(|e| Error::Svg(Box::new(e)))?;
            let size = tree.size();
            log::debug!(
                "SVG is {}x{}, rendering at {width}x{height}",
                size.width(),
                size.height()
            );

            let mut pixmap =
                tiny_skia::Pixmap::new(width, height).ok_or(Error::Pixmap { width, height })?;
            let transform = tiny_skia::Transform::from_scale(
                width as f32 / size.width(),
                height as f32 / size.height(),
            );
            resvg::render(&tree, transform, &mut pixmap.as_mut());

            pixmap.encode_png().map_err(|e| Error::Encode(Box::new(e)))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64">
            <rect width="64" height="64" fill="#ff0000"/>
        </svg>"##;

        #[test]
        fn renders_requested_dimensions() {
            let png = SvgRasterizer::new()
                .rasterize(SQUARE.as_bytes(), 48, 48)
                .unwrap();
            let img = image::load_from_memory(&png).unwrap().to_rgba8();
            assert_eq!(img.dimensions(), (48, 48));
            assert_eq!(img.get_pixel(24, 24).0, [255, 0, 0, 255]);
        }

        #[test]
        fn stretches_non_square_documents() {
            let wide = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
                <rect width="100" height="50" fill="blue"/>
            </svg>"#;
            let png = SvgRasterizer::new().rasterize(wide.as_bytes(), 32, 32).unwrap();
            let img = image::load_from_memory(&png).unwrap().to_rgba8();
            assert_eq!(img.get_pixel(16, 30).0, [0, 0, 255, 255]);
        }

        #[test]
        fn rejects_malformed_svg() {
            let err = SvgRasterizer::new()
                .rasterize(b"<svg", 16, 16)
                .unwrap_err();
            assert!(matches!(err, Error::Svg(_)));
        }

        #[test]
        fn rejects_zero_size() {
            let err = SvgRasterizer::new()
                .rasterize(SQUARE.as_bytes(), 0, 0)
                .unwrap_err();
            assert!(matches!(err, Error::Pixmap { width: 0, height: 0 }));
        }
    }
}
