//! A crate for rendering an SVG app icon into PNG files at fixed sizes.
//! Each size is rendered straight from the vector source, so every output
//! is sharp at its own resolution.
//!
//! ## Examples
//! ### Basic
//! Renders `assets/icons/cerebro-icon-512.svg` (relative to this crate) into
//! `cerebro-icon-192.png` and `cerebro-icon-512.png` next to it, printing one
//! line per size.
//!
//! ```no_run
//! icon_renderer::generate_icons();
//! ```
//!
//! ### Custom Configuration
//! Paths and sizes are plain data, and the per-size outcomes come back as a
//! [`Report`].
//!
//! ```no_run
//! # use icon_renderer::IconRenderer;
//! let report = IconRenderer::default()
//!     .icons_dir("public/icons")
//!     .base_name("app-icon")
//!     .sizes(&[48, 96, 144])
//!     .render()?;
//! assert!(report.is_complete_success());
//! # Ok::<(), icon_renderer::Error>(())
//! ```

use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod error;
pub mod rasterize;

pub use crate::error::{Error, Result};
pub use crate::rasterize::{Capability, Rasterizer};
#[cfg(feature = "rasterize")]
pub use crate::rasterize::SvgRasterizer;

/// Renders the default icon set and prints the outcome to stdout.
/// Never fails: every problem is reported as a console line instead.
pub fn generate_icons() {
    let result = IconRenderer::default().render();
    let stdout = io::stdout();
    if let Err(e) = print_result(&result, &mut stdout.lock()) {
        log::error!("Cannot write to stdout: {e}");
    }
}

/// Writes the human readable summary of a run.
pub fn print_result(result: &Result<Report>, out: &mut impl Write) -> io::Result<()> {
    match result {
        Ok(report) => report.print(out),
        Err(Error::MissingCapability { guidance }) => {
            writeln!(out, "❌ SVG rasterization is not available.")?;
            writeln!(out)?;
            writeln!(out, "{guidance}")
        }
        Err(Error::SourceNotFound(path)) => {
            writeln!(out, "❌ SVG file not found: {}", path.display())
        }
        Err(e) => writeln!(out, "❌ Icon generation aborted: {e}"),
    }
}

/// Renders one SVG source into a PNG per configured size.
#[derive(Debug)]
pub struct IconRenderer {
    sizes: IconSizes,
    icons_dir: PathBuf,
    base_name: String,
    source_file: Option<PathBuf>,
}

impl Default for IconRenderer {
    fn default() -> Self {
        IconRenderer {
            sizes: IconSizes::default(),
            icons_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("icons"),
            base_name: "cerebro-icon".to_owned(),
            source_file: None,
        }
    }
}

impl IconRenderer {
    /// Customizes the rendered sizes. Defaults to [`IconSizes::PWA`].
    pub fn sizes(&mut self, sizes: impl Into<IconSizes>) -> &mut IconRenderer {
        self.sizes = sizes.into();
        self
    }

    /// The directory holding the source and receiving the PNG files.
    /// Created on demand when rendering.
    pub fn icons_dir(&mut self, icons_dir: impl AsRef<Path>) -> &mut IconRenderer {
        self.icons_dir = icons_dir.as_ref().to_owned();
        self
    }

    /// The file name prefix shared by the source and all outputs.
    pub fn base_name(&mut self, base_name: impl Into<String>) -> &mut IconRenderer {
        self.base_name = base_name.into();
        self
    }

    /// Overrides the source path, which otherwise is `<icons_dir>/<base_name>-512.svg`.
    pub fn source_file(&mut self, source_file: impl AsRef<Path>) -> &mut IconRenderer {
        self.source_file = Some(source_file.as_ref().to_owned());
        self
    }

    pub fn source_path(&self) -> PathBuf {
        self.source_file.clone().unwrap_or_else(|| {
            self.icons_dir
                .join(format!("{}-512.svg", self.base_name))
        })
    }

    pub fn output_path(&self, size: u32) -> PathBuf {
        self.icons_dir
            .join(format!("{}-{size}.png", self.base_name))
    }

    /// Renders with the rasterizer built into this crate, if any.
    pub fn render(&self) -> Result<Report> {
        self.render_with_capability(Capability::detect())
    }

    pub fn render_with_capability(&self, capability: Capability) -> Result<Report> {
        match capability {
            Capability::Available(rasterizer) => self.render_with(rasterizer.as_ref()),
            Capability::Unavailable { guidance } => Err(Error::MissingCapability { guidance }),
        }
    }

    /// Renders every size with `rasterizer`.
    ///
    /// A failure for one size is recorded in the [`Report`] and the remaining
    /// sizes are still rendered. The whole run fails with no report when:
    ///
    /// - the source is missing ([`Error::SourceNotFound`]) or unreadable;
    /// - the icons directory is missing and cannot be created, e.g. because a
    ///   regular file already sits at that path ([`Error::Io`]).
    pub fn render_with(&self, rasterizer: impl Rasterizer) -> Result<Report> {
        let source_path = self.source_path();
        if !source_path.is_file() {
            return Err(Error::SourceNotFound(source_path));
        }
        let svg = fs::read_to_string(&source_path)?;
        log::debug!("Read {} bytes from {}", svg.len(), source_path.display());

        if !self.icons_dir.is_dir() {
            log::warn!("Creating missing icon directory {}", self.icons_dir.display());
            fs::create_dir_all(&self.icons_dir)?;
        }

        let outcomes = self
            .sizes
            .0
            .iter()
            .copied()
            .map(|size| {
                let path = self.output_path(size);
                let result = render_icon(&rasterizer, svg.as_bytes(), size, &path).map_err(
                    |source| Error::Render {
                        size,
                        path: path.clone(),
                        source: Box::new(source),
                    },
                );
                Outcome { size, path, result }
            })
            .collect();

        Ok(Report {
            output_dir: self.icons_dir.clone(),
            outcomes,
        })
    }
}

fn render_icon(rasterizer: &impl Rasterizer, svg: &[u8], size: u32, path: &Path) -> Result<()> {
    let png = rasterizer.rasterize(svg, size, size)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    file.write_all(&png)?;
    log::debug!("Wrote {} bytes to {}", png.len(), path.display());
    Ok(())
}

/// A list of square icon sizes, rendered in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSizes(Cow<'static, [u32]>);

impl IconSizes {
    /// The sizes a web app manifest needs: 192x192 and 512x512.
    pub const PWA: Self = Self::new(&[192, 512]);

    pub const fn new(sizes: &'static [u32]) -> IconSizes {
        Self(Cow::Borrowed(sizes))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Default for IconSizes {
    fn default() -> Self {
        IconSizes::PWA
    }
}

impl<'a, I> From<I> for IconSizes
where
    I: IntoIterator<Item = &'a u32>,
{
    fn from(value: I) -> Self {
        IconSizes(value.into_iter().copied().collect::<Vec<_>>().into())
    }
}

/// What happened to a single size.
#[derive(Debug)]
pub struct Outcome {
    pub size: u32,
    pub path: PathBuf,
    pub result: Result<()>,
}

/// The per-size outcomes of one run, in the configured order.
#[derive(Debug)]
pub struct Report {
    pub output_dir: PathBuf,
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn succeeded(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed().next().is_none()
    }

    /// A start line, one line per size, then the completion message.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "🎨 Generating PNG icons...")?;
        for outcome in &self.outcomes {
            let size = outcome.size;
            match &outcome.result {
                Ok(()) => {
                    let name = outcome.path.file_name().unwrap_or_default();
                    writeln!(
                        out,
                        "✅ Icon {size}x{size} created: {}",
                        Path::new(name).display()
                    )?;
                }
                Err(Error::Render { source, .. }) => {
                    writeln!(out, "❌ Failed to generate icon {size}x{size}: {source}")?;
                }
                Err(e) => writeln!(out, "❌ Failed to generate icon {size}x{size}: {e}")?,
            }
        }
        writeln!(out)?;
        writeln!(out, "✨ Icon generation finished. Icons are in:")?;
        writeln!(out, "  {}", self.output_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sizes_are_pwa() {
        assert_eq!(IconRenderer::default().sizes.as_slice(), &[192, 512]);
    }

    #[test]
    fn sizes_from_slice_keep_order() {
        let sizes = IconSizes::from(&[512, 16, 64]);
        assert_eq!(sizes.as_slice(), &[512, 16, 64]);
    }

    #[test]
    fn paths_derive_from_base_name_and_size() {
        let mut renderer = IconRenderer::default();
        renderer.icons_dir("/tmp/icons").base_name("app");
        assert_eq!(renderer.source_path(), Path::new("/tmp/icons/app-512.svg"));
        assert_eq!(renderer.output_path(192), Path::new("/tmp/icons/app-192.png"));

        renderer.source_file("/src/logo.svg");
        assert_eq!(renderer.source_path(), Path::new("/src/logo.svg"));
        assert_eq!(renderer.output_path(512), Path::new("/tmp/icons/app-512.png"));
    }

    #[test]
    fn default_source_lives_in_crate_assets() {
        let source = IconRenderer::default().source_path();
        assert!(source.ends_with("assets/icons/cerebro-icon-512.svg"));
        assert!(source.is_absolute());
    }

    #[test]
    fn prints_not_found_with_path() {
        let mut out = Vec::new();
        let result = Err(Error::SourceNotFound(PathBuf::from("/nowhere/icon.svg")));
        print_result(&result, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("/nowhere/icon.svg"));
        assert!(!text.contains("finished"));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }

    #[test]
    fn prints_start_line_before_sizes() {
        let report = Report {
            output_dir: PathBuf::from("/icons"),
            outcomes: vec![Outcome {
                size: 192,
                path: PathBuf::from("/icons/app-192.png"),
                result: Ok(()),
            }],
        };
        let mut out = Vec::new();
        report.print(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "🎨 Generating PNG icons...");
        assert_eq!(lines[1], "✅ Icon 192x192 created: app-192.png");
    }

    #[test]
    fn prints_guidance_when_unavailable() {
        let mut out = Vec::new();
        let result = Err(Error::MissingCapability {
            guidance: "install a rasterizer",
        });
        print_result(&result, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("install a rasterizer"));
    }
}
