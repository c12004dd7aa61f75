//! Icon rendering.
//!
//! The pipeline only depends on the [`IconGenerator`] trait. [`RasterIconGenerator`] is the
//! default implementation, rendering a fixed table of PNG icons with the `image` crate.

use crate::config::IconSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use strum::Display;

/// The platform an icon is rendered for.
///
/// Only [`IconPlatform::Chrome`] icons are listed in the manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum IconPlatform {
    Favicon,
    Apple,
    Chrome,
    Windows,
}

/// A rendered icon, as produced by an [`IconGenerator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedIcon {
    /// The encoded PNG image.
    pub image: Bytes,
    pub filename: String,
    /// The size descriptor, e.g. `192x192`.
    pub sizes: Option<String>,
    pub platform: IconPlatform,
    /// The `rel` of the `<link>` tag. Icons without one are not linked from the HTML.
    pub rel: Option<String>,
}

/// Renders the icon set from a source image.
#[async_trait]
pub trait IconGenerator: Send + Sync {
    /// Render all icons, in the order they should appear in the HTML and manifest.
    async fn generate(&self, source: &IconSource) -> Result<Vec<GeneratedIcon>>;
}

/// An entry of the icon table of [`RasterIconGenerator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconSpec {
    pub filename: &'static str,
    /// Width and height, icons are square.
    pub size: u32,
    pub platform: IconPlatform,
    pub rel: Option<&'static str>,
}

impl IconSpec {
    const fn new(
        filename: &'static str,
        size: u32,
        platform: IconPlatform,
        rel: Option<&'static str>,
    ) -> Self {
        Self {
            filename,
            size,
            platform,
            rel,
        }
    }
}

/// The default icon table.
pub const DEFAULT_ICONS: &[IconSpec] = &[
    IconSpec::new("favicon-16x16.png", 16, IconPlatform::Favicon, Some("icon")),
    IconSpec::new("favicon-32x32.png", 32, IconPlatform::Favicon, Some("icon")),
    IconSpec::new(
        "apple-touch-icon.png",
        180,
        IconPlatform::Apple,
        Some("apple-touch-icon"),
    ),
    IconSpec::new("android-chrome-192x192.png", 192, IconPlatform::Chrome, None),
    IconSpec::new("android-chrome-512x512.png", 512, IconPlatform::Chrome, None),
    IconSpec::new("mstile-150x150.png", 150, IconPlatform::Windows, None),
];

/// Renders square PNG icons using the `image` crate.
///
/// The source is scaled to fit (keeping its aspect ratio) and centered on a transparent
/// canvas. Decoding and encoding run on the blocking thread pool.
#[derive(Clone, Debug)]
pub struct RasterIconGenerator {
    specs: Vec<IconSpec>,
    optimize: bool,
}

impl Default for RasterIconGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ICONS.to_vec())
    }
}

impl RasterIconGenerator {
    pub fn new(specs: Vec<IconSpec>) -> Self {
        Self {
            specs,
            optimize: false,
        }
    }

    /// Run each rendered PNG through `oxipng`.
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn render(data: &[u8], specs: &[IconSpec], optimize: bool) -> Result<Vec<GeneratedIcon>> {
        let source = image::load_from_memory(data).context("error decoding icon source image")?;

        specs
            .iter()
            .map(|spec| {
                let image = render_png(&source, spec.size)
                    .with_context(|| format!("error rendering icon {}", spec.filename))?;
                let image = if optimize {
                    oxipng::optimize_from_memory(&image, &oxipng::Options::default())
                        .with_context(|| format!("error optimizing icon {}", spec.filename))?
                } else {
                    image
                };

                tracing::debug!(
                    filename = spec.filename,
                    size = spec.size,
                    bytes = image.len(),
                    "rendered icon"
                );

                Ok(GeneratedIcon {
                    image: Bytes::from(image),
                    filename: spec.filename.to_string(),
                    sizes: Some(format!("{0}x{0}", spec.size)),
                    platform: spec.platform,
                    rel: spec.rel.map(ToString::to_string),
                })
            })
            .collect()
    }
}

fn render_png(source: &DynamicImage, size: u32) -> Result<Vec<u8>> {
    let scaled = source.resize(size, size, FilterType::Lanczos3).to_rgba8();

    let mut canvas = RgbaImage::new(size, size);
    let x = (size - scaled.width()) / 2;
    let y = (size - scaled.height()) / 2;
    imageops::overlay(&mut canvas, &scaled, x.into(), y.into());

    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

#[async_trait]
impl IconGenerator for RasterIconGenerator {
    async fn generate(&self, source: &IconSource) -> Result<Vec<GeneratedIcon>> {
        let data = match source {
            IconSource::Path(path) => Bytes::from(
                tokio::fs::read(path)
                    .await
                    .with_context(|| format!("error reading icon source {}", path.display()))?,
            ),
            IconSource::Bytes(data) => data.clone(),
        };

        let specs = self.specs.clone();
        let optimize = self.optimize;
        tokio::task::spawn_blocking(move || Self::render(&data, &specs, optimize))
            .await
            .context("error awaiting icon rendering")?
    }
}
