//! Build lifecycle integration.
//!
//! The host calls [`BuildPlugin::html_finalize`] once the HTML document is assembled, and
//! [`BuildPlugin::emit`] when the output files get written. Both may run in any order, they
//! share the icon set of the plugin instance.

use crate::assets::BuildAssets;
use crate::config::{ConfigOptsPwa, PublicUrl, RtcPwa};
use crate::icons::{IconGenerator, IconSetBuilder, RasterIconGenerator};
use crate::pipelines::{HtmlPipeline, Manifest, find_html_entry, publish};
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

/// Build information provided by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildContext {
    /// The public URL of the build output.
    pub public_url: PublicUrl,
}

impl BuildContext {
    pub fn new(public_url: PublicUrl) -> Self {
        Self { public_url }
    }
}

/// The lifecycle hooks a build host drives.
#[async_trait]
pub trait BuildPlugin: Send + Sync {
    /// Rewrite the HTML document before it is written.
    async fn html_finalize(&self, ctx: &BuildContext, html: String) -> Result<String>;

    /// Add files to the build output.
    async fn emit(&self, ctx: &BuildContext, assets: &mut BuildAssets) -> Result<()>;
}

/// Adds the PWA manifest, icons and markup to a build.
///
/// An instance is meant to live for a single build, the generated icons are cached for its
/// lifetime.
pub struct PwaPlugin {
    cfg: Arc<RtcPwa>,
    icons: IconSetBuilder,
}

impl PwaPlugin {
    /// Create a new instance, rendering icons with the [`RasterIconGenerator`].
    pub fn new(opts: ConfigOptsPwa) -> Self {
        let cfg = RtcPwa::from_opts(opts);
        let generator = RasterIconGenerator::default().with_optimize(cfg.icons.optimize);
        Self::from_config(cfg, Arc::new(generator))
    }

    /// Create a new instance with a custom icon generator.
    pub fn with_generator(opts: ConfigOptsPwa, generator: Arc<dyn IconGenerator>) -> Self {
        Self::from_config(RtcPwa::from_opts(opts), generator)
    }

    fn from_config(cfg: RtcPwa, generator: Arc<dyn IconGenerator>) -> Self {
        let icons = IconSetBuilder::new(Arc::new(cfg.icons.clone()), generator);
        Self {
            cfg: Arc::new(cfg),
            icons,
        }
    }

    /// The resolved configuration.
    pub fn config(&self) -> &RtcPwa {
        &self.cfg
    }
}

#[async_trait]
impl BuildPlugin for PwaPlugin {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn html_finalize(&self, ctx: &BuildContext, html: String) -> Result<String> {
        let icons = self.icons.icon_set().await?;

        HtmlPipeline::new(&self.cfg, &icons, &ctx.public_url)
            .merge(&html)
            .context("error merging PWA markup into HTML")
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn emit(&self, ctx: &BuildContext, assets: &mut BuildAssets) -> Result<()> {
        let icons = self.icons.icon_set().await?;

        let entry = find_html_entry(assets.names());
        tracing::debug!(entry, "HTML entry point");
        let manifest = Manifest::new(&self.cfg.manifest, &icons, &ctx.public_url, entry);
        let manifest = Bytes::from(manifest.to_json()?);

        publish(assets, &icons, manifest, &self.cfg.manifest.filename);
        tracing::info!(
            icons = icons.len(),
            manifest = %self.cfg.manifest.filename,
            "emitted PWA assets"
        );

        Ok(())
    }
}
