//! Progressive web app support for web application builds.
//!
//! Generates a web app manifest and a set of icons from a single source image, and adds the
//! matching markup (meta tags, icon links, manifest link, title) to the HTML entry point.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use trunk_pwa::{BuildAssets, BuildContext, BuildPlugin, ConfigOptsPwa, PwaPlugin};
//!
//! let opts = ConfigOptsPwa::from_toml_str(r#"
//! title = "My App"
//! icons = "assets/logo.png"
//! "#)?;
//! let plugin = PwaPlugin::new(opts);
//! let ctx = BuildContext::new("/app/".parse()?);
//!
//! let html = plugin.html_finalize(&ctx, "<html><head></head></html>".into()).await?;
//!
//! let mut assets: BuildAssets = [("index.html", html)].into_iter().collect();
//! plugin.emit(&ctx, &mut assets).await?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]

pub mod assets;
pub mod common;
pub mod config;
pub mod hooks;
pub mod icons;
pub mod meta;
pub mod pipelines;

pub use assets::BuildAssets;
pub use config::{ConfigOptsPwa, PublicUrl, RtcPwa};
pub use hooks::{BuildContext, BuildPlugin, PwaPlugin};
pub use icons::{GeneratedIcon, IconGenerator, IconPlatform, IconSet, RasterIconGenerator};
