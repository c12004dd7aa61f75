//! The configuration model
//!
//! This is what the user provides, and which gets resolved into the runtime model by
//! [`crate::config::RtcPwa::from_opts`]. Every field is optional, unknown fields are ignored.

mod icons;
mod manifest;

pub use icons::*;
pub use manifest::*;

#[cfg(test)]
mod test;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The value of a meta tag entry.
///
/// `false` suppresses the tag, `true` enables a boolean-style tag (rendered as `yes`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Flag(bool),
    Text(String),
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// The PWA configuration, as provided by the user.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOptsPwa {
    /// The application title, used for the `<title>` element and the manifest name.
    #[serde(default)]
    pub title: Option<String>,

    /// The theme color, shared by the manifest and the `theme-color` meta tag.
    #[serde(default, alias = "theme_color")]
    pub theme_color: Option<String>,

    #[serde(default)]
    pub manifest: Option<ConfigOptsManifest>,

    /// Either the path to the source image, or the full icon configuration.
    #[serde(default)]
    pub icons: Option<ConfigOptsIcons>,

    /// Meta tags to inject, keyed by their logical name (e.g. `appleMobileWebAppCapable`).
    #[serde(default)]
    pub meta: Option<BTreeMap<String, MetaValue>>,
}

impl ConfigOptsPwa {
    /// Parse the configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("error parsing PWA configuration")
    }

    /// Load the configuration from a file.
    ///
    /// Currently supported formats are:
    ///
    /// * TOML
    /// * YAML
    /// * JSON
    ///
    /// A relative icon source is resolved against the directory of the configuration file.
    pub async fn load(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();
        let content = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("error reading PWA configuration {}", file.display()))?;

        let mut cfg: Self = match file.extension().map(|s| s.to_string_lossy()).as_deref() {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).context("error parsing PWA configuration")?
            }
            Some("json") => {
                serde_json::from_str(&content).context("error parsing PWA configuration")?
            }
            Some(n) => {
                bail!("Unsupported configuration file type: {n}");
            }
            None => {
                bail!("Missing configuration file extension");
            }
        };

        if let Some(parent) = file.parent() {
            cfg.icons = cfg.icons.map(|icons| icons.rebase(parent));
        }

        Ok(cfg)
    }
}
