//! Web app manifest pipeline.

use crate::config::{PublicUrl, RtcManifest};
use crate::icons::IconSet;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

const MIME_PNG: &str = "image/png";

/// The members set from the dedicated config fields. Extra members must not shadow them.
const RESERVED_MEMBERS: &[&str] = &[
    "name",
    "short_name",
    "orientation",
    "display",
    "start_url",
    "theme_color",
    "background_color",
    "icons",
];

/// An icon entry of the manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(rename = "type")]
    pub mime_type: &'static str,
}

/// The web app manifest document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Manifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    pub start_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Additional members, with snake_case keys.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
    pub icons: Vec<ManifestIcon>,
}

impl Manifest {
    /// Build the manifest.
    ///
    /// `entry` is the HTML entry point of the build, used for the start URL if none is
    /// configured.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn new(
        cfg: &RtcManifest,
        icons: &IconSet,
        public_url: &PublicUrl,
        entry: Option<&str>,
    ) -> Self {
        let start_url = match (&cfg.start_url, entry) {
            (Some(start_url), _) => start_url.clone(),
            (None, Some(entry)) => public_url.join(entry),
            (None, None) => {
                tracing::debug!("no single HTML entry point found, using '/' as start URL");
                public_url.join("/")
            }
        };

        let extra = cfg
            .extra
            .iter()
            .filter_map(|(key, value)| {
                let key = snake_case(key);
                if RESERVED_MEMBERS.contains(&key.as_str()) {
                    tracing::debug!(member = %key, "ignoring manifest member shadowing a config field");
                    return None;
                }
                Some((key, value.clone()))
            })
            .collect();

        let icons = icons
            .manifest_icons()
            .map(|icon| ManifestIcon {
                src: public_url.join(&icon.asset_name),
                sizes: icon.sizes.clone(),
                mime_type: MIME_PNG,
            })
            .collect();

        Self {
            name: cfg.name.clone(),
            short_name: cfg.short_name.clone(),
            orientation: cfg.orientation.clone(),
            display: cfg.display.clone(),
            start_url,
            theme_color: cfg.theme_color.clone(),
            background_color: cfg.background_color.clone(),
            extra,
            icons,
        }
    }

    /// Serialize as pretty printed JSON, indented by two spaces.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("error serializing web app manifest")
    }
}

/// Find the HTML entry point among the output files.
///
/// This is the only HTML file, or the first one named `index.html` if there are several.
pub fn find_html_entry<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let html: Vec<_> = names
        .into_iter()
        .filter(|name| name.ends_with(".html"))
        .collect();

    match html.as_slice() {
        [single] => Some(*single),
        candidates => candidates
            .iter()
            .find(|name| name.ends_with("index.html"))
            .copied(),
    }
}

/// Convert a camelCase, kebab-case or space separated key into snake_case.
pub fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;

    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if matches!(c, '-' | ' ' | '_') {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    out.trim_end_matches('_').to_string()
}
